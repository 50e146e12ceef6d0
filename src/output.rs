//! Result printing

use anyhow::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// How command results are written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
    None,
}

/// Render a result; `None` output and JSON `null` render nothing
pub fn render<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<Option<String>> {
    let value = serde_json::to_value(value)?;
    if value.is_null() {
        return Ok(None);
    }

    let text = match format {
        OutputFormat::Json => serde_json::to_string_pretty(&value)?,
        OutputFormat::Yaml => serde_yaml::to_string(&value)?.trim_end().to_string(),
        OutputFormat::None => return Ok(None),
    };
    Ok(Some(text))
}

/// Print a result to stdout
pub fn print<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<()> {
    if let Some(text) = render(value, format)? {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{}", text)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_formats() {
        let value = json!({"name": "rg1", "location": "westus"});
        let text = render(&value, OutputFormat::Json).unwrap().unwrap();
        assert!(text.contains("\"name\": \"rg1\""));

        let text = render(&value, OutputFormat::Yaml).unwrap().unwrap();
        assert!(text.contains("name: rg1"));

        assert_eq!(render(&value, OutputFormat::None).unwrap(), None);
        assert_eq!(render(&serde_json::Value::Null, OutputFormat::Json).unwrap(), None);
    }

    #[test]
    fn test_output_format_config_names() {
        let format: OutputFormat = serde_json::from_str("\"yaml\"").unwrap();
        assert_eq!(format, OutputFormat::Yaml);
    }
}
