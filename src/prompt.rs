//! Interactive prompting
//!
//! Provides TTY detection and typed prompts for deployment parameters.
//! Every prompt accepts `?` to show the help text and asks again.

use crate::error::CliError;
use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io::{self, BufRead, IsTerminal, Write};

/// Line-oriented question/answer channel
pub trait Prompter {
    /// Whether answers can be collected at all
    fn is_interactive(&self) -> bool;

    /// Show `message` and read one line (without the trailing newline)
    fn ask(&mut self, message: &str) -> Result<String>;

    /// Like `ask`, but the answer is not echoed where the channel allows it
    fn ask_hidden(&mut self, message: &str) -> Result<String> {
        self.ask(message)
    }

    /// Show an informational line
    fn say(&mut self, message: &str) -> Result<()>;
}

/// Prompter over a reader and a writer (stdin/stderr in practice)
pub struct TerminalPrompter<R, W> {
    input: R,
    output: W,
    interactive: bool,
    hidden_entry: bool,
}

impl TerminalPrompter<io::StdinLock<'static>, io::Stderr> {
    /// Prompter on the process terminal; interactive only when stdin is a TTY
    pub fn stdio() -> Self {
        Self {
            input: io::stdin().lock(),
            output: io::stderr(),
            interactive: io::stdin().is_terminal(),
            hidden_entry: io::stdin().is_terminal(),
        }
    }
}

impl<R: BufRead, W: Write> TerminalPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            interactive: true,
            hidden_entry: false,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for TerminalPrompter<R, W> {
    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn ask(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message)?;
        self.output.flush().ok();

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Err(CliError::usage("Input ended before all parameters were provided").into());
        }

        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn ask_hidden(&mut self, message: &str) -> Result<String> {
        if !self.hidden_entry {
            return self.ask(message);
        }

        write!(self.output, "{}", message)?;
        self.output.flush().ok();
        let answer = read_hidden_line();
        writeln!(self.output)?;
        answer
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message)?;
        Ok(())
    }
}

/// Leaves raw mode when dropped
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        terminal::enable_raw_mode().context("Failed to switch the terminal to raw mode")?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// Read one line from the terminal with echo off
fn read_hidden_line() -> Result<String> {
    let _raw = RawModeGuard::enable()?;
    let mut line = String::new();

    loop {
        let Event::Key(key) = event::read().context("Failed to read input")? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        match key.code {
            KeyCode::Enter => return Ok(line),
            KeyCode::Backspace => {
                line.pop();
            }
            KeyCode::Char('c') | KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Err(CliError::usage("Input ended before all parameters were provided").into());
            }
            KeyCode::Char(c) => line.push(c),
            _ => {}
        }
    }
}

/// Ask until a non-`?` answer arrives
fn ask_with_help(prompter: &mut dyn Prompter, message: &str, help: &str) -> Result<String> {
    loop {
        let answer = prompter.ask(message)?;
        if answer.trim() == "?" {
            prompter.say(help)?;
            continue;
        }
        return Ok(answer);
    }
}

/// Free text; empty answers are accepted
pub fn prompt_text(prompter: &mut dyn Prompter, message: &str, help: &str) -> Result<String> {
    ask_with_help(prompter, message, help)
}

/// Secret text, typed without echo on a terminal
pub fn prompt_secret(prompter: &mut dyn Prompter, message: &str, help: &str) -> Result<String> {
    loop {
        let answer = prompter.ask_hidden(message)?;
        if answer.trim() == "?" {
            prompter.say(help)?;
            continue;
        }
        return Ok(answer);
    }
}

pub fn prompt_int(prompter: &mut dyn Prompter, message: &str, help: &str) -> Result<i64> {
    loop {
        let answer = ask_with_help(prompter, message, help)?;
        match answer.trim().parse() {
            Ok(value) => return Ok(value),
            Err(_) => prompter.say(&format!("{} is not a valid number", answer.trim()))?,
        }
    }
}

/// `true`/`false` (also `t`/`f`, any case)
pub fn prompt_bool(prompter: &mut dyn Prompter, message: &str, help: &str) -> Result<bool> {
    loop {
        let answer = ask_with_help(prompter, &format!("{}(true/false) ", message), help)?;
        match answer.trim().to_lowercase().as_str() {
            "true" | "t" => return Ok(true),
            "false" | "f" => return Ok(false),
            _ => prompter.say("Please enter 'true' or 'false'")?,
        }
    }
}

/// Numbered choice list; returns the chosen index
pub fn prompt_choice(
    prompter: &mut dyn Prompter,
    message: &str,
    options: &[String],
    help: &str,
) -> Result<usize> {
    if options.is_empty() {
        return Err(CliError::usage("No allowed values to choose from").into());
    }

    prompter.say(message)?;
    for (i, option) in options.iter().enumerate() {
        prompter.say(&format!(" [{}] {}", i + 1, option))?;
    }

    let question = format!("Please enter a choice [1-{}]: ", options.len());
    loop {
        let answer = ask_with_help(prompter, &question, help)?;
        match answer.trim().parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => return Ok(n - 1),
            _ => prompter.say("Valid values are shown above.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> TerminalPrompter<Cursor<Vec<u8>>, Vec<u8>> {
        TerminalPrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_help_is_shown_then_question_repeats() {
        let mut p = prompter("?\nhello\n");
        assert_eq!(prompt_text(&mut p, "Q: ", "the help").unwrap(), "hello");
        let out = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(out, "Q: the help\nQ: ");
    }

    #[test]
    fn test_int_retries_on_garbage() {
        let mut p = prompter("abc\n42\n");
        assert_eq!(prompt_int(&mut p, "Q: ", "h").unwrap(), 42);
    }

    #[test]
    fn test_bool_accepts_short_forms() {
        let mut p = prompter("maybe\nT\n");
        assert!(prompt_bool(&mut p, "Q: ", "h").unwrap());
    }

    #[test]
    fn test_choice_is_one_based() {
        let mut p = prompter("0\n2\n");
        let options = vec!["a".to_string(), "b".to_string()];
        assert_eq!(prompt_choice(&mut p, "Q: ", &options, "h").unwrap(), 1);
    }

    /// Records which channel each question went through
    #[derive(Default)]
    struct ScriptedPrompter {
        answers: Vec<&'static str>,
        hidden_questions: usize,
        plain_questions: usize,
    }

    impl Prompter for ScriptedPrompter {
        fn is_interactive(&self) -> bool {
            true
        }

        fn ask(&mut self, _message: &str) -> Result<String> {
            self.plain_questions += 1;
            Ok(self.answers.remove(0).to_string())
        }

        fn ask_hidden(&mut self, _message: &str) -> Result<String> {
            self.hidden_questions += 1;
            Ok(self.answers.remove(0).to_string())
        }

        fn say(&mut self, _message: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_secret_goes_through_hidden_entry() {
        let mut p = ScriptedPrompter {
            answers: vec!["?", "s3cret"],
            ..Default::default()
        };
        assert_eq!(prompt_secret(&mut p, "Q: ", "h").unwrap(), "s3cret");
        assert_eq!(p.hidden_questions, 2);
        assert_eq!(p.plain_questions, 0);
    }

    #[test]
    fn test_secret_reads_lines_off_terminal() {
        let mut p = prompter("pa ss\n");
        assert_eq!(prompt_secret(&mut p, "Q: ", "h").unwrap(), "pa ss");
    }

    #[test]
    fn test_choice_without_options_is_an_error() {
        let mut p = prompter("1\n");
        let err = prompt_choice(&mut p, "Pick: ", &[], "h").unwrap_err();
        assert!(err.to_string().contains("No allowed values"));
        assert_eq!(String::from_utf8(p.into_output()).unwrap(), "");
    }

    #[test]
    fn test_end_of_input_is_an_error() {
        let mut p = prompter("");
        let err = prompt_text(&mut p, "Q: ", "h").unwrap_err();
        assert!(err.to_string().contains("Input ended"));
    }
}
