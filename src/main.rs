use anyhow::{Context, Result};
use azrm::arm::auth::{self, ArmCredentials, TokenSource};
use azrm::arm::client::ArmClient;
use azrm::arm::http::format_arm_error;
use azrm::arm::models::DeploymentMode;
use azrm::commands::deployment::{self, DeploymentRequest};
use azrm::commands::lock::{self, LockArgs};
use azrm::commands::resource::{self as resource_cmd, ResourceArgs, ResourceFilter};
use azrm::commands::{groups, link, load_json_arg, parse_tags, policy, TagFilter};
use azrm::config::{configure, Config, ConfigUpdate};
use azrm::error::CliError;
use azrm::output::{self, OutputFormat};
use azrm::prompt::TerminalPrompter;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Manage Azure resource groups, deployments, resources, policies, locks and links
#[derive(Parser, Debug)]
#[command(name = "azrm", version, about, long_about = None)]
struct Cli {
    /// Subscription id to operate on
    #[arg(long, global = true)]
    subscription: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    output: Option<OutputFormat>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage resource groups and template deployments
    Group {
        #[command(subcommand)]
        command: GroupCommand,
    },
    /// Manage generic resources
    Resource {
        #[command(subcommand)]
        command: ResourceCommand,
    },
    /// Manage resource providers
    Provider {
        #[command(subcommand)]
        command: ProviderCommand,
    },
    /// Inspect preview features
    Feature {
        #[command(subcommand)]
        command: FeatureCommand,
    },
    /// Manage policy assignments and definitions
    Policy {
        #[command(subcommand)]
        command: PolicyCommand,
    },
    /// Manage management locks
    Lock {
        #[command(subcommand)]
        command: LockCommand,
    },
    /// Store defaults in the azrm config file; prints the stored config
    Configure {
        /// Subscription used when --subscription is not given
        #[arg(long)]
        default_subscription: Option<String>,
        /// Management endpoint
        #[arg(long)]
        endpoint: Option<String>,
        /// Output format used when --output is not given
        #[arg(long, value_enum)]
        default_output: Option<OutputFormat>,
        /// Seconds between polls of long-running operations
        #[arg(long)]
        poll_interval: Option<u64>,
    },
    /// Print completion candidates
    #[command(hide = true)]
    Complete {
        #[arg(value_enum)]
        kind: CompletionKind,
    },
}

#[derive(Subcommand, Debug)]
enum GroupCommand {
    /// List resource groups
    List {
        /// Tag filter in `key[=value]` format
        #[arg(long)]
        tag: Option<String>,
    },
    /// Create a resource group
    Create {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        location: String,
        /// Tags in `key[=value]` format
        #[arg(long, num_args = 0..)]
        tags: Option<Vec<String>>,
    },
    /// Capture a resource group as a template
    Export {
        #[arg(short, long)]
        name: String,
        #[arg(long)]
        include_comments: bool,
        #[arg(long)]
        include_parameter_default_value: bool,
    },
    /// Manage template deployments
    Deployment {
        #[command(subcommand)]
        command: DeploymentCommand,
    },
}

#[derive(Args, Debug)]
struct TemplateArgs {
    #[arg(short = 'g', long)]
    resource_group: String,
    /// Deployment name (defaults to the template name)
    #[arg(short, long)]
    name: Option<String>,
    #[arg(long)]
    template_file: Option<PathBuf>,
    #[arg(long)]
    template_uri: Option<String>,
    /// Parameters as inline JSON, `@file` or a file path; later ones win
    #[arg(long, num_args = 1..)]
    parameters: Vec<String>,
    #[arg(long, value_enum, default_value = "incremental")]
    mode: ModeArg,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Incremental,
    Complete,
}

impl From<ModeArg> for DeploymentMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Incremental => DeploymentMode::Incremental,
            ModeArg::Complete => DeploymentMode::Complete,
        }
    }
}

impl TemplateArgs {
    fn into_request(self, no_wait: bool) -> DeploymentRequest {
        DeploymentRequest {
            resource_group: self.resource_group,
            name: self.name,
            template_file: self.template_file,
            template_uri: self.template_uri,
            parameters: self.parameters,
            mode: self.mode.into(),
            no_wait,
        }
    }
}

#[derive(Subcommand, Debug)]
enum DeploymentCommand {
    /// Start a deployment
    Create {
        #[command(flatten)]
        template: TemplateArgs,
        /// Do not wait for the deployment to finish
        #[arg(long)]
        no_wait: bool,
    },
    /// Validate a template without deploying it
    Validate {
        #[command(flatten)]
        template: TemplateArgs,
    },
    /// Export the template used by a deployment
    Export {
        #[arg(short = 'g', long)]
        resource_group: String,
        #[arg(short, long)]
        name: String,
    },
    /// Deployment operations
    Operation {
        #[command(subcommand)]
        command: OperationCommand,
    },
}

#[derive(Subcommand, Debug)]
enum OperationCommand {
    /// Show deployment operations
    Show {
        #[arg(short = 'g', long)]
        resource_group: String,
        #[arg(short, long)]
        name: String,
        #[arg(long, num_args = 1.., required = true)]
        operation_ids: Vec<String>,
    },
}

/// Addresses one resource by id or by parts
#[derive(Args, Debug)]
struct ResourceTargetArgs {
    /// Full resource id; other addressing flags are ignored when given
    #[arg(long)]
    id: Option<String>,
    #[arg(short = 'g', long)]
    resource_group: Option<String>,
    /// Provider namespace (or embed it as --resource-type NS/type)
    #[arg(long)]
    namespace: Option<String>,
    /// Parent path, e.g. `servers/myserver`
    #[arg(long)]
    parent: Option<String>,
    #[arg(long)]
    resource_type: Option<String>,
    #[arg(short, long)]
    name: Option<String>,
    #[arg(long)]
    api_version: Option<String>,
}

impl From<ResourceTargetArgs> for ResourceArgs {
    fn from(args: ResourceTargetArgs) -> Self {
        ResourceArgs {
            resource_group: args.resource_group,
            namespace: args.namespace,
            parent: args.parent,
            resource_type: args.resource_type,
            name: args.name,
            id: args.id,
            api_version: args.api_version,
        }
    }
}

#[derive(Subcommand, Debug)]
enum ResourceCommand {
    /// Show a resource
    Show {
        #[command(flatten)]
        target: ResourceTargetArgs,
    },
    /// Delete a resource
    Delete {
        #[command(flatten)]
        target: ResourceTargetArgs,
    },
    /// Merge properties into a resource
    Update {
        #[command(flatten)]
        target: ResourceTargetArgs,
        /// JSON object (inline, `@file` or file path)
        #[arg(long)]
        properties: String,
    },
    /// Replace the tags of a resource; no tags clears them
    Tag {
        #[command(flatten)]
        target: ResourceTargetArgs,
        #[arg(long, num_args = 0..)]
        tags: Vec<String>,
    },
    /// List resources
    List {
        #[arg(short = 'g', long)]
        resource_group: Option<String>,
        #[arg(long)]
        namespace: Option<String>,
        #[arg(long)]
        resource_type: Option<String>,
        #[arg(short, long)]
        name: Option<String>,
        /// Tag filter in `key[=value]` format; `key*` matches a prefix
        #[arg(long)]
        tag: Option<String>,
        #[arg(short, long)]
        location: Option<String>,
    },
    /// Move resources to another resource group
    Move {
        #[arg(long, num_args = 1.., required = true)]
        ids: Vec<String>,
        #[arg(long)]
        destination_group: String,
        #[arg(long)]
        destination_subscription_id: Option<String>,
    },
    /// Manage resource links
    Link {
        #[command(subcommand)]
        command: LinkCommand,
    },
}

#[derive(Subcommand, Debug)]
enum LinkCommand {
    Create {
        #[arg(long)]
        link_id: String,
        #[arg(long)]
        target_id: String,
        #[arg(long)]
        notes: Option<String>,
    },
    Update {
        #[arg(long)]
        link_id: String,
        #[arg(long)]
        target_id: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    List {
        #[arg(long)]
        scope: Option<String>,
        #[arg(long)]
        filter: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum ProviderCommand {
    /// List providers
    List,
    /// List every `namespace/type`
    Types,
    Register {
        #[arg(short, long)]
        namespace: String,
    },
    Unregister {
        #[arg(short, long)]
        namespace: String,
    },
}

#[derive(Subcommand, Debug)]
enum FeatureCommand {
    List {
        #[arg(long)]
        namespace: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum PolicyCommand {
    Assignment {
        #[command(subcommand)]
        command: AssignmentCommand,
    },
    Definition {
        #[command(subcommand)]
        command: DefinitionCommand,
    },
}

#[derive(Args, Debug)]
struct PolicyScopeArgs {
    #[arg(short = 'g', long)]
    resource_group: Option<String>,
    #[arg(long)]
    scope: Option<String>,
}

#[derive(Subcommand, Debug)]
enum AssignmentCommand {
    Create {
        /// Definition name or id
        #[arg(long)]
        policy: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(long)]
        display_name: Option<String>,
        #[command(flatten)]
        scope: PolicyScopeArgs,
    },
    Delete {
        #[arg(short, long)]
        name: String,
        #[command(flatten)]
        scope: PolicyScopeArgs,
    },
    Show {
        #[arg(short, long)]
        name: String,
        #[command(flatten)]
        scope: PolicyScopeArgs,
    },
    List {
        /// Include assignments inherited from parent scopes
        #[arg(long)]
        disable_scope_strict_match: bool,
        #[command(flatten)]
        scope: PolicyScopeArgs,
    },
}

#[derive(Subcommand, Debug)]
enum DefinitionCommand {
    Create {
        #[arg(short, long)]
        name: String,
        /// Policy rule JSON (inline, `@file` or file path)
        #[arg(long)]
        rules: String,
        #[arg(long)]
        display_name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    Update {
        #[arg(short, long)]
        name: String,
        #[arg(long)]
        rules: Option<String>,
        #[arg(long)]
        display_name: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    List,
}

#[derive(Args, Debug)]
struct LockScopeArgs {
    #[arg(short = 'g', long)]
    resource_group: Option<String>,
    #[arg(long)]
    namespace: Option<String>,
    #[arg(long)]
    parent: Option<String>,
    #[arg(long)]
    resource_type: Option<String>,
    #[arg(long)]
    resource_name: Option<String>,
}

impl From<LockScopeArgs> for LockArgs {
    fn from(args: LockScopeArgs) -> Self {
        LockArgs {
            resource_group: args.resource_group,
            namespace: args.namespace,
            parent: args.parent,
            resource_type: args.resource_type,
            resource_name: args.resource_name,
        }
    }
}

#[derive(Subcommand, Debug)]
enum LockCommand {
    Create {
        #[arg(short, long)]
        name: String,
        /// ReadOnly or CanNotDelete
        #[arg(long)]
        lock_type: String,
        #[arg(long)]
        notes: Option<String>,
        #[command(flatten)]
        scope: LockScopeArgs,
    },
    Delete {
        #[arg(short, long)]
        name: String,
        #[command(flatten)]
        scope: LockScopeArgs,
    },
    Show {
        #[arg(short, long)]
        name: String,
        #[arg(short = 'g', long)]
        resource_group: Option<String>,
    },
    List {
        #[command(flatten)]
        scope: LockScopeArgs,
        /// OData filter
        #[arg(long)]
        filter: Option<String>,
    },
    Update {
        #[arg(short, long)]
        name: String,
        #[arg(short = 'g', long)]
        resource_group: Option<String>,
        #[arg(long)]
        lock_type: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CompletionKind {
    PolicyDefinitions,
    PolicyAssignments,
    Providers,
    ResourceTypes,
}

fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot open log file {}: {}", log_path.display(), e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("azrm started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("azrm").join("azrm.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".azrm").join("azrm.log");
    }
    PathBuf::from("azrm.log")
}

fn build_client(config: &Config, subscription: Option<&str>) -> Result<ArmClient> {
    let subscription = config.effective_subscription(subscription).ok_or_else(|| {
        CliError::usage(
            "No subscription configured. Use --subscription, set AZURE_SUBSCRIPTION_ID or run 'az login'",
        )
    })?;
    if !auth::validate_subscription_id(&subscription) {
        return Err(CliError::usage(format!("Invalid subscription id '{}'", subscription)).into());
    }

    let source = TokenSource::from_env();
    tracing::info!("Using subscription {} with {:?}", subscription, source);

    Ok(
        ArmClient::new(&subscription, &config.effective_endpoint(), ArmCredentials::new(source))?
            .with_poll_interval(config.poll_interval()),
    )
}

/// Export commands always print the template itself as JSON
fn print_template(template: &serde_json::Value) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(template).context("Failed to render template")?
    );
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load();
    let format = config.effective_output(cli.output);

    if let Command::Configure {
        default_subscription,
        endpoint,
        default_output,
        poll_interval,
    } = cli.command
    {
        let path = Config::config_path()
            .ok_or_else(|| CliError::usage("No configuration directory is available"))?;
        let update = ConfigUpdate {
            subscription_id: default_subscription,
            endpoint,
            output: default_output,
            poll_interval_secs: poll_interval,
        };
        return output::print(&configure(&path, update)?, format);
    }

    let client = build_client(&config, cli.subscription.as_deref())?;

    match cli.command {
        Command::Group { command } => run_group(&client, command, format).await,
        Command::Resource { command } => run_resource(&client, command, format).await,
        Command::Provider { command } => match command {
            ProviderCommand::List => output::print(&resource_cmd::list_providers(&client).await?, format),
            ProviderCommand::Types => {
                output::print(&resource_cmd::resource_type_names(&client).await?, format)
            }
            ProviderCommand::Register { namespace } => output::print(
                &resource_cmd::register_provider(&client, &namespace).await?,
                format,
            ),
            ProviderCommand::Unregister { namespace } => output::print(
                &resource_cmd::unregister_provider(&client, &namespace).await?,
                format,
            ),
        },
        Command::Feature {
            command: FeatureCommand::List { namespace },
        } => output::print(
            &resource_cmd::list_features(&client, namespace.as_deref()).await?,
            format,
        ),
        Command::Policy { command } => run_policy(&client, command, format).await,
        Command::Lock { command } => run_lock(&client, command, format).await,
        Command::Configure { .. } => Ok(()),
        Command::Complete { kind } => {
            let names = match kind {
                CompletionKind::PolicyDefinitions => policy::policy_completion_list(&client).await?,
                CompletionKind::PolicyAssignments => {
                    policy::policy_assignment_completion_list(&client).await?
                }
                CompletionKind::Providers => resource_cmd::provider_namespaces(&client).await?,
                CompletionKind::ResourceTypes => resource_cmd::resource_type_names(&client).await?,
            };
            for name in names {
                println!("{}", name);
            }
            Ok(())
        }
    }
}

async fn run_group(client: &ArmClient, command: GroupCommand, format: OutputFormat) -> Result<()> {
    match command {
        GroupCommand::List { tag } => output::print(
            &groups::list_resource_groups(client, tag.as_deref()).await?,
            format,
        ),
        GroupCommand::Create { name, location, tags } => {
            let tags = tags.map(|t| parse_tags(&t));
            output::print(
                &groups::create_resource_group(client, &name, &location, tags).await?,
                format,
            )
        }
        GroupCommand::Export {
            name,
            include_comments,
            include_parameter_default_value,
        } => print_template(
            &groups::export_group_as_template(
                client,
                &name,
                include_comments,
                include_parameter_default_value,
            )
            .await?,
        ),
        GroupCommand::Deployment { command } => match command {
            DeploymentCommand::Create { template, no_wait } => {
                let mut prompter = TerminalPrompter::stdio();
                let request = template.into_request(no_wait);
                output::print(&deployment::deploy(client, &request, &mut prompter).await?, format)
            }
            DeploymentCommand::Validate { template } => {
                let mut prompter = TerminalPrompter::stdio();
                let request = template.into_request(false);
                output::print(&deployment::validate(client, &request, &mut prompter).await?, format)
            }
            DeploymentCommand::Export { resource_group, name } => print_template(
                &deployment::export_deployment_as_template(client, &resource_group, &name).await?,
            ),
            DeploymentCommand::Operation {
                command:
                    OperationCommand::Show {
                        resource_group,
                        name,
                        operation_ids,
                    },
            } => output::print(
                &deployment::get_deployment_operations(client, &resource_group, &name, &operation_ids)
                    .await?,
                format,
            ),
        },
    }
}

async fn run_resource(client: &ArmClient, command: ResourceCommand, format: OutputFormat) -> Result<()> {
    match command {
        ResourceCommand::Show { target } => output::print(
            &resource_cmd::show_resource(client, &target.into()).await?,
            format,
        ),
        ResourceCommand::Delete { target } => output::print(
            &resource_cmd::delete_resource(client, &target.into()).await?,
            format,
        ),
        ResourceCommand::Update { target, properties } => {
            let properties = load_json_arg(&properties)?;
            output::print(
                &resource_cmd::update_resource(client, &target.into(), properties).await?,
                format,
            )
        }
        ResourceCommand::Tag { target, tags } => output::print(
            &resource_cmd::tag_resource(client, &target.into(), parse_tags(&tags)).await?,
            format,
        ),
        ResourceCommand::List {
            resource_group,
            namespace,
            resource_type,
            name,
            tag,
            location,
        } => {
            let filter = ResourceFilter {
                resource_group,
                namespace,
                resource_type,
                name,
                tag: tag.as_deref().map(TagFilter::parse),
                location,
            };
            output::print(&resource_cmd::list_resources(client, &filter).await?, format)
        }
        ResourceCommand::Move {
            ids,
            destination_group,
            destination_subscription_id,
        } => output::print(
            &resource_cmd::move_resource(
                client,
                &ids,
                &destination_group,
                destination_subscription_id.as_deref(),
            )
            .await?,
            format,
        ),
        ResourceCommand::Link { command } => match command {
            LinkCommand::Create {
                link_id,
                target_id,
                notes,
            } => output::print(
                &link::create_resource_link(client, &link_id, &target_id, notes.as_deref()).await?,
                format,
            ),
            LinkCommand::Update {
                link_id,
                target_id,
                notes,
            } => output::print(
                &link::update_resource_link(client, &link_id, target_id.as_deref(), notes.as_deref())
                    .await?,
                format,
            ),
            LinkCommand::List { scope, filter } => output::print(
                &link::list_resource_links(client, scope.as_deref(), filter.as_deref()).await?,
                format,
            ),
        },
    }
}

async fn run_policy(client: &ArmClient, command: PolicyCommand, format: OutputFormat) -> Result<()> {
    match command {
        PolicyCommand::Assignment { command } => match command {
            AssignmentCommand::Create {
                policy: definition,
                name,
                display_name,
                scope,
            } => output::print(
                &policy::create_policy_assignment(
                    client,
                    &definition,
                    name.as_deref(),
                    display_name.as_deref(),
                    scope.resource_group.as_deref(),
                    scope.scope.as_deref(),
                )
                .await?,
                format,
            ),
            AssignmentCommand::Delete { name, scope } => {
                policy::delete_policy_assignment(
                    client,
                    &name,
                    scope.resource_group.as_deref(),
                    scope.scope.as_deref(),
                )
                .await
            }
            AssignmentCommand::Show { name, scope } => output::print(
                &policy::show_policy_assignment(
                    client,
                    &name,
                    scope.resource_group.as_deref(),
                    scope.scope.as_deref(),
                )
                .await?,
                format,
            ),
            AssignmentCommand::List {
                disable_scope_strict_match,
                scope,
            } => output::print(
                &policy::list_policy_assignment(
                    client,
                    disable_scope_strict_match,
                    scope.resource_group.as_deref(),
                    scope.scope.as_deref(),
                )
                .await?,
                format,
            ),
        },
        PolicyCommand::Definition { command } => match command {
            DefinitionCommand::Create {
                name,
                rules,
                display_name,
                description,
            } => output::print(
                &policy::create_policy_definition(
                    client,
                    &name,
                    &rules,
                    display_name.as_deref(),
                    description.as_deref(),
                )
                .await?,
                format,
            ),
            DefinitionCommand::Update {
                name,
                rules,
                display_name,
                description,
            } => output::print(
                &policy::update_policy_definition(
                    client,
                    &name,
                    rules.as_deref(),
                    display_name.as_deref(),
                    description.as_deref(),
                )
                .await?,
                format,
            ),
            DefinitionCommand::List => {
                output::print(&policy::list_policy_definitions(client).await?, format)
            }
        },
    }
}

async fn run_lock(client: &ArmClient, command: LockCommand, format: OutputFormat) -> Result<()> {
    match command {
        LockCommand::Create {
            name,
            lock_type,
            notes,
            scope,
        } => output::print(
            &lock::create_lock(client, &name, &scope.into(), &lock_type, notes.as_deref()).await?,
            format,
        ),
        LockCommand::Delete { name, scope } => lock::delete_lock(client, &name, &scope.into()).await,
        LockCommand::Show {
            name,
            resource_group,
        } => output::print(
            &lock::get_lock(client, &name, resource_group.as_deref()).await?,
            format,
        ),
        LockCommand::List { scope, filter } => output::print(
            &lock::list_locks(client, &scope.into(), filter.as_deref()).await?,
            format,
        ),
        LockCommand::Update {
            name,
            resource_group,
            lock_type,
            notes,
        } => output::print(
            &lock::update_lock(
                client,
                &name,
                resource_group.as_deref(),
                lock_type.as_deref(),
                notes.as_deref(),
            )
            .await?,
            format,
        ),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = setup_logging(cli.log_level);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("Command failed: {:#}", err);
            eprintln!("Error: {}", format_arm_error(&err));
            ExitCode::FAILURE
        }
    }
}
