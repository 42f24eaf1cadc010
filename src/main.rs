use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use lynx_provider::config::LynxConfig;
use lynx_provider::resource::{registry, Diagnostics, LynxProvider, Resource};
use lynx_provider::VERSION;
use serde_json::Value;
use std::io::Read;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Manage Lynx users, teams, projects, environments and snapshots
#[derive(Parser, Debug)]
#[command(name = "lynx", version = VERSION, about, long_about = None)]
struct Args {
    /// Lynx API URL
    #[arg(long, env = "LYNX_API_URL", global = true)]
    api_url: Option<String>,

    /// Lynx API key
    #[arg(long, env = "LYNX_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    /// Output format for state documents
    #[arg(long, value_enum, default_value = "json", global = true)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List resource type names
    Resources,
    /// Print the schema of a resource type, or of the provider itself
    Schema {
        /// Resource type, e.g. lynx_team (omit for the provider schema)
        resource: Option<String>,
    },
    /// Create a resource from a desired-state document
    Create(StateArgs),
    /// Refresh a state document from the API
    Read(StateArgs),
    /// Apply a desired-state document to an existing resource
    Update(StateArgs),
    /// Delete the resource a state document identifies
    Delete(StateArgs),
    /// Import an existing resource by identifier and read it
    Import {
        /// Resource type, e.g. lynx_team
        resource: String,
        /// Identifier (environments accept <project_id>/<environment_id>)
        id: String,
    },
}

#[derive(clap::Args, Debug)]
struct StateArgs {
    /// Resource type, e.g. lynx_team
    resource: String,

    /// JSON or YAML state document ("-" for stdin)
    #[arg(short, long, default_value = "-")]
    state: PathBuf,
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

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {:?}", parent))?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

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

    tracing::info!("lynx {} started with log level: {:?}", VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("lynx").join("lynx.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".lynx").join("lynx.log");
    }
    PathBuf::from("lynx.log")
}

fn read_document(path: &PathBuf) -> Result<Value> {
    let content = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read state document from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read state document {:?}", path))?
    };

    // YAML is a superset of JSON, so one parser covers both
    serde_yaml::from_str(&content).context("Failed to parse state document")
}

fn print_value(value: &Value, output: OutputFormat) -> Result<()> {
    let rendered = match output {
        OutputFormat::Json => serde_json::to_string_pretty(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

/// Print diagnostics to stderr and fail if any of them is an error
fn check(diags: &Diagnostics) -> Result<()> {
    for diag in diags.iter() {
        eprintln!("{}", diag);
    }
    if diags.has_error() {
        anyhow::bail!("operation failed with {} diagnostic(s)", diags.len());
    }
    Ok(())
}

fn lookup(provider: &LynxProvider, args: &Args, resource: &str) -> Result<Box<dyn Resource>> {
    let mut diags = Diagnostics::new();
    let explicit = LynxConfig {
        api_url: args.api_url.clone(),
        api_key: args.api_key.clone(),
        timeout_secs: None,
    };
    let client = provider.configure_with(LynxConfig::effective(explicit), &mut diags);
    check(&diags)?;
    let client = client.context("Lynx client was not configured")?;

    let adapter = provider.resource(&client, resource).with_context(|| {
        format!(
            "Unknown resource type '{}'. Available: {}",
            resource,
            provider.resource_type_names().join(", ")
        )
    })?;
    Ok(adapter)
}

async fn run(args: Args) -> Result<()> {
    let provider = LynxProvider::new(VERSION);

    match &args.command {
        Command::Resources => {
            for name in provider.resource_type_names() {
                println!("{}", name);
            }
        }
        Command::Schema { resource } => {
            let schema = match resource {
                None => provider.schema(),
                Some(name) => provider
                    .resource_schemas()
                    .remove(&registry::type_name(name))
                    .with_context(|| format!("Unknown resource type '{}'", name))?,
            };
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        Command::Create(state) => {
            let doc = read_document(&state.state)?;
            let adapter = lookup(&provider, &args, &state.resource)?;
            let mut diags = Diagnostics::new();
            let result = adapter.create(doc, &mut diags).await;
            check(&diags)?;
            if let Some(result) = result {
                print_value(&result, args.output)?;
            }
        }
        Command::Read(state) => {
            let doc = read_document(&state.state)?;
            let adapter = lookup(&provider, &args, &state.resource)?;
            let mut diags = Diagnostics::new();
            let result = adapter.read(doc, &mut diags).await;
            check(&diags)?;
            if let Some(result) = result {
                print_value(&result, args.output)?;
            }
        }
        Command::Update(state) => {
            let doc = read_document(&state.state)?;
            let adapter = lookup(&provider, &args, &state.resource)?;
            let mut diags = Diagnostics::new();
            let result = adapter.update(doc, &mut diags).await;
            check(&diags)?;
            if let Some(result) = result {
                print_value(&result, args.output)?;
            }
        }
        Command::Delete(state) => {
            let doc = read_document(&state.state)?;
            let adapter = lookup(&provider, &args, &state.resource)?;
            let mut diags = Diagnostics::new();
            adapter.delete(doc, &mut diags).await;
            check(&diags)?;
        }
        Command::Import { resource, id } => {
            let adapter = lookup(&provider, &args, resource)?;
            let mut diags = Diagnostics::new();
            let seed = adapter.import_state(id, &mut diags);
            check(&diags)?;
            if let Some(seed) = seed {
                let result = adapter.read(seed, &mut diags).await;
                check(&diags)?;
                if let Some(result) = result {
                    print_value(&result, args.output)?;
                }
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    run(args).await
}
