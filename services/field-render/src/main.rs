//! Flood-risk and wind field renderer.
//!
//! Loads city weather reports (a JSON file or the built-in Malaysian demo
//! set), interpolates risk and wind over the configured grids and renders
//! the overlay stack to PNG or to a JSON draw-command list.

mod commands;
mod source;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use field_common::EngineConfig;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use commands::{render::RenderArgs, sample::SampleArgs, watch::WatchArgs};

#[derive(Parser, Debug)]
#[command(name = "field-render")]
#[command(about = "Render flood-risk and wind field overlays")]
struct Args {
    /// Engine configuration file (YAML); built-in defaults when omitted
    #[arg(short, long, env = "FLOOD_FIELD_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log level; RUST_LOG takes precedence when set
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame
    Render(RenderArgs),
    /// Print interpolated risk and wind at one point
    Sample(SampleArgs),
    /// Keep refreshing observations and rendering frames
    Watch(WatchArgs),
}

/// `RUST_LOG` directives win over `--log-level`.
fn log_filter(rust_log: Option<&str>, level: &str) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level))
}

fn init_tracing(filter: EnvFilter, json: bool) -> Result<()> {
    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<EngineConfig> {
    match path {
        Some(path) => {
            let config = EngineConfig::from_file(path)
                .with_context(|| format!("Failed to load config from {}", path.display()))?;
            info!(path = %path.display(), "Loaded engine configuration");
            Ok(config)
        }
        None => Ok(EngineConfig::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let rust_log = std::env::var("RUST_LOG").ok();
    init_tracing(log_filter(rust_log.as_deref(), &args.log_level), args.json_logs)?;

    let config = load_config(args.config.as_ref())?;

    match args.command {
        Command::Render(cmd) => commands::render::run(&config, &cmd),
        Command::Sample(cmd) => commands::sample::run(&config, &cmd),
        Command::Watch(cmd) => commands::watch::run(config, cmd).await,
    }
}
