//! `render`: draw one frame.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use field_common::EngineConfig;
use tracing::info;

use super::{build_compositor, log_snapshot, render_frame, FrameArgs, LayerArgs};
use crate::source::SourceArgs;

#[derive(Args, Debug)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub layers: LayerArgs,

    #[command(flatten)]
    pub frame: FrameArgs,

    /// Write the frame as PNG
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Write the draw command list as JSON
    #[arg(long, value_name = "FILE")]
    pub commands: Option<PathBuf>,
}

pub fn run(config: &EngineConfig, args: &RenderArgs) -> Result<()> {
    let snapshot = args.source.snapshot()?;
    log_snapshot(&snapshot);
    let compositor = build_compositor(config, &args.layers)?;
    let view = args.frame.view(config)?;

    let report = render_frame(
        &compositor,
        &snapshot,
        &view,
        args.output.as_deref(),
        args.commands.as_deref(),
    )?;

    info!(
        stations = snapshot.stations.len(),
        layers = report.layers.len(),
        elapsed_ms = report.elapsed_ms,
        "Rendered frame"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
