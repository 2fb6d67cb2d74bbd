//! `watch`: periodic refresh plus a render loop.
//!
//! A background task reloads reports and publishes a fresh snapshot on every
//! refresh tick. The render loop grabs whatever snapshot is current on each
//! frame tick, so a frame is always drawn from one complete set.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use field_common::EngineConfig;
use interpolation::ObservationStore;
use tokio::time::interval;
use tracing::{error, info};

use super::{build_compositor, frame_path, log_snapshot, render_frame, FrameArgs, LayerArgs};
use crate::source::SourceArgs;

#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub layers: LayerArgs,

    #[command(flatten)]
    pub frame: FrameArgs,

    /// Seconds between observation refreshes
    #[arg(long, default_value_t = 300)]
    pub refresh_secs: u64,

    /// Seconds between rendered frames
    #[arg(long, default_value_t = 5)]
    pub frame_secs: u64,

    /// Stop after this many frames
    #[arg(long)]
    pub frames: Option<u64>,

    /// Directory for numbered PNG frames; frames are only summarized when omitted
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

pub async fn run(config: EngineConfig, args: WatchArgs) -> Result<()> {
    let store = Arc::new(ObservationStore::new());
    let initial = args.source.load_blocking().await.context("Initial observation load failed")?;
    store.replace_reports(&initial);
    log_snapshot(&store.snapshot());

    if let Some(dir) = &args.output_dir {
        std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    }

    let compositor = build_compositor(&config, &args.layers)?;
    let view = args.frame.view(&config)?;

    let refresh = tokio::spawn(refresh_loop(
        Arc::clone(&store),
        args.source.clone(),
        Duration::from_secs(args.refresh_secs.max(1)),
    ));

    info!(
        refresh_secs = args.refresh_secs,
        frame_secs = args.frame_secs,
        "Starting watch loop"
    );

    let mut ticker = interval(Duration::from_secs(args.frame_secs.max(1)));
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut rendered: u64 = 0;
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let snapshot = store.snapshot();
                let png_path = args.output_dir.as_ref().map(|dir| frame_path(dir, rendered));
                let report = render_frame(&compositor, &snapshot, &view, png_path.as_deref(), None)?;
                info!(
                    frame = rendered,
                    generation = report.generation,
                    elapsed_ms = report.elapsed_ms,
                    "Frame rendered"
                );

                rendered += 1;
                if args.frames.map_or(false, |limit| rendered >= limit) {
                    break;
                }
            }
            _ = &mut shutdown => {
                info!("Interrupted; stopping watch loop");
                break;
            }
        }
    }

    refresh.abort();
    info!(frames = rendered, "Watch loop finished");
    Ok(())
}

async fn refresh_loop(store: Arc<ObservationStore>, source: SourceArgs, period: Duration) {
    let mut ticker = interval(period);
    // The first tick fires immediately; the initial load already happened.
    ticker.tick().await;

    loop {
        ticker.tick().await;
        match source.load_blocking().await {
            Ok(reports) => {
                store.replace_reports(&reports);
                log_snapshot(&store.snapshot());
            }
            Err(e) => {
                error!(error = %e, "Observation refresh failed; keeping previous snapshot");
            }
        }
    }
}
