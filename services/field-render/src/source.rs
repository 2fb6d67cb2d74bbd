//! Where weather reports come from.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use field_common::WeatherReport;
use interpolation::ObservationSnapshot;
use tracing::debug;

/// Built-in demo reports for 12 Malaysian cities.
const MALAYSIA_DEMO_JSON: &str = include_str!("../../../data/malaysia_demo.json");

#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Use the built-in Malaysian demo reports
    #[arg(long)]
    pub demo: bool,

    /// JSON file holding an array of weather reports
    #[arg(long, value_name = "FILE")]
    pub observations: Option<PathBuf>,
}

impl SourceArgs {
    /// Read every report from the source. Validation happens when the
    /// reports become a snapshot.
    pub fn load(&self) -> Result<Vec<WeatherReport>> {
        let reports = match &self.observations {
            Some(path) => WeatherReport::list_from_file(path)
                .with_context(|| format!("Failed to read observations from {}", path.display()))?,
            None => WeatherReport::list_from_json(MALAYSIA_DEMO_JSON).context("Built-in demo data is invalid")?,
        };
        debug!(reports = reports.len(), "Loaded weather reports");
        Ok(reports)
    }

    /// Load reports and turn the valid ones into a snapshot.
    pub fn snapshot(&self) -> Result<ObservationSnapshot> {
        Ok(ObservationSnapshot::from_reports(&self.load()?))
    }

    /// `load` on the blocking pool, for use inside the runtime.
    pub async fn load_blocking(&self) -> Result<Vec<WeatherReport>> {
        let source = self.clone();
        tokio::task::spawn_blocking(move || source.load())
            .await
            .context("Observation load task failed")?
    }
}
