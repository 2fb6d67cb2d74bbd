//! `sample`: interpolated values at a single point.

use anyhow::{bail, Result};
use clap::Args;
use field_common::{EngineConfig, GeoPoint, RiskLevel, WindLevel};
use interpolation::{scalar_idw, vector_idw, IdwParams};
use serde_json::json;

use crate::source::SourceArgs;

#[derive(Args, Debug)]
pub struct SampleArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lat: f64,

    /// Longitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub lon: f64,
}

pub fn run(config: &EngineConfig, args: &SampleArgs) -> Result<()> {
    let point = GeoPoint::new(args.lat, args.lon);
    if !point.is_valid() {
        bail!("Point ({}, {}) is outside valid coordinate ranges", args.lat, args.lon);
    }

    let snapshot = args.source.snapshot()?;
    let threshold = config.exact_match_threshold_deg;

    let risk = scalar_idw(&snapshot.scalars, point, &IdwParams::new(config.heat.power, threshold));
    let wind = vector_idw(&snapshot.vectors, point, &IdwParams::new(config.wind.power, threshold));

    let output = json!({
        "lat": point.lat,
        "lon": point.lon,
        "risk": risk,
        "risk_level": RiskLevel::from_score(risk),
        "wind": wind,
        "wind_level": WindLevel::from_speed(wind.magnitude),
        "stations": snapshot.stations.len(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
