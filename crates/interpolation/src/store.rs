//! Shared observation snapshot.
//!
//! The refresh side builds a complete [`ObservationSnapshot`] off to the side
//! and publishes it with a single pointer swap. Readers clone the current
//! `Arc` once per frame, so a frame never sees a half-updated set.
//!
//! The lock guards only the `Arc` itself and is held for the clone or the
//! swap, never while interpolating.

use chrono::{DateTime, Utc};
use field_common::{
    GeoPoint, RiskLevel, ScalarObservation, VectorObservation, WeatherReport, WindLevel,
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

/// Per-station values the marker layer draws.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub name: String,
    pub position: GeoPoint,
    pub wind_speed: f64,
    pub wind_bearing: f64,
    pub wind_level: WindLevel,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
}

impl Station {
    fn from_report(report: &WeatherReport) -> Self {
        let wind = report.wind_observation();
        Self {
            name: report.name.clone(),
            position: report.position(),
            wind_speed: wind.magnitude,
            wind_bearing: wind.bearing,
            wind_level: report.wind_level(),
            risk_score: report.risk_score(),
            risk_level: report.risk_level(),
        }
    }
}

/// One immutable set of observations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservationSnapshot {
    pub scalars: Vec<ScalarObservation>,
    pub vectors: Vec<VectorObservation>,
    pub stations: Vec<Station>,
    /// When the producer built this snapshot
    pub refreshed_at: DateTime<Utc>,
    /// Publish counter; 0 for the initial empty snapshot
    pub generation: u64,
}

impl ObservationSnapshot {
    /// A snapshot with no observations.
    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new())
    }

    /// Snapshot from raw observations (no station markers).
    pub fn new(scalars: Vec<ScalarObservation>, vectors: Vec<VectorObservation>) -> Self {
        Self {
            scalars,
            vectors,
            stations: Vec::new(),
            refreshed_at: Utc::now(),
            generation: 0,
        }
    }

    /// Derive risk samples, wind samples and stations from weather reports.
    ///
    /// Reports that fail validation are dropped with a warning. Order of the
    /// remaining reports is preserved.
    pub fn from_reports(reports: &[WeatherReport]) -> Self {
        let mut scalars = Vec::with_capacity(reports.len());
        let mut vectors = Vec::with_capacity(reports.len());
        let mut stations = Vec::with_capacity(reports.len());

        for report in reports {
            if let Err(e) = report.validate() {
                warn!(station = %report.name, error = %e, "Dropping invalid weather report");
                continue;
            }
            scalars.push(report.risk_observation());
            vectors.push(report.wind_observation());
            stations.push(Station::from_report(report));
        }

        Self {
            scalars,
            vectors,
            stations,
            refreshed_at: Utc::now(),
            generation: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty() && self.vectors.is_empty()
    }

    /// Highest-risk station, if any.
    pub fn riskiest_station(&self) -> Option<&Station> {
        self.stations.iter().max_by_key(|s| s.risk_score)
    }
}

impl Default for ObservationSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// Holder of the current snapshot, shared between refresh and render.
#[derive(Debug)]
pub struct ObservationStore {
    current: RwLock<Arc<ObservationSnapshot>>,
    generation: AtomicU64,
}

impl Default for ObservationStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObservationStore {
    /// Store holding an empty snapshot.
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(ObservationSnapshot::empty())),
            generation: AtomicU64::new(0),
        }
    }

    /// Current snapshot. Hold the returned `Arc` for a whole frame.
    pub fn snapshot(&self) -> Arc<ObservationSnapshot> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replace the current snapshot, returning its generation number.
    pub fn publish(&self, mut snapshot: ObservationSnapshot) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        snapshot.generation = generation;

        info!(
            generation = generation,
            scalars = snapshot.scalars.len(),
            vectors = snapshot.vectors.len(),
            stations = snapshot.stations.len(),
            "Published observation snapshot"
        );

        let next = Arc::new(snapshot);
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = next;
        generation
    }

    /// Build a snapshot from reports and publish it.
    pub fn replace_reports(&self, reports: &[WeatherReport]) -> u64 {
        self.publish(ObservationSnapshot::from_reports(reports))
    }

    /// Generation of the most recent publish.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}
