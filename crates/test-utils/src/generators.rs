//! Seeded generators for synthetic observations.
//!
//! Every generator takes a seed so a failing test or a benchmark run can be
//! reproduced exactly.

use field_common::{BoundingBox, GeoPoint, ScalarObservation, VectorObservation};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniformly scattered risk samples in `[0, 100]` inside `bbox`.
pub fn scattered_risks(bbox: &BoundingBox, count: usize, seed: u64) -> Vec<ScalarObservation> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| ScalarObservation::risk(random_point(&mut rng, bbox), rng.gen_range(0.0..=100.0)))
        .collect()
}

/// Uniformly scattered wind samples with speeds in `[0, max_speed)`.
pub fn scattered_winds(
    bbox: &BoundingBox,
    count: usize,
    max_speed: f64,
    seed: u64,
) -> Vec<VectorObservation> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let position = random_point(&mut rng, bbox);
            VectorObservation::new(
                position,
                rng.gen_range(0.0..max_speed),
                rng.gen_range(0.0..360.0),
            )
        })
        .collect()
}

fn random_point(rng: &mut StdRng, bbox: &BoundingBox) -> GeoPoint {
    GeoPoint::new(
        rng.gen_range(bbox.lat_min..bbox.lat_max),
        rng.gen_range(bbox.lon_min..bbox.lon_max),
    )
}
