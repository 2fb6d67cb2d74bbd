//! Scattered-point interpolation for the flood-risk and wind fields.
//!
//! - [`idw`]: inverse-distance weighting for scalar risk values and a
//!   circular-mean variant for wind vectors
//! - [`store`]: the shared, atomically replaced observation snapshot

pub mod idw;
pub mod store;

pub use idw::{
    interpolate_scalar, interpolate_vector, scalar_idw, vector_idw, IdwParams, WindVector,
    RISK_POWER, WIND_POWER,
};
pub use store::{ObservationSnapshot, ObservationStore, Station};
