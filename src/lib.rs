//! incident-router scoring core
//!
//! Ranks route alternatives by how well they avoid crowd-reported traffic
//! incidents, blended with a time-of-day traffic estimate.

pub mod config;
pub mod corridor;
pub mod error;
pub mod geo;
pub mod model;
pub mod osrm;
pub mod polyline;
pub mod scorer;
pub mod severity;
pub mod store;
pub mod traffic;
pub mod traits;
pub mod trust;

pub use error::{Diagnostic, EngineError};
pub use model::{GeoPoint, Incident, IncidentType, RouteCandidate, RouteScore, ScoringResult};
pub use scorer::{ScoreOptions, score_routes};
