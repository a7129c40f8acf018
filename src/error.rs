//! Error and diagnostic types.
//!
//! Contract violations (bad vote tallies, unknown incidents, unreadable
//! config) are errors. Data-quality problems found while scoring are
//! [`Diagnostic`]s: they are recorded on the result and scoring carries on.

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid vote tally: up={up}, down={down}")]
    InvalidVoteTally { up: i64, down: i64 },
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("incident not found: {0}")]
    UnknownIncident(String),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("traffic score bounds inverted: min_score={min} > max_score={max}")]
    InvertedTrafficBounds { min: f64, max: f64 },
}

/// Recoverable problems observed during one scoring call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Route geometry has fewer than two usable points; scored on traffic only.
    MalformedRoute { index: usize, points: usize },
    /// Incident coordinate is non-finite or out of range; never matched.
    MalformedIncident { id: String },
    /// No route carried usable geometry; ranked by duration instead.
    NoValidGeometry,
    /// No routes were supplied.
    EmptyRouteSet,
}
