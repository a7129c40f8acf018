//! Collaborator seams.
//!
//! The scoring core consumes route alternatives and incidents; where they
//! come from is up to the application. These traits are intentionally
//! minimal so a service can back them with its own HTTP clients and
//! database.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::geo::BoundingBox;
use crate::model::{GeoPoint, Incident, NewIncident, RouteCandidate};

/// Returns candidate routes between two points.
///
/// Alternatives are returned in provider order with `index` set to their
/// position. An unreachable provider yields an empty list.
pub trait RouteProvider {
    fn routes_between(&self, origin: GeoPoint, destination: GeoPoint) -> Vec<RouteCandidate>;
}

/// Persistence for incidents and their votes.
pub trait IncidentStore {
    fn report(&self, incident: NewIncident, now: DateTime<Utc>) -> Incident;

    /// Record (or replace) `voter`'s vote and return the updated incident.
    fn record_vote(
        &self,
        incident_id: &str,
        voter: &str,
        vote: VoteDirection,
    ) -> Result<Incident, StoreError>;

    /// Active incidents located inside `window`.
    fn active_within(&self, window: &BoundingBox) -> Vec<Incident>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    /// The incident is still there.
    Confirm,
    /// The incident is gone or never existed.
    Dispute,
}
