//! Data types shared by the scoring engine and its collaborators.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Diagnostic;
use crate::polyline::Polyline;
use crate::trust::{self, VoteTally};

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub const fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Finite and within the WGS84 coordinate range.
    pub fn is_valid(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat)
    }
}

/// Kind of reported incident.
///
/// Unrecognised type strings deserialize to [`IncidentType::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidentType {
    Accident,
    Traffic,
    Closure,
    Police,
    Hazard,
    #[serde(other)]
    Unknown,
}

/// Fields supplied when a user reports an incident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewIncident {
    #[serde(rename = "type")]
    pub kind: IncidentType,
    pub location: GeoPoint,
}

/// A user-reported incident together with its crowd-validated trust.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: IncidentType,
    pub location: GeoPoint,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub votes: VoteTally,
    pub reliability_score: f64,
    pub active: bool,
}

impl Incident {
    /// A freshly reported incident: no votes, fully trusted, active.
    pub fn new(
        id: impl Into<String>,
        kind: IncidentType,
        location: GeoPoint,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            location,
            created_at,
            votes: VoteTally::default(),
            reliability_score: 1.0,
            active: true,
        }
    }

    pub fn with_votes(mut self, tally: VoteTally) -> Self {
        self.apply_tally(tally);
        self
    }

    /// Replace the vote tally and recompute trust.
    ///
    /// An incident that has been deactivated stays inactive.
    pub fn apply_tally(&mut self, tally: VoteTally) {
        let trust = trust::assess(tally);
        self.votes = tally;
        self.reliability_score = trust.reliability_score;
        self.active = self.active && trust.active;
    }
}

/// One alternative returned by the route provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteCandidate {
    /// Position among the provider's alternatives.
    pub index: usize,
    pub geometry: Polyline,
    pub distance_meters: f64,
    pub duration_seconds: f64,
}

impl RouteCandidate {
    pub fn new(
        index: usize,
        geometry: impl Into<Polyline>,
        distance_meters: f64,
        duration_seconds: f64,
    ) -> Self {
        Self {
            index,
            geometry: geometry.into(),
            distance_meters,
            duration_seconds,
        }
    }
}

/// Per-route diagnostics produced by the scorer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteScore {
    /// The candidate's provider index.
    pub route_index: usize,
    /// Incident-avoidance score in `[20, 100]`, higher is better.
    pub score: f64,
    /// Time-of-day congestion score in `[30, 100]`.
    pub traffic_score: f64,
    /// Weighted blend used for ranking.
    pub combined: f64,
    /// Uncapped sum of severity weights of matched incidents.
    pub penalty: u32,
    pub matched_incidents: Vec<Incident>,
}

/// Output of one scoring call.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScoringResult {
    /// One entry per input route, in input order.
    pub per_route: Vec<RouteScore>,
    /// Position of the winning route in `per_route`; `None` when no routes were given.
    pub best_route_index: Option<usize>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ScoringResult {
    pub fn best_route(&self) -> Option<&RouteScore> {
        self.best_route_index.and_then(|index| self.per_route.get(index))
    }
}
