//! Builders for routes, incidents and clocks.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};

use incident_router::geo::METERS_PER_DEGREE;
use incident_router::polyline::Polyline;
use incident_router::trust::VoteTally;
use incident_router::{GeoPoint, Incident, IncidentType, RouteCandidate};

/// Pacific standard time, as a Las Vegas deployment would inject it.
pub fn pacific() -> FixedOffset {
    FixedOffset::west_opt(8 * 3600).unwrap()
}

/// Tuesday 2024-03-05 at `hour`:00 local.
pub fn weekday_at(hour: u32) -> DateTime<FixedOffset> {
    pacific().with_ymd_and_hms(2024, 3, 5, hour, 0, 0).unwrap()
}

/// Saturday 2024-03-09 at `hour`:00 local.
pub fn saturday_at(hour: u32) -> DateTime<FixedOffset> {
    pacific().with_ymd_and_hms(2024, 3, 9, hour, 0, 0).unwrap()
}

pub fn reported_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 5, 18, 0, 0).unwrap()
}

pub fn offset_north(point: GeoPoint, meters: f64) -> GeoPoint {
    GeoPoint::new(point.lon, point.lat + meters / METERS_PER_DEGREE)
}

/// Builder for test routes with sensible defaults.
#[derive(Clone, Debug)]
pub struct TestRoute {
    index: usize,
    points: Vec<GeoPoint>,
    distance_m: Option<f64>,
    duration_s: f64,
}

impl TestRoute {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            points: Vec::new(),
            distance_m: None,
            duration_s: 600.0,
        }
    }

    /// Straight east-west route of ~9 km along `lat`.
    pub fn east_west(index: usize, lat: f64) -> Self {
        Self::new(index).through(vec![GeoPoint::new(-115.20, lat), GeoPoint::new(-115.10, lat)])
    }

    pub fn through(mut self, points: Vec<GeoPoint>) -> Self {
        self.points = points;
        self
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration_s = seconds;
        self
    }

    pub fn distance(mut self, meters: f64) -> Self {
        self.distance_m = Some(meters);
        self
    }

    /// Defaults the distance to the geometry length.
    pub fn build(self) -> RouteCandidate {
        let geometry = Polyline::new(self.points);
        let distance = self.distance_m.unwrap_or_else(|| geometry.length_m());
        RouteCandidate::new(self.index, geometry, distance, self.duration_s)
    }
}

pub fn incident(id: &str, kind: IncidentType, location: GeoPoint) -> Incident {
    Incident::new(id, kind, location, reported_at())
}

pub fn disputed(id: &str, kind: IncidentType, location: GeoPoint, up: u32, down: u32) -> Incident {
    incident(id, kind, location).with_votes(VoteTally { up, down })
}
