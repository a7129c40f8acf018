//! Corridor matching: which incidents lie close enough to a route to matter.
//!
//! The corridor is every point within `half_width_m` of the route polyline.
//! Membership is tested as point-to-polyline distance rather than by
//! building a buffered polygon, with a bounding-box prefilter.
//!
//! Recording diagnostics for malformed incidents is the caller's job; the
//! matcher only logs and skips them.

use tracing::warn;

use crate::geo;
use crate::model::{GeoPoint, Incident};
use crate::polyline::Polyline;

/// Default corridor half-width in metres.
pub const DEFAULT_HALF_WIDTH_M: f64 = 500.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorridorMatcher {
    pub half_width_m: f64,
}

impl Default for CorridorMatcher {
    fn default() -> Self {
        Self {
            half_width_m: DEFAULT_HALF_WIDTH_M,
        }
    }
}

impl CorridorMatcher {
    pub fn new(half_width_m: f64) -> Self {
        Self { half_width_m }
    }

    /// Whether `point` lies within the corridor around `route`.
    ///
    /// Unroutable geometry has no corridor.
    pub fn contains(&self, route: &Polyline, point: GeoPoint) -> bool {
        if !route.is_routable() || !point.is_valid() {
            return false;
        }
        geo::distance_to_polyline_m(point, route.points()) <= self.half_width_m
    }

    /// Match active incidents against the corridor of `route`.
    ///
    /// Inactive incidents are never matched. Incidents with malformed
    /// coordinates are skipped without affecting the rest.
    pub fn match_incidents<'a, I>(&self, route: &Polyline, incidents: I) -> Vec<&'a Incident>
    where
        I: IntoIterator<Item = &'a Incident>,
    {
        let mut matched = Vec::new();
        if !route.is_routable() {
            return matched;
        }
        let Some(window) = route.bounds().map(|b| b.expand_m(self.half_width_m)) else {
            return matched;
        };

        for incident in incidents {
            if !incident.active {
                continue;
            }
            if !incident.location.is_valid() {
                warn!(incident = %incident.id, "skipping incident with malformed location");
                continue;
            }
            if !window.contains(incident.location) {
                continue;
            }
            if geo::distance_to_polyline_m(incident.location, route.points()) <= self.half_width_m {
                matched.push(incident);
            }
        }

        matched
    }
}
