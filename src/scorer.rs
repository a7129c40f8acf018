//! Route scoring and ranking.
//!
//! Each route gets an incident-avoidance score from the severity of the
//! incidents in its corridor and a time-of-day traffic score. The two are
//! blended into one ranking value and the best route is the highest, ties
//! going to the earliest alternative.

use chrono::{DateTime, FixedOffset, Utc};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::corridor::{CorridorMatcher, DEFAULT_HALF_WIDTH_M};
use crate::error::Diagnostic;
use crate::geo::BoundingBox;
use crate::model::{GeoPoint, Incident, RouteCandidate, RouteScore, ScoringResult};
use crate::severity;
use crate::traffic::{TrafficConfig, TrafficPredictor};
use crate::traits::{IncidentStore, RouteProvider};

/// Score of a route with no matched incidents.
pub const MAX_SCORE: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreOptions {
    /// Half-width of the corridor around each route, in metres.
    pub corridor_half_width_m: f64,
    /// Weight of the incident score in the combined ranking value.
    pub incident_weight: f64,
    /// Weight of the traffic score in the combined ranking value.
    pub traffic_weight: f64,
    /// Cap on the cumulative severity penalty.
    pub max_penalty: u32,
    /// Floor on the incident score.
    pub min_score: f64,
    /// Ignore incidents older than this many seconds.
    pub max_incident_age_secs: Option<i64>,
    pub traffic: TrafficConfig,
}

impl Default for ScoreOptions {
    fn default() -> Self {
        Self {
            corridor_half_width_m: DEFAULT_HALF_WIDTH_M,
            incident_weight: 0.7,
            traffic_weight: 0.3,
            max_penalty: 80,
            min_score: 20.0,
            max_incident_age_secs: None,
            traffic: TrafficConfig::default(),
        }
    }
}

impl ScoreOptions {
    /// Incident score for an uncapped severity penalty.
    pub fn incident_score(&self, penalty: u32) -> f64 {
        let capped = penalty.min(self.max_penalty);
        (MAX_SCORE - f64::from(capped)).max(self.min_score)
    }

    pub fn combine(&self, incident_score: f64, traffic_score: f64) -> f64 {
        incident_score * self.incident_weight + traffic_score * self.traffic_weight
    }
}

/// Score and rank route alternatives against the given incidents.
///
/// Returns one [`RouteScore`] per route in input order. Data-quality
/// problems are reported in [`ScoringResult::diagnostics`]; this never fails.
pub fn score_routes(
    routes: &[RouteCandidate],
    incidents: &[Incident],
    now: &DateTime<FixedOffset>,
    options: &ScoreOptions,
) -> ScoringResult {
    let mut diagnostics = Vec::new();

    if routes.is_empty() {
        debug!("no routes to score");
        diagnostics.push(Diagnostic::EmptyRouteSet);
        return ScoringResult {
            per_route: Vec::new(),
            best_route_index: None,
            diagnostics,
        };
    }

    let predictor = TrafficPredictor::new(options.traffic.clone());
    let now_utc = now.with_timezone(&Utc);
    let usable = usable_incidents(incidents, now_utc, options, &mut diagnostics);

    let mut any_routable = false;
    for (position, route) in routes.iter().enumerate() {
        if route.geometry.is_routable() {
            any_routable = true;
        } else {
            warn!(
                route = position,
                points = route.geometry.len(),
                "unusable route geometry, scoring on traffic only"
            );
            diagnostics.push(Diagnostic::MalformedRoute {
                index: position,
                points: route.geometry.len(),
            });
        }
    }
    if !any_routable {
        warn!(routes = routes.len(), "no route has usable geometry, ranking by duration");
        diagnostics.push(Diagnostic::NoValidGeometry);
    }

    if usable.is_empty() || !any_routable {
        let per_route = routes
            .iter()
            .map(|route| unpenalized(route, &predictor, now, options))
            .collect();
        let best_route_index = fastest_route(routes);
        debug!(best = ?best_route_index, "no usable incidents, picked fastest route");
        return ScoringResult {
            per_route,
            best_route_index,
            diagnostics,
        };
    }

    let matcher = CorridorMatcher::new(options.corridor_half_width_m);
    let per_route: Vec<RouteScore> = routes
        .par_iter()
        .map(|route| score_route(route, &usable, &matcher, &predictor, now, options))
        .collect();

    let best_route_index = highest_combined(&per_route);
    debug!(best = ?best_route_index, "ranked routes");

    ScoringResult {
        per_route,
        best_route_index,
        diagnostics,
    }
}

/// Fetch alternatives from `provider`, look up incidents around them in
/// `store`, and score them.
pub fn rank_routes_between<P, S>(
    provider: &P,
    store: &S,
    origin: GeoPoint,
    destination: GeoPoint,
    now: &DateTime<FixedOffset>,
    options: &ScoreOptions,
) -> ScoringResult
where
    P: RouteProvider,
    S: IncidentStore,
{
    let routes = provider.routes_between(origin, destination);

    let window = routes
        .iter()
        .filter(|route| route.geometry.is_routable())
        .filter_map(|route| route.geometry.bounds())
        .reduce(|acc, bounds| acc.union(&bounds))
        .map(|bounds: BoundingBox| bounds.expand_m(options.corridor_half_width_m));

    let incidents = match window {
        Some(window) => store.active_within(&window),
        None => Vec::new(),
    };

    let result = score_routes(&routes, &incidents, now, options);
    if let Some(best) = result.best_route() {
        info!(
            alternatives = routes.len(),
            incidents = incidents.len(),
            best = best.route_index,
            score = best.score,
            "selected route"
        );
    }
    result
}

/// Active, well-formed and (if configured) fresh incidents.
fn usable_incidents<'a>(
    incidents: &'a [Incident],
    now: DateTime<Utc>,
    options: &ScoreOptions,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<&'a Incident> {
    let mut usable = Vec::with_capacity(incidents.len());
    for incident in incidents {
        if !incident.active {
            continue;
        }
        if !incident.location.is_valid() {
            warn!(incident = %incident.id, "skipping incident with malformed location");
            diagnostics.push(Diagnostic::MalformedIncident {
                id: incident.id.clone(),
            });
            continue;
        }
        if let Some(max_age) = options.max_incident_age_secs {
            if (now - incident.created_at).num_seconds() > max_age {
                continue;
            }
        }
        usable.push(incident);
    }
    usable
}

fn score_route(
    route: &RouteCandidate,
    incidents: &[&Incident],
    matcher: &CorridorMatcher,
    predictor: &TrafficPredictor,
    now: &DateTime<FixedOffset>,
    options: &ScoreOptions,
) -> RouteScore {
    let matched = matcher.match_incidents(&route.geometry, incidents.iter().copied());
    let penalty = severity::total_penalty(matched.iter().copied());
    let score = options.incident_score(penalty);
    let traffic_score = predictor.predict(now, route.distance_meters);
    let combined = options.combine(score, traffic_score);

    debug!(
        route = route.index,
        matched = matched.len(),
        penalty,
        score,
        traffic_score,
        combined,
        "scored route"
    );

    RouteScore {
        route_index: route.index,
        score,
        traffic_score,
        combined,
        penalty,
        matched_incidents: matched.into_iter().cloned().collect(),
    }
}

fn unpenalized(
    route: &RouteCandidate,
    predictor: &TrafficPredictor,
    now: &DateTime<FixedOffset>,
    options: &ScoreOptions,
) -> RouteScore {
    let traffic_score = predictor.predict(now, route.distance_meters);
    RouteScore {
        route_index: route.index,
        score: MAX_SCORE,
        traffic_score,
        combined: options.combine(MAX_SCORE, traffic_score),
        penalty: 0,
        matched_incidents: Vec::new(),
    }
}

/// Position of the shortest finite duration, first occurrence on ties.
fn fastest_route(routes: &[RouteCandidate]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (position, route) in routes.iter().enumerate() {
        let duration = route.duration_seconds;
        if !duration.is_finite() {
            continue;
        }
        if best.is_none_or(|(_, best_duration)| duration < best_duration) {
            best = Some((position, duration));
        }
    }
    match best {
        Some((position, _)) => Some(position),
        None if routes.is_empty() => None,
        None => Some(0),
    }
}

/// Position of the highest combined value, first occurrence on ties.
fn highest_combined(scores: &[RouteScore]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (position, route) in scores.iter().enumerate() {
        if best.is_none_or(|(_, best_combined)| route.combined > best_combined) {
            best = Some((position, route.combined));
        }
    }
    best.map(|(position, _)| position)
}
