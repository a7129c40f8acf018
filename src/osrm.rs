//! OSRM HTTP adapter for route alternatives.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::model::{GeoPoint, RouteCandidate};
use crate::polyline::{OSRM_PRECISION, Polyline};
use crate::traits::RouteProvider;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
    /// Ask OSRM for alternative routes as well as the fastest one.
    pub alternatives: bool,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
            alternatives: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn route_url(&self, origin: GeoPoint, destination: GeoPoint) -> String {
        format!(
            "{}/route/v1/{}/{:.6},{:.6};{:.6},{:.6}\
             ?alternatives={}&overview=full&geometries=polyline",
            self.config.base_url,
            self.config.profile,
            origin.lon,
            origin.lat,
            destination.lon,
            destination.lat,
            self.config.alternatives,
        )
    }
}

impl RouteProvider for OsrmClient {
    fn routes_between(&self, origin: GeoPoint, destination: GeoPoint) -> Vec<RouteCandidate> {
        let url = self.route_url(origin, destination);

        let response = self
            .client
            .get(url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmRouteResponse>());

        match response {
            Ok(body) => candidates_from(body),
            Err(err) => {
                warn!(error = %err, "OSRM route request failed");
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct OsrmRouteResponse {
    code: String,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: String,
    distance: f64,
    duration: f64,
}

/// Convert an OSRM response into candidates indexed in response order.
///
/// An alternative whose geometry cannot be decoded keeps its slot with an
/// empty polyline, so the scorer reports it and ranks it on traffic only.
fn candidates_from(body: OsrmRouteResponse) -> Vec<RouteCandidate> {
    if body.code != "Ok" {
        warn!(code = %body.code, "OSRM returned no route");
        return Vec::new();
    }

    body.routes
        .into_iter()
        .enumerate()
        .map(|(index, route)| {
            let geometry = Polyline::decode(&route.geometry, OSRM_PRECISION).unwrap_or_else(|| {
                warn!(alternative = index, "undecodable OSRM geometry");
                Polyline::default()
            });
            RouteCandidate::new(index, geometry, route.distance, route.duration)
        })
        .collect()
}
