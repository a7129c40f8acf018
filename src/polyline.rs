//! Polyline representation for route geometries.
//!
//! Route geometry is held as decoded coordinates. Decoding from the compact
//! encoded-polyline format happens at the boundary (when receiving from
//! OSRM), not within the scoring core.

use serde::{Deserialize, Serialize};

use crate::geo::{self, BoundingBox};
use crate::model::GeoPoint;

/// Coordinate precision OSRM uses for `geometries=polyline`.
pub const OSRM_PRECISION: u32 = 5;

/// A route geometry as an ordered sequence of points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Polyline {
    points: Vec<GeoPoint>,
}

impl Polyline {
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    pub fn into_points(self) -> Vec<GeoPoint> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// True when the geometry has at least two points and all are valid.
    pub fn is_routable(&self) -> bool {
        self.points.len() >= 2 && self.points.iter().all(GeoPoint::is_valid)
    }

    /// Total great-circle length in metres.
    pub fn length_m(&self) -> f64 {
        self.points
            .windows(2)
            .map(|pair| geo::haversine_m(pair[0], pair[1]))
            .sum()
    }

    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.points)
    }

    /// Decode an encoded polyline string.
    ///
    /// The encoding stores latitude before longitude. Returns `None` on
    /// truncated or otherwise malformed input.
    pub fn decode(encoded: &str, precision: u32) -> Option<Self> {
        let factor = 10_f64.powi(precision as i32);
        let mut bytes = encoded.bytes();
        let mut points = Vec::new();
        let (mut lat, mut lon) = (0_i64, 0_i64);

        loop {
            let Some(delta_lat) = next_value(&mut bytes, true)? else {
                break;
            };
            let delta_lon = next_value(&mut bytes, false)??;
            lat += delta_lat;
            lon += delta_lon;
            points.push(GeoPoint::new(lon as f64 / factor, lat as f64 / factor));
        }

        Some(Self { points })
    }
}

impl From<Vec<GeoPoint>> for Polyline {
    fn from(points: Vec<GeoPoint>) -> Self {
        Self::new(points)
    }
}

/// Read one zig-zag varint.
///
/// `Some(None)` means clean end of input (only allowed at the start of a
/// point), `None` means malformed.
fn next_value(bytes: &mut std::str::Bytes<'_>, may_end: bool) -> Option<Option<i64>> {
    let mut result: i64 = 0;
    let mut shift = 0;
    let mut first = true;

    loop {
        let Some(byte) = bytes.next() else {
            return if first && may_end { Some(None) } else { None };
        };
        first = false;
        if !(63..=126).contains(&byte) || shift > 60 {
            return None;
        }
        let chunk = i64::from(byte - 63);
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }

    let value = if result & 1 == 1 { !(result >> 1) } else { result >> 1 };
    Some(Some(value))
}
