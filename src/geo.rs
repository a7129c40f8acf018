//! Distance helpers for corridor matching.
//!
//! Great-circle distance is used for route lengths. Point-to-segment
//! distance treats the earth as locally flat around the query point, which
//! is accurate to well under a metre at corridor widths of a few hundred
//! metres.

use serde::{Deserialize, Serialize};

use crate::model::GeoPoint;

/// Earth radius in metres.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Metres spanned by one degree of latitude.
pub const METERS_PER_DEGREE: f64 = EARTH_RADIUS_M * std::f64::consts::PI / 180.0;

/// Haversine distance between two points in metres.
pub fn haversine_m(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1_rad = from.lat.to_radians();
    let lat2_rad = to.lat.to_radians();
    let delta_lat = (to.lat - from.lat).to_radians();
    let delta_lng = (to.lon - from.lon).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Project `point` onto a plane tangent at `origin`, in metres (x east, y north).
fn project(origin: GeoPoint, point: GeoPoint) -> (f64, f64) {
    let mut delta_lon = point.lon - origin.lon;
    if delta_lon > 180.0 {
        delta_lon -= 360.0;
    } else if delta_lon < -180.0 {
        delta_lon += 360.0;
    }
    let x = delta_lon * METERS_PER_DEGREE * origin.lat.to_radians().cos();
    let y = (point.lat - origin.lat) * METERS_PER_DEGREE;
    (x, y)
}

/// Distance in metres from `point` to the segment `a`-`b`.
pub fn distance_to_segment_m(point: GeoPoint, a: GeoPoint, b: GeoPoint) -> f64 {
    let (ax, ay) = project(point, a);
    let (bx, by) = project(point, b);
    let (dx, dy) = (bx - ax, by - ay);
    let len_sq = dx * dx + dy * dy;

    if len_sq == 0.0 {
        return ax.hypot(ay);
    }

    // The query point is the origin of the projection.
    let t = (-(ax * dx + ay * dy) / len_sq).clamp(0.0, 1.0);
    (ax + t * dx).hypot(ay + t * dy)
}

/// Minimum distance in metres from `point` to any segment of `path`.
///
/// Returns `f64::INFINITY` for an empty path.
pub fn distance_to_polyline_m(point: GeoPoint, path: &[GeoPoint]) -> f64 {
    match path {
        [] => f64::INFINITY,
        [only] => haversine_m(point, *only),
        _ => path
            .windows(2)
            .map(|pair| distance_to_segment_m(point, pair[0], pair[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// A geographic bounding box in WGS84 degrees.
///
/// Does not handle boxes that straddle the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    pub const fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Smallest box containing every point, or `None` for an empty slice.
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut bounds = Self::new(first.lon, first.lat, first.lon, first.lat);
        for point in rest {
            bounds.west = bounds.west.min(point.lon);
            bounds.east = bounds.east.max(point.lon);
            bounds.south = bounds.south.min(point.lat);
            bounds.north = bounds.north.max(point.lat);
        }
        Some(bounds)
    }

    /// Grow the box by `margin_m` metres on every side.
    pub fn expand_m(&self, margin_m: f64) -> Self {
        let delta_lat = margin_m / METERS_PER_DEGREE;
        let south = (self.south - delta_lat).max(-90.0);
        let north = (self.north + delta_lat).min(90.0);

        // Longitude degrees shrink toward the poles; use the widest latitude.
        let widest = south.abs().max(north.abs()).to_radians().cos();
        let delta_lon = if widest > f64::EPSILON {
            delta_lat / widest
        } else {
            180.0
        };

        Self {
            west: (self.west - delta_lon).max(-180.0),
            south,
            east: (self.east + delta_lon).min(180.0),
            north,
        }
    }

    /// Smallest box containing both boxes.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            west: self.west.min(other.west),
            south: self.south.min(other.south),
            east: self.east.max(other.east),
            north: self.north.max(other.north),
        }
    }

    pub fn contains(&self, point: GeoPoint) -> bool {
        point.lon >= self.west
            && point.lon <= self.east
            && point.lat >= self.south
            && point.lat <= self.north
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offset_north(point: GeoPoint, meters: f64) -> GeoPoint {
        GeoPoint::new(point.lon, point.lat + meters / METERS_PER_DEGREE)
    }

    #[test]
    fn test_haversine_same_point() {
        let p = GeoPoint::new(-115.1, 36.1);
        assert!(haversine_m(p, p) < 0.001, "Same point should have ~0 distance");
    }

    #[test]
    fn test_haversine_known_distance() {
        // Las Vegas to Los Angeles, ~370 km
        let dist = haversine_m(GeoPoint::new(-115.14, 36.17), GeoPoint::new(-118.24, 34.05));
        assert!(dist > 350_000.0 && dist < 400_000.0, "LV to LA should be ~370km, got {}", dist);
    }

    #[test]
    fn test_segment_distance_perpendicular() {
        let a = GeoPoint::new(-115.20, 36.10);
        let b = GeoPoint::new(-115.10, 36.10);
        let p = offset_north(GeoPoint::new(-115.15, 36.10), 400.0);
        let dist = distance_to_segment_m(p, a, b);
        assert!((dist - 400.0).abs() < 0.5, "expected ~400m, got {}", dist);
    }

    #[test]
    fn test_segment_distance_past_endpoint() {
        let a = GeoPoint::new(-115.20, 36.10);
        let b = GeoPoint::new(-115.10, 36.10);
        let p = GeoPoint::new(-115.09, 36.10);
        let flat = distance_to_segment_m(p, a, b);
        let exact = haversine_m(p, b);
        assert!((flat - exact).abs() < 1.0, "flat {} vs haversine {}", flat, exact);
    }

    #[test]
    fn test_degenerate_segment() {
        let a = GeoPoint::new(-115.15, 36.10);
        let p = offset_north(a, 250.0);
        assert!((distance_to_segment_m(p, a, a) - 250.0).abs() < 0.5);
    }

    #[test]
    fn test_polyline_distance_takes_nearest_segment() {
        let path = [
            GeoPoint::new(-115.20, 36.10),
            GeoPoint::new(-115.10, 36.10),
            GeoPoint::new(-115.10, 36.20),
        ];
        let p = GeoPoint::new(-115.10 + 0.001, 36.15);
        let dist = distance_to_polyline_m(p, &path);
        assert!(dist < 100.0, "point beside second leg, got {}", dist);
        assert_eq!(distance_to_polyline_m(p, &[]), f64::INFINITY);
    }

    #[test]
    fn test_bounding_box_expand_contains_buffer() {
        let points = [GeoPoint::new(-115.20, 36.10), GeoPoint::new(-115.10, 36.12)];
        let bounds = BoundingBox::from_points(&points).unwrap();
        let grown = bounds.expand_m(500.0);
        assert!(grown.contains(offset_north(GeoPoint::new(-115.15, 36.12), 499.0)));
        assert!(!grown.contains(offset_north(GeoPoint::new(-115.15, 36.12), 600.0)));
        assert!(BoundingBox::from_points(&[]).is_none());
    }
}
