//! Real Las Vegas locations for realistic test fixtures.
//!
//! Coordinates sourced from OpenStreetMap. The two corridors run from the
//! south Strip to Wynn: one up Las Vegas Boulevard, one east along Tropicana
//! and up Paradise Road.

use incident_router::GeoPoint;

/// A named location with coordinates.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lng: f64) -> Self {
        Self { name, lat, lng }
    }

    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lng, self.lat)
    }
}

// ============================================================================
// Along Las Vegas Boulevard
// ============================================================================

pub const MGM_GRAND: Location = Location::new("MGM Grand", 36.1023654, -115.1688720);
pub const BELLAGIO: Location = Location::new("Bellagio", 36.1126, -115.1767);
pub const CAESARS_PALACE: Location = Location::new("Caesars Palace", 36.1162, -115.1745);
pub const WYNN: Location = Location::new("Wynn Las Vegas", 36.1263781, -115.1658180);

// ============================================================================
// Paradise Road / East of the Strip
// ============================================================================

pub const MARAKESH: Location = Location::new("Marakesh", 36.1177772, -115.1546882);

// ============================================================================
// Far from both corridors
// ============================================================================

pub const HENDERSON_LOCATIONS: &[Location] = &[
    Location::new("I Love Sushi Henderson", 35.9916660, -115.1028343),
    Location::new("Islander's Grill", 36.0335058, -114.9856162),
    Location::new("Green Valley Ranch Area", 36.0308, -115.0825),
    Location::new("Sunset Station Area", 36.0614, -115.0631),
];

/// Las Vegas Boulevard, south Strip to Wynn (~3.1 km).
pub fn strip_corridor() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(-115.1720, 36.1000),
        GeoPoint::new(-115.1722, 36.1100),
        GeoPoint::new(-115.1705, 36.1200),
        GeoPoint::new(-115.1660, 36.1270),
    ]
}

/// Tropicana east, Paradise Road north, back west to Wynn (~5.5 km).
pub fn paradise_corridor() -> Vec<GeoPoint> {
    vec![
        GeoPoint::new(-115.1720, 36.1000),
        GeoPoint::new(-115.1535, 36.1010),
        GeoPoint::new(-115.1535, 36.1250),
        GeoPoint::new(-115.1660, 36.1270),
    ]
}
