//! Test fixtures for incident-router.
//!
//! Provides realistic test data including:
//! - Real Las Vegas locations and two parallel north-south corridors
//! - Builders for routes, incidents and injected clocks

#![allow(dead_code)]

pub mod builders;
pub mod las_vegas_locations;

pub use builders::*;
pub use las_vegas_locations::*;
