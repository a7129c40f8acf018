//! Time-of-day traffic prediction.
//!
//! Produces a congestion score from the local wall-clock time and route
//! length alone. Incident data is never consulted.

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Weekday};
use serde::{Deserialize, Serialize};

/// A half-open range of local hours, `start <= hour < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourBand {
    pub start: u32,
    pub end: u32,
}

impl HourBand {
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, hour: u32) -> bool {
        hour >= self.start && hour < self.end
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrafficConfig {
    pub morning_rush: HourBand,
    pub evening_rush: HourBand,
    /// Weekend busy period. Only reported by `is_rush_hour`; every weekend
    /// hour takes `weekend_base`.
    pub weekend_peak: HourBand,
    pub weekend_base: f64,
    pub rush_hour_base: f64,
    pub off_peak_base: f64,
    /// Routes at or beyond this length take the full distance penalty.
    pub reference_distance_m: f64,
    pub distance_penalty: f64,
    pub min_score: f64,
    pub max_score: f64,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            morning_rush: HourBand::new(7, 10),
            evening_rush: HourBand::new(16, 19),
            weekend_peak: HourBand::new(11, 15),
            weekend_base: 80.0,
            rush_hour_base: 60.0,
            off_peak_base: 70.0,
            reference_distance_m: 30_000.0,
            distance_penalty: 20.0,
            min_score: 30.0,
            max_score: 100.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TrafficPredictor {
    config: TrafficConfig,
}

impl TrafficPredictor {
    pub fn new(config: TrafficConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TrafficConfig {
        &self.config
    }

    pub fn is_weekend(&self, now: &DateTime<FixedOffset>) -> bool {
        matches!(now.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// On weekends this reports the `weekend_peak` band, which does not
    /// change [`TrafficPredictor::base_score`].
    pub fn is_rush_hour(&self, now: &DateTime<FixedOffset>) -> bool {
        let hour = now.hour();
        if self.is_weekend(now) {
            self.config.weekend_peak.contains(hour)
        } else {
            self.config.morning_rush.contains(hour) || self.config.evening_rush.contains(hour)
        }
    }

    /// Score before the distance penalty.
    pub fn base_score(&self, now: &DateTime<FixedOffset>) -> f64 {
        if self.is_weekend(now) {
            self.config.weekend_base
        } else if self.is_rush_hour(now) {
            self.config.rush_hour_base
        } else {
            self.config.off_peak_base
        }
    }

    /// Congestion score for a route of `distance_m` metres at `now`.
    ///
    /// Non-finite or negative distances take no distance penalty. Inverted
    /// score bounds never panic; the upper bound wins.
    pub fn predict(&self, now: &DateTime<FixedOffset>, distance_m: f64) -> f64 {
        let distance_factor = if distance_m.is_finite() && self.config.reference_distance_m > 0.0 {
            (distance_m / self.config.reference_distance_m).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let score = self.base_score(now) - distance_factor * self.config.distance_penalty;
        score.max(self.config.min_score).min(self.config.max_score)
    }
}
