//! Incident trust model.
//!
//! Reliability is the fraction of confirming votes. An incident with enough
//! votes and too little confirmation is deactivated. Both values are a pure
//! function of the cumulative tally and are recomputed from scratch on every
//! vote.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Minimum number of votes before an incident can be deactivated.
pub const MIN_VOTES_FOR_DEACTIVATION: u64 = 5;

/// Incidents below this reliability (strictly) are deactivated.
pub const DEACTIVATION_RELIABILITY: f64 = 0.2;

/// Cumulative confirm/dispute counts for an incident.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub up: u32,
    pub down: u32,
}

impl VoteTally {
    /// Validate raw counts from the persistence layer.
    pub fn new(up: i64, down: i64) -> Result<Self, EngineError> {
        match (u32::try_from(up), u32::try_from(down)) {
            (Ok(up), Ok(down)) => Ok(Self { up, down }),
            _ => Err(EngineError::InvalidVoteTally { up, down }),
        }
    }

    pub fn total(&self) -> u64 {
        u64::from(self.up) + u64::from(self.down)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trust {
    pub reliability_score: f64,
    pub active: bool,
}

pub fn assess(tally: VoteTally) -> Trust {
    let total = tally.total();
    let reliability_score = if total > 0 {
        f64::from(tally.up) / total as f64
    } else {
        1.0
    };
    let active =
        !(total >= MIN_VOTES_FOR_DEACTIVATION && reliability_score < DEACTIVATION_RELIABILITY);

    Trust {
        reliability_score,
        active,
    }
}

/// [`assess`] for unvalidated counts.
pub fn assess_counts(up: i64, down: i64) -> Result<Trust, EngineError> {
    Ok(assess(VoteTally::new(up, down)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unvoted_is_trusted() {
        let trust = assess(VoteTally::default());
        assert_eq!(trust.reliability_score, 1.0);
        assert!(trust.active);
    }

    #[test]
    fn test_boundary_stays_active() {
        let trust = assess(VoteTally { up: 1, down: 4 });
        assert_eq!(trust.reliability_score, 0.2);
        assert!(trust.active);

        let trust = assess(VoteTally { up: 2, down: 8 });
        assert!(trust.active);
    }

    #[test]
    fn test_below_threshold_deactivates() {
        let trust = assess(VoteTally { up: 0, down: 5 });
        assert_eq!(trust.reliability_score, 0.0);
        assert!(!trust.active);

        let trust = assess(VoteTally { up: 1, down: 5 });
        assert!(!trust.active);
    }

    #[test]
    fn test_too_few_votes_stays_active() {
        let trust = assess(VoteTally { up: 0, down: 4 });
        assert_eq!(trust.reliability_score, 0.0);
        assert!(trust.active);
    }

    #[test]
    fn test_active_iff_rule_holds_exhaustively() {
        for up in 0..30_u32 {
            for down in 0..30_u32 {
                let tally = VoteTally { up, down };
                let trust = assess(tally);
                let total = tally.total();
                let expected = !(total >= 5 && trust.reliability_score < 0.2);
                assert_eq!(trust.active, expected, "up={} down={}", up, down);
                assert_eq!(assess(tally), trust, "assess must be idempotent");
            }
        }
    }

    #[test]
    fn test_negative_counts_rejected() {
        assert_eq!(
            assess_counts(-1, 3),
            Err(EngineError::InvalidVoteTally { up: -1, down: 3 })
        );
        assert!(VoteTally::new(2, -7).is_err());
        assert!(VoteTally::new(i64::from(u32::MAX) + 1, 0).is_err());
        assert_eq!(VoteTally::new(3, 2).unwrap(), VoteTally { up: 3, down: 2 });
    }
}
