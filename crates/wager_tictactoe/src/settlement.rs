//! Stake limits and payout arithmetic.
//!
//! Payouts are quoted from the human seat ([`Mark::X`]):
//!
//! | outcome  | payout              |
//! |----------|---------------------|
//! | X wins   | `stake * 1.8`       |
//! | O wins   | `-stake`            |
//! | tie      | `0`                 |
//! | undecided| `0`                 |

use super::{Mark, Outcome, SessionError};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

/// Smallest accepted stake.
pub const DEFAULT_MIN_STAKE: f64 = 0.001;
/// Largest accepted stake.
pub const DEFAULT_MAX_STAKE: f64 = 10.0;
/// Multiplier applied to the stake when the human wins.
pub const DEFAULT_WIN_MULTIPLIER: f64 = 1.8;
/// Quick-pick stake amounts offered to players.
pub const DEFAULT_STAKE_PRESETS: [f64; 5] = [0.001, 0.01, 0.1, 0.5, 1.0];

/// Inclusive bounds on a stake.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StakeLimits {
    /// Minimum stake.
    pub min: f64,
    /// Maximum stake.
    pub max: f64,
}

impl Default for StakeLimits {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_STAKE,
            max: DEFAULT_MAX_STAKE,
        }
    }
}

impl StakeLimits {
    /// Accepts a finite amount within `[min, max]`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::InvalidStake`] for NaN, infinities,
    /// non-positive amounts and anything outside the bounds.
    #[instrument(level = "debug", skip(self))]
    pub fn validate(&self, amount: f64) -> Result<f64, SessionError> {
        if amount.is_finite() && amount > 0.0 && amount >= self.min && amount <= self.max {
            Ok(amount)
        } else {
            warn!(amount, min = self.min, max = self.max, "Stake rejected");
            Err(SessionError::InvalidStake {
                amount,
                min: self.min,
                max: self.max,
            })
        }
    }

    /// Keeps only the presets these limits accept.
    pub fn filter_presets(&self, presets: &[f64]) -> Vec<f64> {
        presets
            .iter()
            .copied()
            .filter(|p| self.validate(*p).is_ok())
            .collect()
    }
}

/// Product constants governing stakes and payouts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayoutRules {
    /// Accepted stake range.
    pub limits: StakeLimits,
    /// Stake multiplier paid on a human win.
    pub win_multiplier: f64,
}

impl Default for PayoutRules {
    fn default() -> Self {
        Self {
            limits: StakeLimits::default(),
            win_multiplier: DEFAULT_WIN_MULTIPLIER,
        }
    }
}

impl PayoutRules {
    /// Signed settlement amount for `outcome` at `stake`.
    pub fn payout(&self, outcome: Outcome, stake: f64) -> f64 {
        match outcome {
            Outcome::Winner(Mark::X) => stake * self.win_multiplier,
            Outcome::Winner(Mark::O) => -stake,
            Outcome::Tie | Outcome::Undecided => 0.0,
        }
    }

    /// Builds the settlement record for a finished game.
    pub fn settle(&self, outcome: Outcome, stake: f64) -> Settlement {
        Settlement {
            outcome,
            stake,
            payout: self.payout(outcome, stake),
        }
    }
}

/// Signed settlement amount under the default rules.
pub fn payout(outcome: Outcome, stake: f64) -> f64 {
    PayoutRules::default().payout(outcome, stake)
}

/// Resolution of a stake once a game is decided.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    /// Outcome that was settled.
    pub outcome: Outcome,
    /// Stake at risk.
    pub stake: f64,
    /// Signed amount handed to the settlement collaborator.
    pub payout: f64,
}

impl Settlement {
    /// Amount handed back to the player: the payout on a win, the stake on
    /// a tie, nothing on a loss.
    pub fn total_returned(&self) -> f64 {
        match self.outcome {
            Outcome::Winner(Mark::X) => self.payout,
            Outcome::Tie => self.stake,
            Outcome::Winner(Mark::O) | Outcome::Undecided => 0.0,
        }
    }

    /// Change in the player's funds when the stake was never taken up
    /// front: `total_returned - stake`.
    pub fn net(&self) -> f64 {
        self.total_returned() - self.stake
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_are_inclusive() {
        let limits = StakeLimits::default();
        assert_eq!(limits.validate(0.001), Ok(0.001));
        assert_eq!(limits.validate(10.0), Ok(10.0));
    }

    #[test]
    fn test_non_finite_rejected() {
        let limits = StakeLimits::default();
        assert!(limits.validate(f64::NAN).is_err());
        assert!(limits.validate(f64::INFINITY).is_err());
        assert!(limits.validate(-1.0).is_err());
        assert!(limits.validate(0.0).is_err());
    }

    #[test]
    fn test_presets_filtered_by_limits() {
        let limits = StakeLimits { min: 0.01, max: 0.5 };
        assert_eq!(
            limits.filter_presets(&DEFAULT_STAKE_PRESETS),
            vec![0.01, 0.1, 0.5]
        );
    }

    #[test]
    fn test_total_returned() {
        let rules = PayoutRules::default();
        assert_eq!(rules.settle(Outcome::Tie, 0.5).total_returned(), 0.5);
        assert_eq!(rules.settle(Outcome::Winner(Mark::O), 0.5).total_returned(), 0.0);
        assert_eq!(rules.settle(Outcome::Winner(Mark::X), 1.0).total_returned(), 1.8);
    }

    #[test]
    fn test_net_excludes_returned_stake() {
        let rules = PayoutRules::default();
        assert!((rules.settle(Outcome::Winner(Mark::X), 0.5).net() - 0.4).abs() < 1e-12);
        assert_eq!(rules.settle(Outcome::Winner(Mark::O), 0.5).net(), -0.5);
        assert_eq!(rules.settle(Outcome::Tie, 0.5).net(), 0.0);
    }
}
