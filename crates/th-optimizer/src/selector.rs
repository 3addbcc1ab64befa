//! Performance-weighted choice between the two hands.

use rand::Rng;
use serde::{Deserialize, Serialize};
use th_types::{Strategy, ThError, ThResult};

/// Which hand is credited after an iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewardPolicy {
    /// An improvement credits the hand that produced it; a miss credits the
    /// other hand. Exactly one counter grows every iteration.
    #[default]
    CrossCredit,
    /// Only improvements are credited. A miss leaves both counters alone.
    SuccessOnly,
}

/// Two positive counters and a weighted coin.
///
/// Counters only ever grow, so the ratio between them (not their size)
/// decides the next pick, and any single early success matters less and
/// less as the totals grow.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategySelector {
    left_weight: f64,
    right_weight: f64,
}

impl StrategySelector {
    pub fn new(left_weight: f64, right_weight: f64) -> ThResult<Self> {
        let valid = |w: f64| w.is_finite() && w > 0.0;
        if !valid(left_weight) || !valid(right_weight) {
            return Err(ThError::InvalidWeights {
                left: left_weight,
                right: right_weight,
            });
        }
        Ok(Self {
            left_weight,
            right_weight,
        })
    }

    pub fn left_weight(&self) -> f64 {
        self.left_weight
    }

    pub fn right_weight(&self) -> f64 {
        self.right_weight
    }

    pub fn total_weight(&self) -> f64 {
        self.left_weight + self.right_weight
    }

    /// Probability that the next [`select`](Self::select) picks the
    /// exploratory hand.
    pub fn exploratory_probability(&self) -> f64 {
        self.left_weight / self.total_weight()
    }

    /// Draw `u` in `[0, 1)`; exploratory if `u < left / (left + right)`.
    pub fn select<R: Rng>(&self, rng: &mut R) -> Strategy {
        let u: f64 = rng.random();
        if u < self.exploratory_probability() {
            Strategy::Exploratory
        } else {
            Strategy::Exploitative
        }
    }

    /// Add one point to `strategy`'s counter.
    pub fn reward(&mut self, strategy: Strategy) {
        match strategy {
            Strategy::Exploratory => self.left_weight += 1.0,
            Strategy::Exploitative => self.right_weight += 1.0,
        }
    }

    /// Apply `policy` to the outcome of running `chosen`, returning the hand
    /// that was credited.
    pub fn record_outcome(
        &mut self,
        chosen: Strategy,
        improved: bool,
        policy: RewardPolicy,
    ) -> Option<Strategy> {
        let credited = match (improved, policy) {
            (true, _) => Some(chosen),
            (false, RewardPolicy::CrossCredit) => Some(chosen.other()),
            (false, RewardPolicy::SuccessOnly) => None,
        };
        if let Some(strategy) = credited {
            self.reward(strategy);
        }
        credited
    }
}

impl Default for StrategySelector {
    fn default() -> Self {
        Self {
            left_weight: 1.0,
            right_weight: 1.0,
        }
    }
}
