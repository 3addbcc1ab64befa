//! Optimizer configuration.

use serde::{Deserialize, Serialize};
use th_types::{config_error, ThError, ThResult};

use crate::selector::RewardPolicy;

/// Iterations run by [`crate::TwoHandedOptimizer::optimize`] when the caller
/// has no better idea.
pub const DEFAULT_ITERATIONS: usize = 25_000;
/// Forward-difference step ε.
pub const DEFAULT_FINITE_DIFFERENCE_STEP: f64 = 1e-10;
/// Gradient ascent step size α.
pub const DEFAULT_LEARNING_RATE: f64 = 0.01;

/// Top-level configuration for a two-handed optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Initial credit of the exploratory (left) hand. Must be > 0.
    pub left_points: f64,

    /// Initial credit of the exploitative (right) hand. Must be > 0.
    pub right_points: f64,

    /// Iterations used by entry points that do not take an explicit count.
    pub num_iterations: usize,

    /// Finite-difference step for the gradient estimate.
    pub finite_difference_step: f64,

    /// Gradient ascent step size.
    pub learning_rate: f64,

    /// Which hand gets credit after each outcome.
    pub reward_policy: RewardPolicy,

    /// Clamp exploitative candidates back into the search space. Off by
    /// default: plain gradient steps may leave the bounds.
    pub clamp_to_bounds: bool,

    /// Seed for the random stream. `None` draws a fresh seed per run.
    pub seed: Option<u64>,

    /// Keep one [`crate::IterationRecord`] per iteration in the report.
    pub record_history: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            left_points: 1.0,
            right_points: 1.0,
            num_iterations: DEFAULT_ITERATIONS,
            finite_difference_step: DEFAULT_FINITE_DIFFERENCE_STEP,
            learning_rate: DEFAULT_LEARNING_RATE,
            reward_policy: RewardPolicy::CrossCredit,
            clamp_to_bounds: false,
            seed: None,
            record_history: false,
        }
    }
}

impl OptimizerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(mut self, left_points: f64, right_points: f64) -> Self {
        self.left_points = left_points;
        self.right_points = right_points;
        self
    }

    pub fn with_iterations(mut self, n: usize) -> Self {
        self.num_iterations = n;
        self
    }

    pub fn with_gradient(mut self, finite_difference_step: f64, learning_rate: f64) -> Self {
        self.finite_difference_step = finite_difference_step;
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_reward_policy(mut self, policy: RewardPolicy) -> Self {
        self.reward_policy = policy;
        self
    }

    pub fn with_clamping(mut self, clamp: bool) -> Self {
        self.clamp_to_bounds = clamp;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_history(mut self, record: bool) -> Self {
        self.record_history = record;
        self
    }

    pub fn validate(&self) -> ThResult<()> {
        if !(self.left_points.is_finite() && self.left_points > 0.0)
            || !(self.right_points.is_finite() && self.right_points > 0.0)
        {
            return Err(ThError::InvalidWeights {
                left: self.left_points,
                right: self.right_points,
            });
        }
        if !(self.finite_difference_step.is_finite() && self.finite_difference_step > 0.0) {
            return Err(config_error!(
                "finite_difference_step must be finite and > 0, got {}",
                self.finite_difference_step
            ));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(config_error!(
                "learning_rate must be finite and > 0, got {}",
                self.learning_rate
            ));
        }
        Ok(())
    }
}
