//! # th-optimizer
//!
//! Adaptive two-handed optimizer for bounded continuous maximization.
//!
//! Each iteration picks one of two hands with probability proportional to its
//! accumulated credit: the left hand samples the whole search space uniformly,
//! the right hand takes one finite-difference ascent step from the current
//! best. Whichever hand the reward rule credits after the outcome becomes more
//! likely to be picked next time.

mod config;
mod gradient;
mod optimizer;
mod sampler;
mod selector;
mod state;

pub use config::{
    OptimizerConfig, DEFAULT_FINITE_DIFFERENCE_STEP, DEFAULT_ITERATIONS, DEFAULT_LEARNING_RATE,
};
pub use gradient::{GradientStepper, LocalStepper};
pub use optimizer::TwoHandedOptimizer;
pub use sampler::RandomSampler;
pub use selector::{RewardPolicy, StrategySelector};
pub use state::{IterationRecord, OptimizationReport, OptimizerState, RunId, RunStatus};
