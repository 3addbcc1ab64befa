//! The two-handed iteration loop.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::cell::Cell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use th_types::{
    EvaluationError, Hypothesis, Objective, SearchSpace, Strategy, ThError, ThResult,
};
use tracing::{debug, info, warn};

use crate::config::OptimizerConfig;
use crate::gradient::{GradientStepper, LocalStepper};
use crate::sampler::RandomSampler;
use crate::selector::StrategySelector;
use crate::state::{IterationRecord, OptimizationReport, OptimizerState};

/// Adaptive optimizer that alternates between global random sampling and
/// local ascent, favouring whichever hand has been credited more often.
///
/// The local hand is pluggable through [`LocalStepper`]; the default is a
/// forward-difference [`GradientStepper`] built from the config.
///
/// # Example
///
/// ```
/// use th_optimizer::{OptimizerConfig, TwoHandedOptimizer};
/// use th_types::SearchSpace;
///
/// let space = SearchSpace::from_ranges(&[(-2.0, 2.0), (-2.0, 2.0)]).unwrap();
/// let optimizer = TwoHandedOptimizer::new(space, OptimizerConfig::new().with_seed(3)).unwrap();
/// let bowl = |x: &[f64]| -x.iter().map(|v| v * v).sum::<f64>();
/// let best = optimizer.optimize(&bowl, 2_000).unwrap().unwrap();
/// assert!(best.iter().all(|v| v.abs() < 1e-2));
/// ```
#[derive(Debug, Clone)]
pub struct TwoHandedOptimizer<L = GradientStepper> {
    space: SearchSpace,
    config: OptimizerConfig,
    sampler: RandomSampler,
    stepper: L,
    initial_selector: StrategySelector,
    cancel: Option<Arc<AtomicBool>>,
}

impl TwoHandedOptimizer<GradientStepper> {
    pub fn new(space: SearchSpace, config: OptimizerConfig) -> ThResult<Self> {
        config.validate()?;
        let initial_selector = StrategySelector::new(config.left_points, config.right_points)?;
        let stepper = GradientStepper::new(config.finite_difference_step, config.learning_rate);
        Ok(Self {
            sampler: RandomSampler::new(space.clone()),
            space,
            config,
            stepper,
            initial_selector,
            cancel: None,
        })
    }

    /// Default configuration over `(low, high)` pairs.
    pub fn from_ranges(ranges: &[(f64, f64)]) -> ThResult<Self> {
        Self::new(SearchSpace::from_ranges(ranges)?, OptimizerConfig::default())
    }
}

impl<L: LocalStepper> TwoHandedOptimizer<L> {
    /// Swap the exploitative hand for another local search operator.
    pub fn with_stepper<M: LocalStepper>(self, stepper: M) -> TwoHandedOptimizer<M> {
        TwoHandedOptimizer {
            space: self.space,
            config: self.config,
            sampler: self.sampler,
            stepper,
            initial_selector: self.initial_selector,
            cancel: self.cancel,
        }
    }

    /// Stop at the next iteration boundary once `flag` is set.
    pub fn with_cancellation(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn space(&self) -> &SearchSpace {
        &self.space
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn stepper(&self) -> &L {
        &self.stepper
    }

    /// State a run starts from: no best, configured weights.
    pub fn initial_state(&self) -> OptimizerState {
        OptimizerState::new(self.initial_selector.clone())
    }

    /// Run `num_iterations` iterations and return the best point found, or
    /// `None` when nothing was run.
    pub fn optimize<O: Objective + ?Sized>(
        &self,
        objective: &O,
        num_iterations: usize,
    ) -> ThResult<Option<Hypothesis>> {
        Ok(self.run(objective, num_iterations)?.into_best())
    }

    /// [`optimize`](Self::optimize) with the configured iteration count.
    pub fn optimize_configured<O: Objective + ?Sized>(
        &self,
        objective: &O,
    ) -> ThResult<Option<Hypothesis>> {
        self.optimize(objective, self.config.num_iterations)
    }

    /// Like [`optimize`](Self::optimize) but returns the full report.
    pub fn run<O: Objective + ?Sized>(
        &self,
        objective: &O,
        num_iterations: usize,
    ) -> ThResult<OptimizationReport> {
        let mut rng = self.make_rng();
        self.run_with_rng(objective, num_iterations, &mut rng)
    }

    /// Run from a fresh state, drawing every random decision from `rng`.
    pub fn run_with_rng<O: Objective + ?Sized, R: Rng>(
        &self,
        objective: &O,
        num_iterations: usize,
        rng: &mut R,
    ) -> ThResult<OptimizationReport> {
        self.resume(self.initial_state(), objective, num_iterations, rng)
    }

    /// Continue from `state` for another `num_iterations` iterations.
    pub fn resume<O: Objective + ?Sized, R: Rng>(
        &self,
        state: OptimizerState,
        objective: &O,
        num_iterations: usize,
        rng: &mut R,
    ) -> ThResult<OptimizationReport> {
        state.check_against(&self.space)?;

        let mut report = OptimizationReport::new(state, num_iterations);
        report.mark_running();
        info!(
            run_id = %report.id,
            dimensions = self.space.dimensions(),
            iterations = num_iterations,
            left_weight = report.state.selector.left_weight(),
            right_weight = report.state.selector.right_weight(),
            stepper = self.stepper.name(),
            "starting two-handed optimization"
        );

        let counted = Counted::new(objective);
        for _ in 0..num_iterations {
            if self.is_cancelled() {
                warn!(
                    run_id = %report.id,
                    completed = report.state.iterations_completed,
                    "optimization cancelled"
                );
                report.mark_cancelled();
                return Ok(report);
            }

            let record = self.iterate(&mut report.state, &counted, rng);
            report.state.evaluations += counted.take();
            let record = record?;
            if self.config.record_history {
                report.history.push(record);
            }
        }

        report.mark_completed();
        info!(
            run_id = %report.id,
            best_score = report.state.best_score,
            improvements = report.state.improvements,
            exploratory_runs = report.state.exploratory_runs,
            exploitative_runs = report.state.exploitative_runs,
            left_weight = report.state.selector.left_weight(),
            right_weight = report.state.selector.right_weight(),
            "optimization finished"
        );
        Ok(report)
    }

    fn iterate<O: Objective + ?Sized, R: Rng>(
        &self,
        state: &mut OptimizerState,
        objective: &Counted<'_, O>,
        rng: &mut R,
    ) -> ThResult<IterationRecord> {
        let iteration = state.iterations_completed;
        let strategy = state.selector.select(rng);
        state.count_choice(strategy);

        let candidate = match strategy {
            Strategy::Exploratory => self.sampler.sample(rng),
            Strategy::Exploitative => {
                let current = state.best.get_or_insert_with(|| self.space.midpoint());
                let stepped = self
                    .stepper
                    .step(objective, current)
                    .map_err(|source| ThError::ObjectiveEvaluation { iteration, source })?;
                if self.config.clamp_to_bounds {
                    let mut coordinates = stepped.into_inner();
                    self.space.clamp(&mut coordinates);
                    Hypothesis::new(coordinates)
                } else {
                    stepped
                }
            }
        };

        let (score, improved) = if !candidate.is_finite() {
            warn!(iteration, %strategy, "candidate has non-finite coordinates, skipping");
            state.rejected_non_finite += 1;
            (None, false)
        } else {
            let score = objective
                .evaluate(&candidate)
                .map_err(|source| ThError::ObjectiveEvaluation { iteration, source })?;
            if !score.is_finite() {
                warn!(iteration, %strategy, score, candidate = %candidate, "objective returned a non-finite score");
                state.rejected_non_finite += 1;
                (Some(score), false)
            } else {
                let improved = state.offer(candidate, score);
                if improved {
                    debug!(iteration, %strategy, score, "new best");
                }
                (Some(score), improved)
            }
        };

        let credited = state
            .selector
            .record_outcome(strategy, improved, self.config.reward_policy);
        state.iterations_completed += 1;

        Ok(IterationRecord {
            iteration,
            strategy,
            score,
            improved,
            credited,
            best_score: state.best_score,
        })
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    fn make_rng(&self) -> ChaCha8Rng {
        match self.config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }
}

/// Objective wrapper that counts calls.
struct Counted<'a, O: ?Sized> {
    inner: &'a O,
    calls: Cell<u64>,
}

impl<'a, O: Objective + ?Sized> Counted<'a, O> {
    fn new(inner: &'a O) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
        }
    }

    /// Calls since the last `take`.
    fn take(&self) -> u64 {
        self.calls.replace(0)
    }
}

impl<O: Objective + ?Sized> Objective for Counted<'_, O> {
    fn evaluate(&self, x: &[f64]) -> Result<f64, EvaluationError> {
        self.calls.set(self.calls.get() + 1);
        self.inner.evaluate(x)
    }
}
