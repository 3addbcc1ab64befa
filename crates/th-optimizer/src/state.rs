//! Run state, per-iteration records and the final report.

use chrono::{DateTime, Utc};
use serde::Serialize;
use th_types::{validation_error, Hypothesis, SearchSpace, Strategy, ThResult};
use uuid::Uuid;

use crate::selector::StrategySelector;

/// Unique optimization run identifier.
pub type RunId = Uuid;

/// Mutable state threaded through the iteration loop.
///
/// A fresh state has no best point, a best score of −∞ and the configured
/// initial weights. Passing a finished state back into
/// [`crate::TwoHandedOptimizer::resume`] continues where it stopped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizerState {
    pub best: Option<Hypothesis>,
    pub best_score: f64,
    pub selector: StrategySelector,
    pub iterations_completed: usize,
    pub evaluations: u64,
    pub exploratory_runs: usize,
    pub exploitative_runs: usize,
    pub improvements: usize,
    pub rejected_non_finite: usize,
}

impl OptimizerState {
    pub fn new(selector: StrategySelector) -> Self {
        Self {
            best: None,
            best_score: f64::NEG_INFINITY,
            selector,
            iterations_completed: 0,
            evaluations: 0,
            exploratory_runs: 0,
            exploitative_runs: 0,
            improvements: 0,
            rejected_non_finite: 0,
        }
    }

    /// Make sure a state handed in from outside still fits `space`.
    pub fn check_against(&self, space: &SearchSpace) -> ThResult<()> {
        if let Some(best) = &self.best {
            space.check_dimensions(best)?;
            if !best.is_finite() {
                return Err(validation_error!("stored best {best} has non-finite coordinates"));
            }
        }
        if self.best_score.is_nan() {
            return Err(validation_error!("stored best score is NaN"));
        }
        Ok(())
    }

    /// Adopt `candidate` if `score` strictly beats the current best.
    ///
    /// NaN compares false against everything, and ±∞ or non-finite
    /// coordinates are filtered out by the caller, so only finite
    /// improvements get through.
    pub(crate) fn offer(&mut self, candidate: Hypothesis, score: f64) -> bool {
        if score > self.best_score {
            self.best = Some(candidate);
            self.best_score = score;
            self.improvements += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn count_choice(&mut self, strategy: Strategy) {
        match strategy {
            Strategy::Exploratory => self.exploratory_runs += 1,
            Strategy::Exploitative => self.exploitative_runs += 1,
        }
    }
}

/// Lifecycle state for an optimization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Pending,
    Running,
    Completed,
    Cancelled,
}

/// What happened in one iteration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IterationRecord {
    pub iteration: usize,
    pub strategy: Strategy,
    /// Score of the candidate. `None` if the candidate had non-finite
    /// coordinates and was never evaluated.
    pub score: Option<f64>,
    pub improved: bool,
    /// Hand credited by the reward policy, if any.
    pub credited: Option<Strategy>,
    /// Best score after this iteration.
    pub best_score: f64,
}

/// Outcome of a run: final state plus bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationReport {
    pub id: RunId,
    pub status: RunStatus,
    pub requested_iterations: usize,
    pub state: OptimizerState,
    pub history: Vec<IterationRecord>,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl OptimizationReport {
    pub fn new(state: OptimizerState, requested_iterations: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            status: RunStatus::Pending,
            requested_iterations,
            state,
            history: Vec::new(),
            started_at: None,
            finished_at: None,
        }
    }

    pub fn mark_running(&mut self) {
        self.status = RunStatus::Running;
        self.started_at = Some(Utc::now());
    }

    pub fn mark_completed(&mut self) {
        self.status = RunStatus::Completed;
        self.finished_at = Some(Utc::now());
    }

    pub fn mark_cancelled(&mut self) {
        self.status = RunStatus::Cancelled;
        self.finished_at = Some(Utc::now());
    }

    pub fn best(&self) -> Option<&Hypothesis> {
        self.state.best.as_ref()
    }

    /// Best score, or `None` before the first accepted evaluation. A
    /// midpoint seed that was never scored does not count.
    pub fn best_score(&self) -> Option<f64> {
        Some(self.state.best_score).filter(|score| score.is_finite())
    }

    pub fn into_best(self) -> Option<Hypothesis> {
        self.state.best
    }

    pub fn duration_seconds(&self) -> Option<f64> {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => Some((end - start).num_microseconds()? as f64 / 1e6),
            _ => None,
        }
    }
}
