//! Local search from the current best (the exploitative hand).

use serde::{Deserialize, Serialize};
use th_types::{EvaluationError, Hypothesis, Objective};

use crate::config::{DEFAULT_FINITE_DIFFERENCE_STEP, DEFAULT_LEARNING_RATE};

/// A local search operator: given the current best point, propose the next
/// candidate.
///
/// The optimizer evaluates and judges the returned candidate itself, so an
/// implementation only has to move. It may call the objective as often as it
/// needs to; failures are propagated untouched.
pub trait LocalStepper {
    fn step<O: Objective + ?Sized>(
        &self,
        objective: &O,
        current: &[f64],
    ) -> Result<Hypothesis, EvaluationError>;

    /// Human-readable stepper name.
    fn name(&self) -> &str;
}

/// One step of forward-difference gradient ascent.
///
/// `g_i = (f(x + ε·e_i) - f(x)) / ε` and `x'_i = x_i + α·g_i`, costing
/// `d + 1` objective evaluations. The result is not clamped to the search
/// space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientStepper {
    /// Finite-difference step ε.
    pub epsilon: f64,
    /// Ascent step size α.
    pub learning_rate: f64,
}

impl GradientStepper {
    pub fn new(epsilon: f64, learning_rate: f64) -> Self {
        Self {
            epsilon,
            learning_rate,
        }
    }

    /// Forward-difference estimate of ∇f at `x`.
    pub fn gradient<O: Objective + ?Sized>(
        &self,
        objective: &O,
        x: &[f64],
    ) -> Result<Vec<f64>, EvaluationError> {
        let base = objective.evaluate(x)?;
        let mut probe = x.to_vec();
        let mut grad = Vec::with_capacity(x.len());

        for i in 0..x.len() {
            probe[i] = x[i] + self.epsilon;
            let shifted = objective.evaluate(&probe)?;
            probe[i] = x[i];
            grad.push((shifted - base) / self.epsilon);
        }

        Ok(grad)
    }
}

impl Default for GradientStepper {
    fn default() -> Self {
        Self::new(DEFAULT_FINITE_DIFFERENCE_STEP, DEFAULT_LEARNING_RATE)
    }
}

impl LocalStepper for GradientStepper {
    fn step<O: Objective + ?Sized>(
        &self,
        objective: &O,
        current: &[f64],
    ) -> Result<Hypothesis, EvaluationError> {
        let grad = self.gradient(objective, current)?;
        Ok(current
            .iter()
            .zip(&grad)
            .map(|(x, g)| x + self.learning_rate * g)
            .collect::<Vec<f64>>()
            .into())
    }

    fn name(&self) -> &str {
        "forward_difference_gradient"
    }
}
