use serde::{Deserialize, Serialize};
use th_types::{EvaluationError, Objective};

/// `f(x) = −Σ (x_i − c_i)²`, maximized at the centre `c` (the origin by
/// default). Works in any dimension.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NegativeSumOfSquares {
    /// Location of the maximum. Empty means the origin.
    pub center: Vec<f64>,
}

impl NegativeSumOfSquares {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn centered_at(center: Vec<f64>) -> Self {
        Self { center }
    }

    pub fn value(&self, x: &[f64]) -> f64 {
        -x.iter()
            .enumerate()
            .map(|(i, v)| {
                let d = v - self.center.get(i).copied().unwrap_or(0.0);
                d * d
            })
            .sum::<f64>()
    }
}

impl Objective for NegativeSumOfSquares {
    fn evaluate(&self, x: &[f64]) -> Result<f64, EvaluationError> {
        if !self.center.is_empty() && self.center.len() != x.len() {
            return Err(EvaluationError::new(format!(
                "centre has {} coordinates, point has {}",
                self.center.len(),
                x.len()
            )));
        }
        Ok(self.value(x))
    }
}
