//! The objective capability consumed by the optimizer.

use crate::errors::EvaluationError;

/// A scalar function to be maximized.
///
/// The optimizer only ever calls [`Objective::evaluate`] with slices whose
/// length equals the search space dimensionality. Implementations should be
/// deterministic if reproducible runs are wanted.
///
/// Any `Fn(&[f64]) -> f64` closure is an objective. Closures that can fail
/// are wrapped with [`fallible`].
pub trait Objective {
    fn evaluate(&self, x: &[f64]) -> Result<f64, EvaluationError>;
}

impl<F> Objective for F
where
    F: Fn(&[f64]) -> f64,
{
    fn evaluate(&self, x: &[f64]) -> Result<f64, EvaluationError> {
        Ok(self(x))
    }
}

/// Adapter turning a `Fn(&[f64]) -> Result<f64, EvaluationError>` into an
/// [`Objective`].
#[derive(Debug, Clone, Copy)]
pub struct Fallible<F>(pub F);

impl<F> Objective for Fallible<F>
where
    F: Fn(&[f64]) -> Result<f64, EvaluationError>,
{
    fn evaluate(&self, x: &[f64]) -> Result<f64, EvaluationError> {
        (self.0)(x)
    }
}

pub fn fallible<F>(f: F) -> Fallible<F>
where
    F: Fn(&[f64]) -> Result<f64, EvaluationError>,
{
    Fallible(f)
}
