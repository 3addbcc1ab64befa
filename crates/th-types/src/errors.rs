use thiserror::Error;

/// Main error type for the TwoHanded optimizer
#[derive(Error, Debug)]
pub enum ThError {
    #[error("Invalid search space: {0}")]
    InvalidSearchSpace(#[from] SearchSpaceError),

    #[error("Invalid strategy weights: left {left}, right {right} (both must be finite and > 0)")]
    InvalidWeights { left: f64, right: f64 },

    #[error("Objective evaluation failed at iteration {iteration}: {source}")]
    ObjectiveEvaluation {
        iteration: usize,
        #[source]
        source: EvaluationError,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Search space construction and dimensionality errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchSpaceError {
    #[error("search space has no dimensions")]
    Empty,

    #[error("dimension {dimension} has low {low} greater than high {high}")]
    InvertedBounds { dimension: usize, low: f64, high: f64 },

    #[error("dimension {dimension} has a non-finite bound ({low}, {high})")]
    NonFiniteBounds { dimension: usize, low: f64, high: f64 },

    #[error("dimension {dimension} is too wide: ({low}, {high}) overflows f64")]
    UnboundedWidth { dimension: usize, low: f64, high: f64 },

    #[error("hypothesis has {actual} coordinates, search space has {expected} dimensions")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// Failure reported by an objective function.
///
/// Objectives are external collaborators, so the error only carries a
/// message. The optimizer wraps it into [`ThError::ObjectiveEvaluation`]
/// together with the iteration it happened in.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct EvaluationError {
    pub message: String,
}

impl EvaluationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result type alias for TwoHanded operations
pub type ThResult<T> = Result<T, ThError>;

/// Macro for creating validation errors
#[macro_export]
macro_rules! validation_error {
    ($($arg:tt)*) => {
        $crate::ThError::Validation(format!($($arg)*))
    };
}

/// Macro for creating configuration errors
#[macro_export]
macro_rules! config_error {
    ($($arg:tt)*) => {
        $crate::ThError::Config(format!($($arg)*))
    };
}
