use serde::{Deserialize, Serialize};

/// The two hands of the optimizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Left hand: uniform random sampling over the whole search space.
    Exploratory,
    /// Right hand: one local ascent step from the current best.
    Exploitative,
}

impl Strategy {
    pub fn other(self) -> Self {
        match self {
            Self::Exploratory => Self::Exploitative,
            Self::Exploitative => Self::Exploratory,
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Exploratory => write!(f, "exploratory"),
            Self::Exploitative => write!(f, "exploitative"),
        }
    }
}
