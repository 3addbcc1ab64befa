//! Search space and candidate point definitions.

use serde::{Deserialize, Serialize};
use std::ops::Deref;

use crate::errors::SearchSpaceError;

/// Closed interval `[low, high]` for a single dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub low: f64,
    pub high: f64,
}

impl Bounds {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn midpoint(&self) -> f64 {
        self.low + (self.high - self.low) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.high - self.low
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

impl From<(f64, f64)> for Bounds {
    fn from((low, high): (f64, f64)) -> Self {
        Self { low, high }
    }
}

/// The bounded domain of the search: one [`Bounds`] per dimension.
///
/// A `SearchSpace` is validated on construction and never changes shape
/// afterwards, so every consumer can rely on `dimensions() > 0` and a
/// finite `low <= high` with a finite width for each axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchSpace {
    bounds: Vec<Bounds>,
}

impl SearchSpace {
    pub fn new(bounds: Vec<Bounds>) -> Result<Self, SearchSpaceError> {
        if bounds.is_empty() {
            return Err(SearchSpaceError::Empty);
        }
        for (dimension, b) in bounds.iter().enumerate() {
            if !b.low.is_finite() || !b.high.is_finite() {
                return Err(SearchSpaceError::NonFiniteBounds {
                    dimension,
                    low: b.low,
                    high: b.high,
                });
            }
            if b.low > b.high {
                return Err(SearchSpaceError::InvertedBounds {
                    dimension,
                    low: b.low,
                    high: b.high,
                });
            }
            if !b.width().is_finite() {
                return Err(SearchSpaceError::UnboundedWidth {
                    dimension,
                    low: b.low,
                    high: b.high,
                });
            }
        }
        Ok(Self { bounds })
    }

    /// Build from `(low, high)` pairs, e.g. `[(1.0, 120.0), (1.0, 180.0)]`.
    pub fn from_ranges(ranges: &[(f64, f64)]) -> Result<Self, SearchSpaceError> {
        Self::new(ranges.iter().copied().map(Bounds::from).collect())
    }

    pub fn dimensions(&self) -> usize {
        self.bounds.len()
    }

    pub fn bounds(&self) -> &[Bounds] {
        &self.bounds
    }

    /// Centre of the box. Used to seed local search when no best exists yet.
    pub fn midpoint(&self) -> Hypothesis {
        Hypothesis::new(self.bounds.iter().map(Bounds::midpoint).collect())
    }

    pub fn contains(&self, point: &[f64]) -> bool {
        point.len() == self.bounds.len()
            && point.iter().zip(&self.bounds).all(|(x, b)| b.contains(*x))
    }

    /// Clamp every coordinate into its dimension's bounds in place.
    /// Non-finite coordinates are left untouched.
    pub fn clamp(&self, point: &mut [f64]) {
        for (x, b) in point.iter_mut().zip(&self.bounds) {
            if x.is_finite() {
                *x = x.clamp(b.low, b.high);
            }
        }
    }

    pub fn check_dimensions(&self, point: &[f64]) -> Result<(), SearchSpaceError> {
        if point.len() != self.bounds.len() {
            return Err(SearchSpaceError::DimensionMismatch {
                expected: self.bounds.len(),
                actual: point.len(),
            });
        }
        Ok(())
    }
}

// Deserialization goes through `new` so a run file can never produce an
// unvalidated space.
impl<'de> Deserialize<'de> for SearchSpace {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Pairs(Vec<(f64, f64)>),
            Named { bounds: Vec<Bounds> },
        }

        let bounds = match Repr::deserialize(deserializer)? {
            Repr::Pairs(pairs) => pairs.into_iter().map(Bounds::from).collect(),
            Repr::Named { bounds } => bounds,
        };
        SearchSpace::new(bounds).map_err(serde::de::Error::custom)
    }
}

/// A candidate point in the search space, one value per dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hypothesis(Vec<f64>);

impl Hypothesis {
    pub fn new(coordinates: Vec<f64>) -> Self {
        Self(coordinates)
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|x| x.is_finite())
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

impl Deref for Hypothesis {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.0
    }
}

impl From<Vec<f64>> for Hypothesis {
    fn from(coordinates: Vec<f64>) -> Self {
        Self(coordinates)
    }
}

impl std::fmt::Display for Hypothesis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{x:.6}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_space_is_rejected() {
        assert_eq!(SearchSpace::new(Vec::new()), Err(SearchSpaceError::Empty));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let err = SearchSpace::from_ranges(&[(0.0, 1.0), (3.0, 2.0)]).unwrap_err();
        assert_eq!(
            err,
            SearchSpaceError::InvertedBounds {
                dimension: 1,
                low: 3.0,
                high: 2.0
            }
        );
    }

    #[test]
    fn non_finite_bounds_are_rejected() {
        let err = SearchSpace::from_ranges(&[(f64::NEG_INFINITY, 1.0)]).unwrap_err();
        assert!(matches!(err, SearchSpaceError::NonFiniteBounds { dimension: 0, .. }));
    }

    #[test]
    fn overflowing_width_is_rejected() {
        let err = SearchSpace::from_ranges(&[(0.0, 1.0), (-1e308, 1e308)]).unwrap_err();
        assert!(matches!(err, SearchSpaceError::UnboundedWidth { dimension: 1, .. }));
        assert!(serde_json::from_str::<SearchSpace>("[[-1e308, 1e308]]").is_err());

        // Wide but representable axes still have a finite midpoint.
        let space = SearchSpace::from_ranges(&[(-1e307, 1e307)]).unwrap();
        assert_eq!(space.bounds()[0].width(), 2e307);
        assert!(space.midpoint().is_finite());
    }

    #[test]
    fn degenerate_dimension_is_allowed() {
        let space = SearchSpace::from_ranges(&[(2.0, 2.0)]).unwrap();
        assert_eq!(space.midpoint().to_vec(), vec![2.0]);
    }

    #[test]
    fn midpoint_is_centre_of_each_axis() {
        let space = SearchSpace::from_ranges(&[(1.0, 120.0), (1.0, 180.0)]).unwrap();
        assert_eq!(space.dimensions(), 2);
        assert_eq!(space.midpoint().to_vec(), vec![60.5, 90.5]);
    }

    #[test]
    fn clamp_pulls_points_back_inside() {
        let space = SearchSpace::from_ranges(&[(0.0, 1.0), (-1.0, 1.0)]).unwrap();
        let mut point = vec![1.5, -3.0];
        space.clamp(&mut point);
        assert_eq!(point, vec![1.0, -1.0]);
        assert!(space.contains(&point));
    }

    #[test]
    fn dimension_check() {
        let space = SearchSpace::from_ranges(&[(0.0, 1.0)]).unwrap();
        assert!(space.check_dimensions(&[0.5]).is_ok());
        assert_eq!(
            space.check_dimensions(&[0.5, 0.5]),
            Err(SearchSpaceError::DimensionMismatch {
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn deserialize_validates() {
        let space: SearchSpace = serde_json::from_str("[[1, 120], [1, 180]]").unwrap();
        assert_eq!(space.bounds()[1], Bounds::new(1.0, 180.0));

        let named: SearchSpace =
            serde_json::from_str(r#"{"bounds": [{"low": -1, "high": 1}]}"#).unwrap();
        assert_eq!(named.dimensions(), 1);

        assert!(serde_json::from_str::<SearchSpace>("[]").is_err());
        assert!(serde_json::from_str::<SearchSpace>("[[2, 1]]").is_err());
    }

    #[test]
    fn hypothesis_display_and_finiteness() {
        let h = Hypothesis::new(vec![1.0, 2.5]);
        assert_eq!(h.to_string(), "[1.000000, 2.500000]");
        assert!(h.is_finite());
        assert!(!Hypothesis::new(vec![f64::NAN]).is_finite());
    }
}
