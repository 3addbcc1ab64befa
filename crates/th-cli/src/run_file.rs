//! JSON run description consumed by the `two-handed` binary.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use th_objectives::{BindingEnergyPerNucleon, NegativeSumOfSquares};
use th_optimizer::OptimizerConfig;
use th_types::{Objective, SearchSpace, ThResult};

/// Which objective to maximize, plus its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObjectiveSpec {
    /// Semi-empirical mass formula over `[Z, N]`. `params` overrides any of
    /// `a_v`, `a_s`, `a_c`, `a_a`, `a_p`.
    BindingEnergy {
        #[serde(default)]
        params: HashMap<String, f64>,
    },
    /// `−Σ (x_i − c_i)²`.
    SumOfSquares {
        #[serde(default)]
        center: Vec<f64>,
    },
}

impl ObjectiveSpec {
    pub fn build(&self) -> ThResult<Box<dyn Objective>> {
        let objective: Box<dyn Objective> = match self {
            Self::BindingEnergy { params } => {
                Box::new(BindingEnergyPerNucleon::from_params(params)?)
            }
            Self::SumOfSquares { center } => {
                Box::new(NegativeSumOfSquares::centered_at(center.clone()))
            }
        };
        Ok(objective)
    }
}

/// A complete run: search space, optimizer settings and objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunFile {
    pub ranges: SearchSpace,
    #[serde(default)]
    pub optimizer: OptimizerConfig,
    pub objective: ObjectiveSpec,
}

impl RunFile {
    pub fn load(path: &Path) -> ThResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// The binding-energy demonstration over the nuclear chart.
    pub fn binding_energy_demo() -> ThResult<Self> {
        Ok(Self {
            ranges: SearchSpace::from_ranges(&[(1.0, 120.0), (1.0, 180.0)])?,
            optimizer: OptimizerConfig::default(),
            objective: ObjectiveSpec::BindingEnergy {
                params: HashMap::new(),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_run_file() {
        let json = r#"{
            "ranges": [[1, 120], [1, 180]],
            "optimizer": {"seed": 3, "num_iterations": 500, "clamp_to_bounds": true},
            "objective": {"kind": "binding_energy", "params": {"a_p": 12.0}}
        }"#;
        let run: RunFile = serde_json::from_str(json).unwrap();
        assert_eq!(run.ranges.dimensions(), 2);
        assert_eq!(run.optimizer.seed, Some(3));
        assert_eq!(run.optimizer.num_iterations, 500);
        assert!(run.optimizer.clamp_to_bounds);
        assert_eq!(run.optimizer.learning_rate, 0.01);

        let objective = run.objective.build().unwrap();
        assert!(objective.evaluate(&[26.0, 30.0]).unwrap() > 8.0);
    }

    #[test]
    fn optimizer_section_is_optional() {
        let json = r#"{"ranges": [[-1, 1]], "objective": {"kind": "sum_of_squares"}}"#;
        let run: RunFile = serde_json::from_str(json).unwrap();
        assert_eq!(run.optimizer, OptimizerConfig::default());
        assert_eq!(run.objective.build().unwrap().evaluate(&[0.5]).unwrap(), -0.25);
    }

    #[test]
    fn unknown_objective_parameter_fails_to_build() {
        let spec = ObjectiveSpec::BindingEnergy {
            params: HashMap::from([("speed_of_light".to_string(), 1.0)]),
        };
        assert!(spec.build().is_err());
    }

    #[test]
    fn invalid_ranges_are_rejected() {
        let json = r#"{"ranges": [], "objective": {"kind": "sum_of_squares"}}"#;
        assert!(serde_json::from_str::<RunFile>(json).is_err());
    }

    #[test]
    fn demo_round_trips_through_json() {
        let demo = RunFile::binding_energy_demo().unwrap();
        let json = serde_json::to_string(&demo).unwrap();
        let back: RunFile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, demo);
    }
}
