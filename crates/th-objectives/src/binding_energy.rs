//! Semi-empirical mass formula (liquid drop model) as an objective.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use th_types::{config_error, EvaluationError, Objective, ThResult};

/// Binding energy per nucleon, in MeV, of a nucleus with `Z` protons and
/// `N` neutrons:
///
/// ```text
/// B = a_v·A − a_s·A^(2/3) − a_c·Z(Z−1)/A^(1/3) − a_a·(N−Z)²/A ± a_p/√A
/// score = B / A,   A = Z + N
/// ```
///
/// The pairing term is `+a_p/√A` when the nearest integers to `Z` and `N`
/// are both even, `−a_p/√A` when both are odd, and zero otherwise. The
/// maximum over `Z ∈ [1, 120], N ∈ [1, 180]` sits around iron/nickel
/// (`Z ≈ 26..28`, `N ≈ 32..34`) at roughly 8.8 MeV.
///
/// Points are `[Z, N]`. Non-physical points (`A ≤ 0`) score NaN, which the
/// optimizer skips; a point of the wrong length is an evaluation error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingEnergyPerNucleon {
    /// Volume term coefficient (MeV).
    pub a_v: f64,
    /// Surface term coefficient (MeV).
    pub a_s: f64,
    /// Coulomb term coefficient (MeV).
    pub a_c: f64,
    /// Asymmetry term coefficient (MeV).
    pub a_a: f64,
    /// Pairing term coefficient (MeV).
    pub a_p: f64,
}

impl Default for BindingEnergyPerNucleon {
    fn default() -> Self {
        Self {
            a_v: 15.75,
            a_s: 17.8,
            a_c: 0.711,
            a_a: 23.7,
            a_p: 11.18,
        }
    }
}

impl BindingEnergyPerNucleon {
    pub const PARAMETER_NAMES: [&'static str; 5] = ["a_v", "a_s", "a_c", "a_a", "a_p"];

    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by whichever named coefficients are present.
    pub fn from_params(params: &HashMap<String, f64>) -> ThResult<Self> {
        let mut formula = Self::default();
        for (name, value) in params {
            formula = formula.with_param(name, *value)?;
        }
        Ok(formula)
    }

    pub fn with_param(mut self, name: &str, value: f64) -> ThResult<Self> {
        if !value.is_finite() {
            return Err(config_error!("parameter {name} must be finite, got {value}"));
        }
        let slot = match name {
            "a_v" => &mut self.a_v,
            "a_s" => &mut self.a_s,
            "a_c" => &mut self.a_c,
            "a_a" => &mut self.a_a,
            "a_p" => &mut self.a_p,
            other => {
                return Err(config_error!(
                    "unknown binding energy parameter {other:?}, expected one of {:?}",
                    Self::PARAMETER_NAMES
                ))
            }
        };
        *slot = value;
        Ok(self)
    }

    /// Total binding energy `B` in MeV.
    pub fn binding_energy(&self, protons: f64, neutrons: f64) -> f64 {
        let a = protons + neutrons;
        if a <= 0.0 {
            return f64::NAN;
        }

        let volume = self.a_v * a;
        let surface = self.a_s * a.powf(2.0 / 3.0);
        let coulomb = self.a_c * protons * (protons - 1.0) / a.cbrt();
        let asymmetry = self.a_a * (neutrons - protons).powi(2) / a;
        let pairing = match (is_even(protons), is_even(neutrons)) {
            (true, true) => self.a_p / a.sqrt(),
            (false, false) => -self.a_p / a.sqrt(),
            _ => 0.0,
        };

        volume - surface - coulomb - asymmetry + pairing
    }

    /// `B / A` in MeV per nucleon.
    pub fn per_nucleon(&self, protons: f64, neutrons: f64) -> f64 {
        self.binding_energy(protons, neutrons) / (protons + neutrons)
    }
}

fn is_even(count: f64) -> bool {
    count.round().rem_euclid(2.0) == 0.0
}

impl Objective for BindingEnergyPerNucleon {
    fn evaluate(&self, x: &[f64]) -> Result<f64, EvaluationError> {
        match x {
            [protons, neutrons] => Ok(self.per_nucleon(*protons, *neutrons)),
            _ => Err(EvaluationError::new(format!(
                "binding energy expects [Z, N], got {} coordinates",
                x.len()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nickel_62_is_near_the_peak() {
        let semf = BindingEnergyPerNucleon::default();
        let ni62 = semf.per_nucleon(28.0, 34.0);
        assert!(ni62 > 8.8 && ni62 < 8.9, "Ni-62 scored {ni62}");
    }

    #[test]
    fn integer_grid_peak_is_iron_nickel_region() {
        let semf = BindingEnergyPerNucleon::default();
        let mut best = (f64::NEG_INFINITY, 0, 0);
        for z in 1..=120 {
            for n in 1..=180 {
                let score = semf.per_nucleon(z as f64, n as f64);
                if score > best.0 {
                    best = (score, z, n);
                }
            }
        }
        let (score, z, n) = best;
        assert!((20..=35).contains(&z) && (25..=40).contains(&n), "peak at Z={z} N={n}");
        assert!(score > 8.8 && score < 8.9);
    }

    #[test]
    fn pairing_term_sign() {
        let semf = BindingEnergyPerNucleon::default();
        let no_pairing = BindingEnergyPerNucleon { a_p: 0.0, ..semf };
        assert!(semf.binding_energy(28.0, 34.0) > no_pairing.binding_energy(28.0, 34.0));
        assert!(semf.binding_energy(27.0, 35.0) < no_pairing.binding_energy(27.0, 35.0));
        assert_eq!(semf.binding_energy(27.0, 34.0), no_pairing.binding_energy(27.0, 34.0));
    }

    #[test]
    fn non_physical_points_score_nan() {
        let semf = BindingEnergyPerNucleon::default();
        assert!(semf.evaluate(&[-5.0, 3.0]).unwrap().is_nan());
        assert!(semf.evaluate(&[0.0, 0.0]).unwrap().is_nan());
    }

    #[test]
    fn wrong_dimensionality_is_an_error() {
        let semf = BindingEnergyPerNucleon::default();
        assert!(semf.evaluate(&[26.0]).is_err());
        assert!(semf.evaluate(&[26.0, 30.0, 1.0]).is_err());
    }

    #[test]
    fn named_parameters_override_defaults() {
        let mut params = HashMap::new();
        params.insert("a_p".to_string(), 0.0);
        params.insert("a_v".to_string(), 16.0);
        let semf = BindingEnergyPerNucleon::from_params(&params).unwrap();
        assert_eq!(semf.a_p, 0.0);
        assert_eq!(semf.a_v, 16.0);
        assert_eq!(semf.a_s, BindingEnergyPerNucleon::default().a_s);

        params.insert("hbar".to_string(), 1.0);
        assert!(BindingEnergyPerNucleon::from_params(&params).is_err());
    }

    #[test]
    fn deserializes_with_defaults() {
        let semf: BindingEnergyPerNucleon = serde_json::from_str(r#"{"a_c": 0.7}"#).unwrap();
        assert_eq!(semf.a_c, 0.7);
        assert_eq!(semf.a_a, 23.7);
    }
}
