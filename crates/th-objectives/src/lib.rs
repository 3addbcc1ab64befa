//! Objective functions used to demonstrate and test the optimizer.
//!
//! - [`BindingEnergyPerNucleon`]: semi-empirical mass formula over `(Z, N)`
//!   with named, overridable coefficients
//! - [`NegativeSumOfSquares`]: smooth bowl with a single maximum

pub mod benchmarks;
pub mod binding_energy;

pub use benchmarks::NegativeSumOfSquares;
pub use binding_energy::BindingEnergyPerNucleon;
