//! Solvers for the Ramp framework.
//!
//! - [`continuation::homotopy`] — walks a model's fixed inputs from a
//!   converged starting point to target values through a sequence of
//!   adaptively sized intermediate solves
//! - [`equation::newton`] — a dense Newton solver for
//!   [`EquationSystem`](ramp_core::EquationSystem) models

pub mod continuation;
pub mod equation;
