//! Solvers for square systems of nonlinear equations.
//!
//! # Solvers
//!
//! - [`newton`] — dense Newton-Raphson with exact dual-number Jacobians

pub mod newton;
