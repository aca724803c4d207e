//! Continuation solvers — moving a model's inputs from a known-feasible state
//! to a target state through a sequence of nearby, individually solvable states.
//!
//! A continuation solver does not solve equations itself. It perturbs the
//! fixed inputs of a [`Model`] and hands each intermediate state to an
//! external [`Solver`], accepting or rejecting the step based on how that
//! solve terminated.
//!
//! # Solvers
//!
//! - [`homotopy`] — linear interpolation of inputs with adaptive step control
//!
//! [`Model`]: ramp_core::Model
//! [`Solver`]: ramp_core::Solver

pub mod homotopy;
