//! Core traits and types for the Ramp continuation framework.
//!
//! This crate defines the shared abstractions that the continuation driver,
//! equation solvers, and observers build on:
//!
//! - [`Model`] — a mutable set of variables whose fixed values can be moved
//!   and whose full state can be saved and restored
//! - [`Solver`] — an external nonlinear solver that converges a [`Model`] in
//!   place and reports how it terminated
//! - [`TerminationCondition`], [`SolveLimits`], [`SolveReport`] — the data
//!   exchanged across a single solve call
//! - [`Observer`] — receives solver events and optionally returns control actions
//! - [`EquationSystem`] — an in-memory equation-oriented model with exact
//!   Jacobians via forward-mode dual numbers

mod model;
mod observer;
mod solver;

pub mod system;

pub use model::Model;
pub use observer::Observer;
pub use solver::{SolveLimits, SolveReport, Solver, TerminationCondition};
pub use system::{EquationSystem, VarId};
