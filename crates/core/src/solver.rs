use std::time::Duration;

use crate::Model;

/// How a single solve attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationCondition {
    /// Converged to a point satisfying every constraint.
    Optimal,

    /// Converged, or stalled, at a point that violates a bound or inequality.
    Infeasible,

    /// Reached the per-call iteration cap.
    MaxIterations,

    /// Reached the per-call wall-clock cap.
    MaxTime,

    /// Stopped on a numerical failure (non-finite residuals, unsolvable step).
    Failed,
}

impl TerminationCondition {
    /// Returns `true` for [`TerminationCondition::Optimal`].
    #[must_use]
    pub fn is_optimal(self) -> bool {
        matches!(self, Self::Optimal)
    }
}

/// Per-call limits handed to a [`Solver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveLimits {
    pub max_iterations: usize,
    pub max_time: Option<Duration>,
}

/// Outcome of a single solve attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveReport {
    /// How the attempt terminated.
    pub termination: TerminationCondition,

    /// Iterations the solver actually used.
    pub iterations: usize,

    /// Whether the solver had to regularize its linear system.
    pub regularized: bool,
}

impl SolveReport {
    /// Creates a report for an attempt that did not need regularization.
    #[must_use]
    pub fn new(termination: TerminationCondition, iterations: usize) -> Self {
        Self {
            termination,
            iterations,
            regularized: false,
        }
    }
}

/// An external nonlinear solver that converges a model in place.
///
/// Non-convergence is not an error: it is reported through
/// [`SolveReport::termination`]. The `Err` path is reserved for a solver that
/// cannot run at all on the given model.
pub trait Solver<M: Model> {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Solves `model`, updating its free variables as a side effect.
    ///
    /// # Errors
    ///
    /// Returns an error if the solver cannot be applied to the model.
    fn solve(&mut self, model: &mut M, limits: &SolveLimits) -> Result<SolveReport, Self::Error>;
}
