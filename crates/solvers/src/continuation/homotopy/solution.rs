/// How the continuation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Every variable reached its target and the model converged there.
    Optimal,

    /// The model failed to converge at the starting point.
    Infeasible,

    /// A solve failed with the step already at its minimum size.
    MinStepLength,

    /// The evaluation budget ran out before the targets were reached.
    MaxEvaluations,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

/// The result of a homotopy continuation.
///
/// For every status other than [`Status::Optimal`], the model is left at the
/// last accepted point, which is a converged state of a prior solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    /// Final solver status.
    pub status: Status,

    /// Fraction of the distance to the targets that was traversed, in `[0, 1]`.
    pub progress: f64,

    /// Number of solve attempts made, excluding the initial feasibility check.
    pub evaluations: usize,

    /// Step size when the solver finished.
    pub step: f64,

    /// Accepted solves in which the external solver regularized.
    pub regularized_steps: usize,
}

impl Solution {
    /// Returns `(status, progress, evaluations)`.
    #[must_use]
    pub fn as_tuple(&self) -> (Status, f64, usize) {
        (self.status, self.progress, self.evaluations)
    }

    pub(super) fn infeasible(step: f64) -> Self {
        Self {
            status: Status::Infeasible,
            progress: 0.0,
            evaluations: 0,
            step,
            regularized_steps: 0,
        }
    }
}
