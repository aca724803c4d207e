use ramp_core::{Model, SolveReport};

/// Events emitted by the homotopy solver, one per solve attempt.
///
/// Both variants carry the model as it stands after the attempt has been
/// handled: at the new point for [`Event::Accepted`], restored to the last
/// accepted point for [`Event::Rejected`].
pub enum Event<'a, M: Model> {
    /// The solve converged and the step was accepted.
    Accepted {
        /// The model at the accepted point.
        model: &'a M,

        /// Progress after accepting the step.
        progress: f64,

        /// Step size for the next attempt.
        step: f64,

        /// Solve attempts so far.
        evaluations: usize,

        /// The external solver's report.
        report: SolveReport,
    },

    /// The solve failed and the model was restored.
    Rejected {
        /// The model, restored to the last accepted point.
        model: &'a M,

        /// Progress the failed attempt was aiming for.
        attempted: f64,

        /// Progress of the last accepted point.
        progress: f64,

        /// Step size for the next attempt.
        step: f64,

        /// Solve attempts so far.
        evaluations: usize,

        /// The external solver's report.
        report: SolveReport,
    },
}

impl<'a, M: Model> Event<'a, M> {
    /// Returns the model as left by this attempt.
    #[must_use]
    pub fn model(&self) -> &'a M {
        match self {
            Self::Accepted { model, .. } | Self::Rejected { model, .. } => model,
        }
    }

    /// Returns the progress of the last accepted point.
    #[must_use]
    pub fn progress(&self) -> f64 {
        match self {
            Self::Accepted { progress, .. } | Self::Rejected { progress, .. } => *progress,
        }
    }

    /// Returns the step size that the next attempt will use.
    #[must_use]
    pub fn step(&self) -> f64 {
        match self {
            Self::Accepted { step, .. } | Self::Rejected { step, .. } => *step,
        }
    }

    /// Returns the number of solve attempts so far.
    #[must_use]
    pub fn evaluations(&self) -> usize {
        match self {
            Self::Accepted { evaluations, .. } | Self::Rejected { evaluations, .. } => *evaluations,
        }
    }

    /// Returns the external solver's report for this attempt.
    #[must_use]
    pub fn report(&self) -> SolveReport {
        match self {
            Self::Accepted { report, .. } | Self::Rejected { report, .. } => *report,
        }
    }

    /// Returns `true` if the attempt was accepted.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}
