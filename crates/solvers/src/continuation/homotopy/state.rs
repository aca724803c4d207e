use ramp_core::SolveReport;

use super::{Config, Solution, Status};

/// Progress within this distance of 1 is treated as having reached the target.
const LANDING_TOL: f64 = 1e-9;

/// Mutable continuation state for a single run.
pub(super) struct State<S> {
    progress: f64,
    step: f64,
    evaluations: usize,
    regularized_steps: usize,
    converged: S,
}

impl<S> State<S> {
    /// Starts at progress 0 with the model's converged starting snapshot.
    pub(super) fn new(converged: S, step: f64) -> Self {
        Self {
            progress: 0.0,
            step,
            evaluations: 0,
            regularized_steps: 0,
            converged,
        }
    }

    pub(super) fn progress(&self) -> f64 {
        self.progress
    }

    pub(super) fn step(&self) -> f64 {
        self.step
    }

    pub(super) fn evaluations(&self) -> usize {
        self.evaluations
    }

    /// Snapshot of the last accepted point.
    pub(super) fn converged(&self) -> &S {
        &self.converged
    }

    /// Returns the progress to attempt next and counts the evaluation.
    ///
    /// A step that would reach or overshoot the target is shortened to land
    /// on it exactly; the shortened step is kept for subsequent cuts.
    pub(super) fn next_candidate(&mut self) -> f64 {
        self.evaluations += 1;
        if self.progress + self.step >= 1.0 - LANDING_TOL {
            self.step = 1.0 - self.progress;
            1.0
        } else {
            self.progress + self.step
        }
    }

    /// Returns the target itself as the candidate and counts the evaluation.
    ///
    /// Used when every variable already sits at its target; the step is left
    /// as configured.
    pub(super) fn target_candidate(&mut self) -> f64 {
        self.evaluations += 1;
        1.0
    }

    /// Accepts a converged solve at `candidate` and rescales the step.
    ///
    /// The step is scaled by `1 + step_accel * (iter_target / iterations - 1)`
    /// and clamped to `[min_step, max_step]`. A regularized solve leaves the
    /// step unchanged.
    pub(super) fn accept(
        &mut self,
        candidate: f64,
        snapshot: S,
        report: &SolveReport,
        config: &Config,
    ) {
        self.progress = candidate;
        self.converged = snapshot;

        if report.regularized {
            self.regularized_steps += 1;
            return;
        }

        #[allow(clippy::cast_precision_loss)]
        let ratio = config.iter_target as f64 / report.iterations.max(1) as f64;
        let proposed = self.step * (1.0 + config.step_accel * (ratio - 1.0));
        self.step = proposed.clamp(config.min_step, config.max_step);
    }

    /// Cuts the step after a rejected solve.
    ///
    /// Returns `false` without changing the step when it is already at or
    /// below `min_step`, meaning no smaller step remains to try.
    pub(super) fn cut(&mut self, config: &Config) -> bool {
        if self.step > config.min_step {
            self.step = (self.step * config.step_cut).max(config.min_step);
            true
        } else {
            false
        }
    }

    pub(super) fn into_solution(self, status: Status) -> Solution {
        Solution {
            status,
            progress: self.progress,
            evaluations: self.evaluations,
            step: self.step,
            regularized_steps: self.regularized_steps,
        }
    }
}
