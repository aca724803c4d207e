use std::time::Duration;

use ramp_core::SolveLimits;
use thiserror::Error;

/// Configuration for the homotopy solver.
///
/// All step quantities are fractions of the total distance from the starting
/// values to the targets.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Initial step size.
    pub step_init: f64,

    /// Factor applied to the step after a rejected solve.
    pub step_cut: f64,

    /// Gain applied when rescaling the step after an accepted solve.
    ///
    /// Zero keeps the step size constant.
    pub step_accel: f64,

    /// Solver iteration count the step size is tuned toward.
    ///
    /// Solves finishing in fewer iterations grow the step; solves taking more
    /// shrink it.
    pub iter_target: usize,

    /// Largest allowed step.
    pub max_step: f64,

    /// Smallest allowed step.
    ///
    /// A rejected solve at this step size ends the continuation.
    pub min_step: f64,

    /// Maximum number of solve attempts, accepted or rejected.
    pub max_eval: usize,

    /// Iteration cap for each solve attempt.
    pub max_solver_iterations: usize,

    /// Wall-clock cap for each solve attempt.
    pub max_solver_time: Option<Duration>,

    /// Whether to solve once at the starting point before moving any input.
    pub check_initial: bool,
}

/// Errors that can occur when validating a homotopy config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("step_init must be in (0, 1]")]
    StepInit,

    #[error("step_cut must be in (0, 1)")]
    StepCut,

    #[error("step_accel must be finite and non-negative")]
    StepAccel,

    #[error("iter_target must be at least 1")]
    IterTarget,

    #[error("max_step must be in (0, 1]")]
    MaxStep,

    #[error("min_step must be in (0, 1]")]
    MinStep,

    #[error("min_step must not exceed max_step")]
    StepRange,

    #[error("step_init must lie between min_step and max_step")]
    StepInitRange,

    #[error("max_eval must be at least 1")]
    MaxEval,

    #[error("max_solver_iterations must be at least 1")]
    MaxSolverIterations,

    #[error("max_solver_time must be positive")]
    MaxSolverTime,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            step_init: 0.1,
            step_cut: 0.5,
            step_accel: 0.5,
            iter_target: 4,
            max_step: 1.0,
            min_step: 0.05,
            max_eval: 200,
            max_solver_iterations: 50,
            max_solver_time: Some(Duration::from_secs(10)),
            check_initial: true,
        }
    }
}

impl Config {
    /// Checks that every option is in range and the step bounds are consistent.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !in_unit_interval(self.step_init) {
            return Err(ConfigError::StepInit);
        }
        if !(self.step_cut > 0.0 && self.step_cut < 1.0) {
            return Err(ConfigError::StepCut);
        }
        if !self.step_accel.is_finite() || self.step_accel < 0.0 {
            return Err(ConfigError::StepAccel);
        }
        if self.iter_target == 0 {
            return Err(ConfigError::IterTarget);
        }
        if !in_unit_interval(self.max_step) {
            return Err(ConfigError::MaxStep);
        }
        if !in_unit_interval(self.min_step) {
            return Err(ConfigError::MinStep);
        }
        if self.min_step > self.max_step {
            return Err(ConfigError::StepRange);
        }
        if self.step_init < self.min_step || self.step_init > self.max_step {
            return Err(ConfigError::StepInitRange);
        }
        if self.max_eval == 0 {
            return Err(ConfigError::MaxEval);
        }
        if self.max_solver_iterations == 0 {
            return Err(ConfigError::MaxSolverIterations);
        }
        if self.max_solver_time.is_some_and(|t| t.is_zero()) {
            return Err(ConfigError::MaxSolverTime);
        }
        Ok(())
    }

    /// Per-call limits handed to the external solver.
    #[must_use]
    pub fn solve_limits(&self) -> SolveLimits {
        SolveLimits {
            max_iterations: self.max_solver_iterations,
            max_time: self.max_solver_time,
        }
    }
}

/// `true` for finite values in `(0, 1]`.
fn in_unit_interval(value: f64) -> bool {
    value > 0.0 && value <= 1.0
}
