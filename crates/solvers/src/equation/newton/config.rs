use thiserror::Error;

/// Configuration for the Newton solver.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Largest absolute equality residual accepted as converged.
    pub tolerance: f64,

    /// Largest bound or inequality violation accepted as feasible.
    pub feasibility_tol: f64,

    /// Diagonal shift added to a singular Jacobian, relative to its largest entry.
    pub regularization: f64,
}

/// Errors that can occur when validating a Newton solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tolerance must be finite and positive")]
    Tolerance,

    #[error("feasibility_tol must be finite and non-negative")]
    FeasibilityTol,

    #[error("regularization must be finite and positive")]
    Regularization,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            feasibility_tol: 1e-8,
            regularization: 1e-6,
        }
    }
}

impl Config {
    /// Validates that all tolerances are finite and in range.
    ///
    /// # Errors
    ///
    /// Returns the first tolerance that is out of range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(ConfigError::Tolerance);
        }
        if !self.feasibility_tol.is_finite() || self.feasibility_tol < 0.0 {
            return Err(ConfigError::FeasibilityTol);
        }
        if !self.regularization.is_finite() || self.regularization <= 0.0 {
            return Err(ConfigError::Regularization);
        }
        Ok(())
    }
}
