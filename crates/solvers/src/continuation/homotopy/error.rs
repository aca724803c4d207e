use std::error::Error as StdError;

use thiserror::Error;

use super::ConfigError;

/// Errors that can occur during homotopy continuation.
///
/// Every variant except [`Error::Solver`] is raised before the first solve.
/// Non-convergence of an individual solve is never an error; it is handled
/// by cutting the step.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("no homotopy variables given")]
    NoVariables,

    #[error("got {variables} variables but {targets} targets")]
    LengthMismatch { variables: usize, targets: usize },

    #[error("homotopy variable {index} is not fixed")]
    NotFixed { index: usize },

    #[error("homotopy variable {index} appears more than once")]
    DuplicateVariable { index: usize },

    #[error("target {value} for homotopy variable {index} is not finite")]
    NonFiniteTarget { index: usize, value: f64 },

    #[error(
        "target {target} for homotopy variable {index} is outside its bounds [{lower:?}, {upper:?}]"
    )]
    TargetOutOfBounds {
        index: usize,
        target: f64,
        lower: Option<f64>,
        upper: Option<f64>,
    },

    #[error("solver error: {0}")]
    Solver(#[source] Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub(crate) fn solver<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Solver(Box::new(err))
    }
}
