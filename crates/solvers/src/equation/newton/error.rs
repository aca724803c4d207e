use thiserror::Error;

use super::ConfigError;

/// Errors that prevent the Newton solver from running.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error(
        "system is not square: {equations} equalities for {unknowns} free variables"
    )]
    NotSquare { equations: usize, unknowns: usize },
}
