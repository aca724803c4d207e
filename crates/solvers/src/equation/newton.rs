//! Dense Newton-Raphson for square equation systems.
//!
//! Each iteration evaluates the equality residuals `f` at the current free
//! values, builds the Jacobian `J` column by column by seeding one free
//! variable's dual part, and solves `J dx = f` with an LU decomposition. The
//! free variables are then updated to `x - dx`.
//!
//! A singular Jacobian is shifted to `J + δI`, with `δ` scaled by the largest
//! Jacobian entry, and the attempt is reported as regularized.
//!
//! Once `max |f| <= tolerance`, bounds and inequality constraints are checked
//! against `feasibility_tol`; a converged point that violates either is
//! reported as [`TerminationCondition::Infeasible`].

mod config;
mod error;

pub use config::{Config, ConfigError};
pub use error::Error;

use std::time::Instant;

use log::{debug, trace};
use nalgebra::{DMatrix, DVector};
use num_dual::Dual64;
use ramp_core::{
    EquationSystem, SolveLimits, SolveReport, Solver, TerminationCondition, VarId,
    system::Constraint,
};

/// Newton-Raphson solver for an [`EquationSystem`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Newton {
    config: Config,
}

impl Newton {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self { config }
    }
}

impl Solver<EquationSystem> for Newton {
    type Error = Error;

    fn solve(
        &mut self,
        system: &mut EquationSystem,
        limits: &SolveLimits,
    ) -> Result<SolveReport, Error> {
        self.config.validate()?;

        let free = system.free_vars();
        let equations = system.equalities().count();
        if equations != free.len() {
            return Err(Error::NotSquare {
                equations,
                unknowns: free.len(),
            });
        }

        let start = Instant::now();
        let mut regularized = false;
        let mut iterations = 0;

        let termination = loop {
            let residuals = DVector::from_vec(system.equality_residuals());
            if residuals.iter().any(|r| !r.is_finite()) {
                break TerminationCondition::Failed;
            }

            let norm = max_abs(residuals.iter());
            trace!("newton: iteration {iterations}, max residual {norm:e}");

            if norm <= self.config.tolerance {
                break self.feasibility(system);
            }
            if iterations >= limits.max_iterations {
                break TerminationCondition::MaxIterations;
            }
            if limits.max_time.is_some_and(|max| start.elapsed() >= max) {
                break TerminationCondition::MaxTime;
            }

            let jacobian = jacobian(system, &free);
            let delta = match jacobian.clone().lu().solve(&residuals) {
                Some(delta) => delta,
                None => {
                    regularized = true;
                    let n = free.len();
                    let shift = self.config.regularization * max_abs(jacobian.iter()).max(1.0);
                    let shifted = jacobian + DMatrix::<f64>::identity(n, n) * shift;
                    match shifted.lu().solve(&residuals) {
                        Some(delta) => delta,
                        None => break TerminationCondition::Failed,
                    }
                }
            };

            iterations += 1;
            if !update(system, &free, &delta) {
                break TerminationCondition::Failed;
            }
        };

        debug!("newton: {termination:?} after {iterations} iteration(s)");

        Ok(SolveReport {
            termination,
            iterations,
            regularized,
        })
    }
}

impl Newton {
    /// Classifies a converged point by its bound and inequality violations.
    fn feasibility(&self, system: &EquationSystem) -> TerminationCondition {
        let tol = self.config.feasibility_tol;
        let bounds = system.max_bound_violation();
        let inequalities = system.inequality_values().into_iter().fold(0.0, f64::max);

        if bounds > tol || inequalities > tol {
            debug!(
                "newton: converged point is infeasible \
                 (bounds {bounds:e}, inequalities {inequalities:e})"
            );
            TerminationCondition::Infeasible
        } else {
            TerminationCondition::Optimal
        }
    }
}

/// Jacobian of the equalities with respect to the free variables.
fn jacobian(system: &EquationSystem, free: &[VarId]) -> DMatrix<f64> {
    let equalities: Vec<&Constraint> = system.equalities().collect();
    let mut jacobian = DMatrix::zeros(equalities.len(), free.len());

    let mut values = system.dual_values();
    for (col, var) in free.iter().enumerate() {
        let value = values[var.index()].re;
        values[var.index()] = Dual64::new(value, 1.0);
        for (row, constraint) in equalities.iter().enumerate() {
            jacobian[(row, col)] = constraint.evaluate(&values).eps;
        }
        values[var.index()] = Dual64::new(value, 0.0);
    }

    jacobian
}

/// Applies `x <- x - delta` to the free variables.
///
/// Returns `false` if any updated value is not finite.
fn update(system: &mut EquationSystem, free: &[VarId], delta: &DVector<f64>) -> bool {
    free.iter()
        .zip(delta.iter())
        .all(|(&var, dx)| {
            system.set_value(var, system.value(var) - dx).is_ok()
        })
}

fn max_abs<'a>(values: impl Iterator<Item = &'a f64>) -> f64 {
    values.fold(0.0, |max, v| max.max(v.abs()))
}
