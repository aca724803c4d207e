//! Homotopy continuation with adaptive step control.
//!
//! # Algorithm
//!
//! Starting from a model that converges with its homotopy variables fixed at
//! their current values, the solver moves all variables toward their targets
//! in lockstep. Progress `p` runs from 0 to 1, and each variable is fixed at
//! `start + p * (target - start)`. Each step fixes the variables at the next
//! candidate progress and calls the external [`Solver`]:
//!
//! - **Accepted** (optimal termination): progress advances and the step is
//!   rescaled by `1 + step_accel * (iter_target / iterations - 1)`, clamped to
//!   `[min_step, max_step]`. Easy solves grow the step; hard ones shrink it.
//! - **Rejected** (any other termination): the model is restored to the last
//!   accepted state and the step is cut by `step_cut`, floored at `min_step`.
//!   A rejection with the step already at `min_step` ends the run.
//!
//! A step that would overshoot the target is shortened to land on it exactly.
//! If every variable already sits at its target, a single solve is made there
//! and a rejection ends the run without cutting the step.
//!
//! # Termination
//!
//! - [`Status::Optimal`] — progress reached 1; variables sit at their targets
//! - [`Status::Infeasible`] — the initial check at the starting point failed
//! - [`Status::MinStepLength`] — a minimum-size step was rejected
//! - [`Status::MaxEvaluations`] — `max_eval` solve attempts were used up
//! - [`Status::StoppedByObserver`] — an observer returned [`Action::StopEarly`]
//!
//! On every non-optimal outcome, and when the external solver returns an
//! error, the model holds the last accepted state.
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per solve attempt, after the attempt has
//! been accepted or rejected. The initial check emits no event.

mod action;
mod config;
mod error;
mod event;
mod path;
mod solution;
mod state;

#[cfg(test)]
mod tests;

pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};

use log::{debug, error, info, warn};
use ramp_core::{Model, Observer, Solver};

use path::Path;
use state::State;

/// Moves `variables` to `targets`, re-solving `model` along the way.
///
/// Each entry of `variables` must be fixed in `model`; its current value is
/// the start of its path and the entry of `targets` at the same position is
/// the end. The observer receives an [`Event`] after every solve attempt.
///
/// # Errors
///
/// Returns an error if the config is invalid, the variables or targets are
/// invalid, or the external solver cannot run on the model.
pub fn solve<M, S, Obs>(
    model: &mut M,
    solver: &mut S,
    variables: &[M::Var],
    targets: &[f64],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    M: Model,
    S: Solver<M>,
    Obs: for<'a> Observer<Event<'a, M>, Action>,
{
    config.validate()?;
    let path = Path::new(&*model, variables, targets)?;
    let limits = config.solve_limits();

    info!(
        "homotopy: moving {} variable(s) toward their targets",
        path.len()
    );

    if config.check_initial {
        let report = solver.solve(model, &limits).map_err(Error::solver)?;
        if !report.termination.is_optimal() {
            error!(
                "homotopy: model did not converge at the starting point ({:?})",
                report.termination
            );
            return Ok(Solution::infeasible(config.step_init));
        }
        debug!(
            "homotopy: starting point converged in {} iteration(s)",
            report.iterations
        );
    }

    // A path with nowhere to go gets one solve at the target.
    let stationary = path.is_stationary();
    let mut state = State::new(model.snapshot(), config.step_init);

    while state.progress() < 1.0 {
        let candidate = if stationary {
            state.target_candidate()
        } else {
            state.next_candidate()
        };
        path.apply(model, candidate);

        let report = solver.solve(model, &limits).map_err(|err| {
            model.restore(state.converged());
            Error::solver(err)
        })?;

        let action = if report.termination.is_optimal() {
            state.accept(candidate, model.snapshot(), &report, config);
            if report.regularized {
                warn!(
                    "homotopy: solver regularized at progress {candidate}, holding step at {}",
                    state.step()
                );
            }
            debug!(
                "homotopy: accepted progress {candidate} in {} iteration(s), next step {}",
                report.iterations,
                state.step()
            );

            observer.observe(&Event::Accepted {
                model: &*model,
                progress: state.progress(),
                step: state.step(),
                evaluations: state.evaluations(),
                report,
            })
        } else {
            model.restore(state.converged());
            let exhausted = stationary || !state.cut(config);
            debug!(
                "homotopy: rejected progress {candidate} ({:?}), next step {}",
                report.termination,
                state.step()
            );

            let action = observer.observe(&Event::Rejected {
                model: &*model,
                attempted: candidate,
                progress: state.progress(),
                step: state.step(),
                evaluations: state.evaluations(),
                report,
            });

            if exhausted && action.is_none() {
                info!(
                    "homotopy: minimum step rejected, stopping at progress {}",
                    state.progress()
                );
                return Ok(state.into_solution(Status::MinStepLength));
            }
            action
        };

        if let Some(Action::StopEarly) = action {
            info!(
                "homotopy: stopped by observer at progress {}",
                state.progress()
            );
            return Ok(state.into_solution(Status::StoppedByObserver));
        }

        if state.evaluations() >= config.max_eval && state.progress() < 1.0 {
            info!(
                "homotopy: evaluation budget used up at progress {}",
                state.progress()
            );
            return Ok(state.into_solution(Status::MaxEvaluations));
        }
    }

    info!(
        "homotopy: reached targets after {} evaluation(s)",
        state.evaluations()
    );
    Ok(state.into_solution(Status::Optimal))
}

/// Moves `variables` to `targets` without observation.
///
/// This is a convenience wrapper around [`solve`] that uses a no-op observer.
///
/// # Errors
///
/// Returns an error if the config is invalid, the variables or targets are
/// invalid, or the external solver cannot run on the model.
pub fn solve_unobserved<M, S>(
    model: &mut M,
    solver: &mut S,
    variables: &[M::Var],
    targets: &[f64],
    config: &Config,
) -> Result<Solution, Error>
where
    M: Model,
    S: Solver<M>,
{
    solve(model, solver, variables, targets, config, ())
}
