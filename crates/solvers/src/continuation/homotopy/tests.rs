use std::convert::Infallible;

use approx::assert_relative_eq;
use thiserror::Error;

use ramp_core::{Model, SolveLimits, SolveReport, Solver, TerminationCondition};

use super::{Action, Config, ConfigError, Error, Event, Status, solve, solve_unobserved};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Var {
    X,
    Y,
}

/// `y = x^2` with `x` fixed at 10 and an optional cap `y <= cap`.
#[derive(Debug, Clone)]
struct Quadratic {
    x: f64,
    y: f64,
    x_fixed: bool,
    x_upper: Option<f64>,
    cap: Option<f64>,
}

impl Quadratic {
    fn new() -> Self {
        Self {
            x: 10.0,
            y: 1.0,
            x_fixed: true,
            x_upper: None,
            cap: None,
        }
    }

    fn capped(cap: f64) -> Self {
        Self {
            cap: Some(cap),
            ..Self::new()
        }
    }
}

impl Model for Quadratic {
    type Var = Var;
    type Snapshot = (f64, f64);

    fn is_fixed(&self, var: Var) -> bool {
        match var {
            Var::X => self.x_fixed,
            Var::Y => false,
        }
    }

    fn value(&self, var: Var) -> f64 {
        match var {
            Var::X => self.x,
            Var::Y => self.y,
        }
    }

    fn bounds(&self, var: Var) -> (Option<f64>, Option<f64>) {
        match var {
            Var::X => (None, self.x_upper),
            Var::Y => (None, None),
        }
    }

    fn set_fixed_value(&mut self, var: Var, value: f64) {
        match var {
            Var::X => self.x = value,
            Var::Y => self.y = value,
        }
    }

    fn snapshot(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    fn restore(&mut self, snapshot: &(f64, f64)) {
        (self.x, self.y) = *snapshot;
    }
}

/// Sets `y = x^2` exactly and reports infeasibility when the cap is exceeded.
///
/// Successful solves report iteration counts from `schedule` in order, then 1.
#[derive(Default)]
struct SquareSolver {
    schedule: Vec<usize>,
    converged: usize,
    calls: usize,
    regularize: bool,
}

impl SquareSolver {
    fn with_schedule(schedule: &[usize]) -> Self {
        Self {
            schedule: schedule.to_vec(),
            ..Self::default()
        }
    }
}

impl Solver<Quadratic> for SquareSolver {
    type Error = Infallible;

    fn solve(
        &mut self,
        model: &mut Quadratic,
        _limits: &SolveLimits,
    ) -> Result<SolveReport, Self::Error> {
        self.calls += 1;
        model.y = model.x * model.x;

        if model.cap.is_some_and(|cap| model.y > cap) {
            return Ok(SolveReport::new(TerminationCondition::Infeasible, 3));
        }

        let iterations = self.schedule.get(self.converged).copied().unwrap_or(1);
        self.converged += 1;
        Ok(SolveReport {
            termination: TerminationCondition::Optimal,
            iterations,
            regularized: self.regularize,
        })
    }
}

fn run(model: &mut Quadratic, config: &Config) -> (Status, f64, usize) {
    solve_unobserved(
        model,
        &mut SquareSolver::default(),
        &[Var::X],
        &[20.0],
        config,
    )
    .expect("should run")
    .as_tuple()
}

// --- Termination ---

#[test]
fn reaches_target() {
    let mut model = Quadratic::new();

    let (status, progress, evaluations) = run(&mut model, &Config::default());

    assert_eq!(status, Status::Optimal);
    assert_relative_eq!(progress, 1.0);
    assert_eq!(evaluations, 4);
    assert_relative_eq!(model.x, 20.0);
    assert_relative_eq!(model.y, 400.0);
}

#[test]
fn clamps_overshoot_to_target() {
    let mut model = Quadratic::new();
    let config = Config {
        step_init: 0.6,
        ..Config::default()
    };

    let (status, progress, evaluations) = run(&mut model, &config);

    assert_eq!(status, Status::Optimal);
    assert_relative_eq!(progress, 1.0);
    assert_eq!(evaluations, 2);
    assert_relative_eq!(model.y, 400.0);
}

#[test]
fn stops_at_min_step_length() {
    let mut model = Quadratic::capped(300.0);

    let (status, progress, evaluations) = run(&mut model, &Config::default());

    // 0.1, 0.35 and 0.6625 are accepted, then the step is cut down to
    // min_step, which lands once more at 0.7125 and then keeps failing.
    assert_eq!(status, Status::MinStepLength);
    assert_relative_eq!(progress, 0.7125, epsilon = 1e-12);
    assert_eq!(evaluations, 11);
    assert_relative_eq!(model.x, 17.125, epsilon = 1e-9);
    assert_relative_eq!(model.y, 293.265_625, epsilon = 1e-9);
}

#[test]
fn iteration_counts_shape_the_path() {
    // Slower early solves (as from an interior-point solver while the cap is
    // far from active) keep the first steps short.
    let mut model = Quadratic::capped(300.0);
    let mut solver = SquareSolver::with_schedule(&[1, 5, 3, 4]);

    let solution = solve_unobserved(
        &mut model,
        &mut solver,
        &[Var::X],
        &[20.0],
        &Config::default(),
    )
    .expect("should run");

    assert_eq!(solution.status, Status::MinStepLength);
    assert_relative_eq!(solution.progress, 0.7125, epsilon = 1e-12);
    assert_eq!(solution.evaluations, 12);
    assert_relative_eq!(model.y, 293.265_625, epsilon = 1e-9);
}

#[test]
fn stops_at_max_evaluations() {
    let mut model = Quadratic::new();
    let config = Config {
        max_eval: 2,
        ..Config::default()
    };

    let (status, progress, evaluations) = run(&mut model, &config);

    assert_eq!(status, Status::MaxEvaluations);
    assert_relative_eq!(progress, 0.35, epsilon = 1e-12);
    assert_eq!(evaluations, 2);
    assert_relative_eq!(model.y, 182.25, epsilon = 1e-9);
}

#[test]
fn infeasible_start_returns_immediately() {
    let mut model = Quadratic::capped(50.0);
    let mut solver = SquareSolver::default();

    let solution = solve_unobserved(
        &mut model,
        &mut solver,
        &[Var::X],
        &[20.0],
        &Config::default(),
    )
    .expect("should run");

    assert_eq!(solution.as_tuple(), (Status::Infeasible, 0.0, 0));
    assert_eq!(solver.calls, 1);
    assert_relative_eq!(model.x, 10.0);
}

#[test]
fn without_initial_check_failures_become_step_cuts() {
    let mut model = Quadratic::capped(50.0);
    let config = Config {
        check_initial: false,
        ..Config::default()
    };

    let (status, progress, evaluations) = run(&mut model, &config);

    // Tries 0.1, then min_step 0.05, then gives up.
    assert_eq!(status, Status::MinStepLength);
    assert_relative_eq!(progress, 0.0);
    assert_eq!(evaluations, 2);
    assert_relative_eq!(model.x, 10.0);
}

#[test]
fn rerun_at_target_takes_one_evaluation() {
    let mut model = Quadratic::new();
    run(&mut model, &Config::default());

    let (status, progress, evaluations) = run(&mut model, &Config::default());

    assert_eq!(status, Status::Optimal);
    assert_relative_eq!(progress, 1.0);
    assert_eq!(evaluations, 1);
    assert_relative_eq!(model.x, 20.0);
    assert_relative_eq!(model.y, 400.0);
}

#[test]
fn rejection_at_target_stops_without_cutting() {
    let mut model = Quadratic {
        x: 20.0,
        ..Quadratic::capped(50.0)
    };
    let mut solver = SquareSolver::default();
    let config = Config {
        max_step: 0.1,
        check_initial: false,
        ..Config::default()
    };

    let mut steps = Vec::new();
    let solution = solve(
        &mut model,
        &mut solver,
        &[Var::X],
        &[20.0],
        &config,
        |event: &Event<'_, Quadratic>| {
            steps.push(event.step());
            None
        },
    )
    .expect("should run");

    // The point cannot move, so one failed solve is final.
    assert_eq!(solution.as_tuple(), (Status::MinStepLength, 0.0, 1));
    assert_eq!(solver.calls, 1);
    assert_eq!(steps.len(), 1);
    assert!(steps.iter().all(|&step| step <= config.max_step));
    assert_relative_eq!(model.x, 20.0);
    assert_relative_eq!(model.y, 1.0);
}

// --- Step control ---

#[test]
fn zero_acceleration_takes_equal_steps() {
    let mut model = Quadratic::new();
    let config = Config {
        step_accel: 0.0,
        ..Config::default()
    };

    let (status, progress, evaluations) = run(&mut model, &config);

    assert_eq!(status, Status::Optimal);
    assert_relative_eq!(progress, 1.0);
    assert_eq!(evaluations, 10);
    assert_relative_eq!(model.y, 400.0);
}

#[test]
fn initial_step_sets_step_count() {
    let mut model = Quadratic::new();
    let config = Config {
        step_init: 0.05,
        step_accel: 0.0,
        ..Config::default()
    };

    let (status, _, evaluations) = run(&mut model, &config);

    assert_eq!(status, Status::Optimal);
    assert_eq!(evaluations, 20);
    assert_relative_eq!(model.y, 400.0);
}

#[test]
fn cuts_down_to_min_step() {
    // 4 steps reach x = 14, then 0.1 and 0.025 are rejected.
    let mut model = Quadratic::capped(196.0);
    let config = Config {
        step_init: 0.1,
        min_step: 0.025,
        step_cut: 0.25,
        step_accel: 0.0,
        ..Config::default()
    };

    let (status, progress, evaluations) = run(&mut model, &config);

    assert_eq!(status, Status::MinStepLength);
    assert_relative_eq!(progress, 0.4, epsilon = 1e-12);
    assert_eq!(evaluations, 6);
    assert_relative_eq!(model.y, 196.0, epsilon = 1e-9);
}

#[test]
fn cut_below_min_step_is_floored() {
    // 4 steps reach x = 14, then 0.1, 0.025 and the floored 0.01 are rejected.
    let mut model = Quadratic::capped(196.0);
    let config = Config {
        step_init: 0.1,
        min_step: 0.01,
        step_cut: 0.25,
        step_accel: 0.0,
        ..Config::default()
    };

    let (status, progress, evaluations) = run(&mut model, &config);

    assert_eq!(status, Status::MinStepLength);
    assert_relative_eq!(progress, 0.4, epsilon = 1e-12);
    assert_eq!(evaluations, 7);
    assert_relative_eq!(model.y, 196.0, epsilon = 1e-9);
}

#[test]
fn iter_target_scales_acceleration() {
    let mut model = Quadratic::new();
    let config = Config {
        iter_target: 2,
        ..Config::default()
    };

    let (status, _, evaluations) = run(&mut model, &config);

    assert_eq!(status, Status::Optimal);
    assert_eq!(evaluations, 5);
}

#[test]
fn max_step_caps_acceleration() {
    let mut model = Quadratic::new();
    let config = Config {
        max_step: 0.1,
        ..Config::default()
    };

    let (status, _, evaluations) = run(&mut model, &config);

    assert_eq!(status, Status::Optimal);
    assert_eq!(evaluations, 10);
}

/// Converges in one iteration when `x` has moved at most `reach` since the
/// last converged solve, and runs out of iterations otherwise.
struct ReachSolver {
    reach: f64,
    anchor: Option<f64>,
}

impl Solver<Quadratic> for ReachSolver {
    type Error = Infallible;

    fn solve(
        &mut self,
        model: &mut Quadratic,
        _limits: &SolveLimits,
    ) -> Result<SolveReport, Self::Error> {
        if self
            .anchor
            .is_some_and(|anchor| (model.x - anchor).abs() > self.reach)
        {
            model.y = 0.0;
            return Ok(SolveReport::new(TerminationCondition::MaxIterations, 3));
        }

        model.y = model.x * model.x;
        self.anchor = Some(model.x);
        Ok(SolveReport::new(TerminationCondition::Optimal, 1))
    }
}

#[test]
fn recovers_from_rejected_steps() {
    let mut model = Quadratic::new();
    let mut solver = ReachSolver {
        reach: 2.0,
        anchor: None,
    };

    let mut rejected = 0;
    let solution = solve(
        &mut model,
        &mut solver,
        &[Var::X],
        &[20.0],
        &Config::default(),
        |event: &Event<'_, Quadratic>| {
            if let Event::Rejected { model, .. } = event {
                // The failed attempt is rolled back to a converged point.
                assert_relative_eq!(model.y, model.x * model.x);
                rejected += 1;
            }
            None
        },
    )
    .expect("should run");

    // Every step longer than 0.2 fails and is cut; the shorter ones that
    // follow carry the path to the target.
    assert_eq!(solution.as_tuple(), (Status::Optimal, 1.0, 13));
    assert_eq!(rejected, 6);
    assert_relative_eq!(model.x, 20.0);
    assert_relative_eq!(model.y, 400.0);
}

#[test]
fn slow_solves_shrink_the_step() {
    let mut model = Quadratic::new();
    let mut solver = SquareSolver::with_schedule(&[1, 8]);

    let mut steps = Vec::new();
    solve(
        &mut model,
        &mut solver,
        &[Var::X],
        &[20.0],
        &Config::default(),
        |event: &Event<'_, Quadratic>| {
            steps.push(event.step());
            None
        },
    )
    .expect("should run");

    // 0.1 * (1 + 0.5 * (4/8 - 1)) = 0.075
    assert_relative_eq!(steps[0], 0.075, epsilon = 1e-12);
}

#[test]
fn regularized_solves_hold_the_step() {
    let mut model = Quadratic::new();
    let mut solver = SquareSolver {
        regularize: true,
        ..SquareSolver::default()
    };

    let solution = solve_unobserved(
        &mut model,
        &mut solver,
        &[Var::X],
        &[20.0],
        &Config::default(),
    )
    .expect("should run");

    assert_eq!(solution.status, Status::Optimal);
    assert_eq!(solution.evaluations, 10);
    assert_eq!(solution.regularized_steps, 10);
}

#[test]
fn progress_is_monotone_and_step_is_bounded() {
    let mut model = Quadratic::capped(300.0);
    let config = Config {
        max_step: 0.3,
        ..Config::default()
    };

    let mut last = 0.0;
    let mut accepted = 0;
    let solution = solve(
        &mut model,
        &mut SquareSolver::default(),
        &[Var::X],
        &[20.0],
        &config,
        |event: &Event<'_, Quadratic>| {
            assert!(event.progress() >= last);
            assert!((0.0..=1.0).contains(&event.progress()));
            assert!(event.step() <= config.max_step);
            if let Event::Rejected {
                model, progress, ..
            } = event
            {
                // Rejections leave the model at the last accepted point.
                assert_relative_eq!(model.x, 10.0 + progress * 10.0, epsilon = 1e-9);
            }
            if event.is_accepted() {
                accepted += 1;
            }
            last = event.progress();
            None
        },
    )
    .expect("should run");

    assert_eq!(solution.status, Status::MinStepLength);
    assert!(accepted > 0);
}

// --- Observer ---

#[test]
fn observer_can_stop_early() {
    let mut model = Quadratic::new();

    let mut calls = 0;
    let observer = |event: &Event<'_, Quadratic>| {
        calls += 1;
        if event.evaluations() >= 2 {
            Some(Action::StopEarly)
        } else {
            None
        }
    };

    let solution = solve(
        &mut model,
        &mut SquareSolver::default(),
        &[Var::X],
        &[20.0],
        &Config::default(),
        observer,
    )
    .expect("should stop cleanly");

    assert_eq!(solution.status, Status::StoppedByObserver);
    assert_relative_eq!(solution.progress, 0.35, epsilon = 1e-12);
    assert_eq!(solution.evaluations, 2);
    assert_eq!(calls, 2);
}

#[test]
fn events_report_solver_outcomes() {
    let mut model = Quadratic::capped(300.0);

    let mut outcomes = Vec::new();
    solve(
        &mut model,
        &mut SquareSolver::default(),
        &[Var::X],
        &[20.0],
        &Config::default(),
        |event: &Event<'_, Quadratic>| {
            outcomes.push(event.report().termination);
            None
        },
    )
    .expect("should run");

    assert_eq!(outcomes.len(), 11);
    assert_eq!(outcomes[0], TerminationCondition::Optimal);
    assert_eq!(outcomes[2], TerminationCondition::Infeasible);
}

// --- Validation ---

#[test]
fn errors_on_invalid_config() {
    let mut model = Quadratic::new();
    let config = Config {
        step_cut: 0.0,
        ..Config::default()
    };

    let result = solve_unobserved(
        &mut model,
        &mut SquareSolver::default(),
        &[Var::X],
        &[20.0],
        &config,
    );

    assert!(matches!(
        result,
        Err(Error::InvalidConfig(ConfigError::StepCut))
    ));
}

#[test]
fn errors_on_bad_variables() {
    let mut model = Quadratic::new();
    let mut solver = SquareSolver::default();
    let config = Config::default();

    let result = solve_unobserved(&mut model, &mut solver, &[], &[], &config);
    assert!(matches!(result, Err(Error::NoVariables)));

    let result = solve_unobserved(&mut model, &mut solver, &[Var::X], &[20.0, 30.0], &config);
    assert!(matches!(
        result,
        Err(Error::LengthMismatch {
            variables: 1,
            targets: 2
        })
    ));

    let result = solve_unobserved(&mut model, &mut solver, &[Var::Y], &[20.0], &config);
    assert!(matches!(result, Err(Error::NotFixed { index: 0 })));

    let result = solve_unobserved(
        &mut model,
        &mut solver,
        &[Var::X, Var::X],
        &[20.0, 20.0],
        &config,
    );
    assert!(matches!(result, Err(Error::DuplicateVariable { index: 1 })));

    let result = solve_unobserved(&mut model, &mut solver, &[Var::X], &[f64::NAN], &config);
    assert!(matches!(
        result,
        Err(Error::NonFiniteTarget { index: 0, .. })
    ));

    // Validation happens before any solve.
    assert_eq!(solver.calls, 0);
}

#[test]
fn errors_on_target_outside_bounds() {
    let mut model = Quadratic {
        x_upper: Some(15.0),
        ..Quadratic::new()
    };

    let result = solve_unobserved(
        &mut model,
        &mut SquareSolver::default(),
        &[Var::X],
        &[20.0],
        &Config::default(),
    );

    assert!(matches!(
        result,
        Err(Error::TargetOutOfBounds {
            index: 0,
            upper: Some(_),
            ..
        })
    ));
}

#[derive(Debug, Error)]
#[error("solver crashed")]
struct Crash;

struct CrashingSolver;

impl Solver<Quadratic> for CrashingSolver {
    type Error = Crash;

    fn solve(
        &mut self,
        _model: &mut Quadratic,
        _limits: &SolveLimits,
    ) -> Result<SolveReport, Crash> {
        Err(Crash)
    }
}

#[test]
fn propagates_solver_errors() {
    let mut model = Quadratic::new();

    let result = solve_unobserved(
        &mut model,
        &mut CrashingSolver,
        &[Var::X],
        &[20.0],
        &Config::default(),
    );

    let err = result.expect_err("should fail");
    assert!(matches!(err, Error::Solver(_)));
    assert_eq!(err.to_string(), "solver error: solver crashed");
}

/// Converges like [`SquareSolver`] for `successes` calls, then errors.
struct FlakySolver {
    successes: usize,
}

impl Solver<Quadratic> for FlakySolver {
    type Error = Crash;

    fn solve(
        &mut self,
        model: &mut Quadratic,
        _limits: &SolveLimits,
    ) -> Result<SolveReport, Crash> {
        if self.successes == 0 {
            return Err(Crash);
        }
        self.successes -= 1;
        model.y = model.x * model.x;
        Ok(SolveReport::new(TerminationCondition::Optimal, 1))
    }
}

#[test]
fn solver_error_restores_last_accepted_point() {
    let mut model = Quadratic::new();

    // The initial check and the step to 0.1 succeed, the step to 0.35 errors.
    let result = solve_unobserved(
        &mut model,
        &mut FlakySolver { successes: 2 },
        &[Var::X],
        &[20.0],
        &Config::default(),
    );

    assert!(matches!(result, Err(Error::Solver(_))));
    assert_relative_eq!(model.x, 11.0);
    assert_relative_eq!(model.y, 121.0);
}
