use ramp_core::Observer;

use crate::traits::HasProgress;

/// One attempted point along a continuation path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Progress of the last accepted point after the attempt.
    pub progress: f64,

    /// Step size chosen for the next attempt.
    pub step: f64,

    /// Whether the attempt was accepted.
    pub accepted: bool,
}

/// Records every attempt a continuation solver makes.
///
/// Pass `&mut history` as the observer to keep the record after solving.
///
/// # Example
///
/// ```rust
/// use ramp_core::EquationSystem;
/// use ramp_observers::History;
/// use ramp_solvers::{continuation::homotopy, equation::newton::Newton};
///
/// let mut system = EquationSystem::new();
/// let x = system.add_var("x", 10.0);
/// let y = system.add_var("y", 100.0);
/// system.add_equality("square", move |v| v[y] - v[x] * v[x]);
/// system.fix(x, 10.0).unwrap();
///
/// let mut history = History::new();
/// let solution = homotopy::solve(
///     &mut system,
///     &mut Newton::default(),
///     &[x],
///     &[20.0],
///     &homotopy::Config::default(),
///     &mut history,
/// )
/// .unwrap();
///
/// assert!(!history.is_empty());
/// assert_eq!(history.len(), solution.evaluations);
/// assert_eq!(history.accepted().count(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    points: Vec<Point>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the accepted points in order.
    pub fn accepted(&self) -> impl Iterator<Item = &Point> {
        self.points.iter().filter(|p| p.accepted)
    }

    /// Returns the rejected points in order.
    pub fn rejected(&self) -> impl Iterator<Item = &Point> {
        self.points.iter().filter(|p| !p.accepted)
    }

    fn record<E: HasProgress>(&mut self, event: &E) {
        self.points.push(Point {
            progress: event.progress(),
            step: event.step(),
            accepted: event.accepted(),
        });
    }
}

impl<E: HasProgress, A> Observer<E, A> for History {
    fn observe(&mut self, event: &E) -> Option<A> {
        self.record(event);
        None
    }
}

impl<E: HasProgress, A> Observer<E, A> for &mut History {
    fn observe(&mut self, event: &E) -> Option<A> {
        self.record(event);
        None
    }
}
