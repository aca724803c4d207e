use ramp_core::Observer;

use crate::traits::{CanStopEarly, HasProgress};

/// Stops a continuation solver once progress reaches `level`.
///
/// Useful for walking only part of the way along a path, for example to
/// inspect an intermediate operating point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StopAtProgress {
    level: f64,
}

impl StopAtProgress {
    #[must_use]
    pub fn new(level: f64) -> Self {
        Self { level }
    }
}

impl<E: HasProgress, A: CanStopEarly> Observer<E, A> for StopAtProgress {
    fn observe(&mut self, event: &E) -> Option<A> {
        (event.progress() >= self.level).then(A::stop_early)
    }
}
