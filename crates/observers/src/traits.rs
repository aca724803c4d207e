//! Capability traits for cross-solver observers.
//!
//! These traits abstract over solver-specific event and action types, enabling
//! observers to work generically across different continuation solvers.
//!
//! # Event traits
//!
//! - [`HasProgress`] — events that report a position along a continuation path
//!
//! # Action traits
//!
//! - [`CanStopEarly`] — actions that can signal early termination
//!
//! # Example
//!
//! ```rust
//! use ramp_core::Observer;
//! use ramp_observers::traits::{CanStopEarly, HasProgress};
//!
//! /// Stops after too many rejected attempts in a row.
//! struct Patience {
//!     limit: usize,
//!     rejected: usize,
//! }
//!
//! impl<E: HasProgress, A: CanStopEarly> Observer<E, A> for Patience {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         if event.accepted() {
//!             self.rejected = 0;
//!             return None;
//!         }
//!         self.rejected += 1;
//!         (self.rejected >= self.limit).then(A::stop_early)
//!     }
//! }
//! ```

use ramp_core::Model;
use ramp_solvers::continuation::homotopy;

/// An event that reports a position along a continuation path.
pub trait HasProgress {
    /// Returns the progress of the last accepted point, in `[0, 1]`.
    fn progress(&self) -> f64;

    /// Returns the step size the solver will try next.
    fn step(&self) -> f64;

    /// Returns `true` if the attempt behind this event was accepted.
    fn accepted(&self) -> bool;
}

/// An action type that can signal early termination.
pub trait CanStopEarly {
    /// Returns the action that stops the solver early.
    fn stop_early() -> Self;
}

impl<M: Model> HasProgress for homotopy::Event<'_, M> {
    fn progress(&self) -> f64 {
        homotopy::Event::progress(self)
    }

    fn step(&self) -> f64 {
        homotopy::Event::step(self)
    }

    fn accepted(&self) -> bool {
        self.is_accepted()
    }
}

impl CanStopEarly for homotopy::Action {
    fn stop_early() -> Self {
        Self::StopEarly
    }
}
