//! Reusable observers for the Ramp framework.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work across continuation solvers.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for cross-solver observers
//!   ([`HasProgress`], [`CanStopEarly`])
//!
//! # Observers
//!
//! - [`History`] — records every attempted point along a continuation path
//! - [`StopAtProgress`] — stops a solver once progress reaches a given level
//!
//! [`Observer`]: ramp_core::Observer
//! [`HasProgress`]: traits::HasProgress
//! [`CanStopEarly`]: traits::CanStopEarly

mod history;
mod stop;

pub mod traits;

pub use history::{History, Point};
pub use stop::StopAtProgress;
