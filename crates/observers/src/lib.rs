//! Reusable observers for the Lagrange multiplier solvers.
//!
//! This crate provides [`Observer`] implementations and capability traits that
//! work with any solver whose events implement them.
//!
//! # Modules
//!
//! - [`traits`] — Capability traits for cross-solver observers
//!   ([`HasIteration`], [`HasResidual`])
//! - [`History`] — records residual norms per iteration, one run per solve
//! - [`TracingObserver`] — emits a `tracing` event per iteration
//!
//! [`Observer`]: lagrange_core::Observer
//! [`HasIteration`]: traits::HasIteration
//! [`HasResidual`]: traits::HasResidual

pub mod traits;

mod history;
mod logging;

pub use history::History;
pub use logging::TracingObserver;
