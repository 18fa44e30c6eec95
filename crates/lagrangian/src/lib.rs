//! Constrained extrema via the method of Lagrange multipliers.
//!
//! A [`Lagrangian`] augments an objective with multiplier-weighted equality
//! constraints. Its stationary points, where every partial derivative with
//! respect to the decision variables *and* the multipliers vanishes, are the
//! constrained extrema of the objective.
//!
//! This crate locates those points numerically:
//!
//! - [`Lagrangian::evaluate`] — the scalar Lagrangian over an augmented state
//! - [`Lagrangian::gradient`] — its central-difference gradient
//! - [`stationary::find_stationary_point`] — drives the gradient to zero with
//!   the hybrid root finder from `lagrange-solvers`
//!
//! The [`instance`] module fixes the problem solved by the demo: extremize
//! `x + y` on the unit circle. [`scene`] turns its results into plain data
//! for visualization.

mod extremum;
mod function;
mod gradient;
mod lagrangian;

pub mod instance;
pub mod scene;
pub mod stationary;

pub use extremum::Extremum;
pub use function::{Linear, ScalarFunction, Sphere};
pub use gradient::GradientModel;
pub use lagrangian::{Lagrangian, ShapeMismatch};
