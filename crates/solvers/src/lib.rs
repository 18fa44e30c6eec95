//! Numerical solvers for problems defined with `lagrange-core`.
//!
//! # Modules
//!
//! - [`derivative`] — central finite differences for gradients and Jacobians
//! - [`equation`] — root finders for square systems of equations

pub mod derivative;
pub mod equation;
