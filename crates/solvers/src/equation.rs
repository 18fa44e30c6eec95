//! Root finding for square systems `F(x) = 0`, `F: ℝᴺ → ℝᴺ`.
//!
//! The system is described by an [`EquationProblem`] wrapped around a
//! [`Model`]. [`evaluate`] runs one point through both, and the solvers here
//! call it repeatedly while steering `x`.
//!
//! - [`hybrid`] — Powell's hybrid dog-leg trust region method
//!
//! [`EquationProblem`]: lagrange_core::EquationProblem
//! [`Model`]: lagrange_core::Model

mod evaluate;

pub mod hybrid;

pub use evaluate::{EvalError, EvaluateResult, Evaluation, evaluate};
