use crate::equation::Evaluation;

use super::StepKind;

/// Event emitted by the hybrid solver once per iteration.
///
/// The event is emitted after the trial step has been accepted or rejected
/// and the trust radius updated, so `eval` is always the iterate the solver
/// would return if it stopped now.
#[derive(Debug)]
pub struct Event<'a, I, O, const N: usize> {
    /// Iteration counter (1-based).
    pub iter: usize,

    /// Evaluation at the current iterate.
    pub eval: &'a Evaluation<I, O, N>,

    /// How the trial step was chosen.
    pub step_kind: StepKind,

    /// Euclidean norm of the trial step.
    pub step_norm: f64,

    /// Ratio of actual to predicted reduction of `‖F‖²`.
    pub gain_ratio: f64,

    /// Whether the trial step was accepted.
    pub accepted: bool,

    /// Trust radius for the next iteration.
    pub radius: f64,
}

impl<I, O, const N: usize> Event<'_, I, O, N> {
    /// Returns the residual norm at the current iterate.
    #[must_use]
    pub fn residual_norm(&self) -> f64 {
        self.eval.residual_norm()
    }
}
