use lagrange_core::Snapshot;

use crate::equation::Evaluation;

/// Indicates how the hybrid solver finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The residual norm met the configured tolerance.
    Converged,

    /// Reached the iteration limit without converging.
    MaxIters,

    /// The trust region collapsed or no descent direction exists.
    ///
    /// This usually means the iterate sits at a local minimum of `‖F‖²` that
    /// is not a root, or the Jacobian is too poorly conditioned to progress.
    Stalled,

    /// Stopped early due to an observer decision.
    StoppedByObserver,
}

impl Status {
    /// Returns true if the solver converged.
    #[must_use]
    pub fn is_converged(self) -> bool {
        self == Self::Converged
    }
}

/// The result of a hybrid solve.
#[derive(Debug, Clone)]
pub struct Solution<I, O, const N: usize> {
    /// Final solver status.
    pub status: Status,

    /// Final iterate.
    pub x: [f64; N],

    /// Residuals at the final iterate.
    pub residuals: [f64; N],

    /// Euclidean norm of `residuals`.
    pub residual_norm: f64,

    /// Snapshot at the final iterate.
    pub snapshot: Snapshot<I, O>,

    /// Iteration count when the solver finished.
    pub iters: usize,
}

impl<I, O, const N: usize> Solution<I, O, N> {
    /// Constructs a solution from an evaluation result.
    pub(super) fn from_eval(eval: Evaluation<I, O, N>, status: Status, iters: usize) -> Self {
        Self {
            status,
            x: eval.x,
            residual_norm: eval.residual_norm(),
            residuals: eval.residuals,
            snapshot: eval.snapshot,
            iters,
        }
    }
}
