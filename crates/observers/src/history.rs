use lagrange_core::Observer;

use crate::traits::{HasIteration, HasResidual};

/// Records `[iteration, residual]` points for later inspection or plotting.
///
/// A new run starts whenever an event's iteration does not follow the last
/// recorded one, so a single `History` shared across several solves keeps
/// each solve's trace separate.
///
/// Pass `&mut History` as the observer to keep access to the data after the
/// solve:
///
/// ```rust
/// use std::convert::Infallible;
///
/// use lagrange_core::{EquationProblem, Model};
/// use lagrange_observers::History;
/// use lagrange_solvers::equation::hybrid;
///
/// struct Square;
///
/// impl Model for Square {
///     type Input = [f64; 1];
///     type Output = [f64; 1];
///     type Error = Infallible;
///
///     fn call(&self, input: &[f64; 1]) -> Result<[f64; 1], Infallible> {
///         Ok([input[0] * input[0]])
///     }
/// }
///
/// /// `x² = 2`
/// struct SquareIsTwo;
///
/// impl EquationProblem<1> for SquareIsTwo {
///     type Input = [f64; 1];
///     type Output = [f64; 1];
///     type Error = Infallible;
///
///     fn input(&self, x: &[f64; 1]) -> Result<[f64; 1], Infallible> {
///         Ok(*x)
///     }
///
///     fn residuals(&self, _: &[f64; 1], output: &[f64; 1]) -> Result<[f64; 1], Infallible> {
///         Ok([output[0] - 2.0])
///     }
/// }
///
/// let mut history = History::new();
/// let config = hybrid::Config::default();
/// let solution = hybrid::solve(&Square, &SquareIsTwo, [1.0], &config, &mut history)?;
///
/// assert!(solution.status.is_converged());
/// assert_eq!(history.runs().len(), 1);
/// assert_eq!(history.runs()[0].len(), solution.iters);
/// # Ok::<(), hybrid::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    runs: Vec<Vec<[f64; 2]>>,
    last_iter: Option<usize>,
}

impl History {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a residual for an iteration.
    pub fn record(&mut self, iter: usize, residual: f64) {
        let continues = self.last_iter.is_some_and(|last| iter > last);
        if !continues {
            self.runs.push(Vec::new());
        }
        self.last_iter = Some(iter);

        #[allow(clippy::cast_precision_loss)]
        let point = [iter as f64, residual];
        if let Some(run) = self.runs.last_mut() {
            run.push(point);
        }
    }

    /// Recorded runs, in the order they started.
    #[must_use]
    pub fn runs(&self) -> &[Vec<[f64; 2]>] {
        &self.runs
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }
}

impl<E, A> Observer<E, A> for History
where
    E: HasIteration + HasResidual,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.record(event.iteration(), event.residual());
        None
    }
}

/// Allows `&mut History` to be passed to solvers that take an observer by
/// value, so the runs can be read after the solve completes.
impl<E, A> Observer<E, A> for &mut History
where
    E: HasIteration + HasResidual,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (*self).observe(event)
    }
}
