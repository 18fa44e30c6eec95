use lagrange_core::Model;
use lagrange_solvers::derivative::FiniteDifference;

use crate::{Lagrangian, ScalarFunction, ShapeMismatch};

impl<F: ScalarFunction, C: ScalarFunction> Lagrangian<F, C> {
    /// Approximates `∇L` at an augmented state with central differences.
    ///
    /// The result has one entry per state component: the partial derivatives
    /// with respect to the decision variables, then the multipliers. The
    /// multiplier entries are the constraint values, so a zero gradient means
    /// both stationarity and feasibility.
    ///
    /// Makes `2 * self.dim()` evaluations.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeMismatch`] if `state.len() != self.dim()`.
    pub fn gradient(
        &self,
        state: &[f64],
        difference: &FiniteDifference,
    ) -> Result<Vec<f64>, ShapeMismatch> {
        ShapeMismatch::check(self.dim(), state.len())?;
        difference.gradient(|point| self.evaluate(point), state)
    }
}

/// The gradient of a Lagrangian as a model over fixed-size states.
///
/// `D` must equal the Lagrangian's [`dim`](Lagrangian::dim); this is checked
/// once by [`GradientModel::new`], so calls never fail on shape.
#[derive(Debug, Clone, Copy)]
pub struct GradientModel<'a, F, C, const D: usize> {
    lagrangian: &'a Lagrangian<F, C>,
    difference: FiniteDifference,
}

impl<'a, F: ScalarFunction, C: ScalarFunction, const D: usize> GradientModel<'a, F, C, D> {
    /// Wraps a Lagrangian whose augmented state has length `D`.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeMismatch`] if `lagrangian.dim() != D`.
    pub fn new(
        lagrangian: &'a Lagrangian<F, C>,
        difference: FiniteDifference,
    ) -> Result<Self, ShapeMismatch> {
        ShapeMismatch::check(D, lagrangian.dim())?;
        Ok(Self {
            lagrangian,
            difference,
        })
    }
}

impl<F: ScalarFunction, C: ScalarFunction, const D: usize> Model for GradientModel<'_, F, C, D> {
    type Input = [f64; D];
    type Output = [f64; D];
    type Error = ShapeMismatch;

    fn call(&self, input: &[f64; D]) -> Result<[f64; D], ShapeMismatch> {
        let gradient = self.lagrangian.gradient(input, &self.difference)?;
        Ok(std::array::from_fn(|i| gradient[i]))
    }
}
