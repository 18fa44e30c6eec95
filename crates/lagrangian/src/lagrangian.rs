use thiserror::Error;

use lagrange_core::Model;

use crate::ScalarFunction;

/// A state (or variable vector) had the wrong length.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("expected {expected} values, found {found}")]
pub struct ShapeMismatch {
    pub expected: usize,
    pub found: usize,
}

impl ShapeMismatch {
    /// Returns `Ok` if `found == expected`.
    ///
    /// # Errors
    ///
    /// Returns the mismatch otherwise.
    pub fn check(expected: usize, found: usize) -> Result<(), Self> {
        if expected == found {
            Ok(())
        } else {
            Err(Self { expected, found })
        }
    }
}

/// The Lagrangian `L(x, λ) = f(x) + Σ λᵢ·gᵢ(x)`.
///
/// `f` is the objective and each `gᵢ` an equality constraint (`gᵢ(x) = 0` at
/// feasible points). The augmented state is laid out as the `n` decision
/// variables followed by one multiplier per constraint, for a total length of
/// [`dim`](Self::dim).
#[derive(Debug, Clone, PartialEq)]
pub struct Lagrangian<F, C> {
    objective: F,
    constraints: Vec<C>,
}

impl<F: ScalarFunction, C: ScalarFunction> Lagrangian<F, C> {
    /// Creates a Lagrangian from an objective and its equality constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeMismatch`] if a constraint takes a different number of
    /// variables than the objective.
    pub fn new(objective: F, constraints: Vec<C>) -> Result<Self, ShapeMismatch> {
        for constraint in &constraints {
            ShapeMismatch::check(objective.arity(), constraint.arity())?;
        }
        Ok(Self {
            objective,
            constraints,
        })
    }

    /// Number of decision variables, `n`.
    #[must_use]
    pub fn num_vars(&self) -> usize {
        self.objective.arity()
    }

    /// Number of multipliers, `m`, one per constraint.
    #[must_use]
    pub fn num_multipliers(&self) -> usize {
        self.constraints.len()
    }

    /// Length of the augmented state, `n + m`.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.num_vars() + self.num_multipliers()
    }

    #[must_use]
    pub fn objective(&self) -> &F {
        &self.objective
    }

    #[must_use]
    pub fn constraints(&self) -> &[C] {
        &self.constraints
    }

    /// Splits an augmented state into decision variables and multipliers.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeMismatch`] if `state.len() != self.dim()`.
    pub fn split<'s>(&self, state: &'s [f64]) -> Result<(&'s [f64], &'s [f64]), ShapeMismatch> {
        ShapeMismatch::check(self.dim(), state.len())?;
        Ok(state.split_at(self.num_vars()))
    }

    /// Evaluates the Lagrangian at an augmented state.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeMismatch`] if `state.len() != self.dim()`.
    pub fn evaluate(&self, state: &[f64]) -> Result<f64, ShapeMismatch> {
        let (vars, multipliers) = self.split(state)?;

        let penalty: f64 = self
            .constraints
            .iter()
            .zip(multipliers)
            .map(|(constraint, multiplier)| multiplier * constraint.value(vars))
            .sum();

        Ok(self.objective.value(vars) + penalty)
    }

    /// Evaluates the objective alone at the decision variables.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeMismatch`] if `vars.len() != self.num_vars()`.
    pub fn objective_value(&self, vars: &[f64]) -> Result<f64, ShapeMismatch> {
        ShapeMismatch::check(self.num_vars(), vars.len())?;
        Ok(self.objective.value(vars))
    }

    /// Evaluates every constraint at the decision variables.
    ///
    /// All entries are zero at a feasible point.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeMismatch`] if `vars.len() != self.num_vars()`.
    pub fn constraint_residuals(&self, vars: &[f64]) -> Result<Vec<f64>, ShapeMismatch> {
        ShapeMismatch::check(self.num_vars(), vars.len())?;
        Ok(self.constraints.iter().map(|c| c.value(vars)).collect())
    }
}

impl<F: ScalarFunction, C: ScalarFunction> Model for Lagrangian<F, C> {
    type Input = Vec<f64>;
    type Output = f64;
    type Error = ShapeMismatch;

    fn call(&self, input: &Vec<f64>) -> Result<f64, ShapeMismatch> {
        self.evaluate(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::{Linear, Sphere};

    fn unit_circle() -> Lagrangian<Linear, Sphere> {
        Lagrangian::new(Linear::new(vec![1.0, 1.0]), vec![Sphere::new(2, 1.0)])
            .expect("consistent arity")
    }

    #[test]
    fn reports_dimensions() {
        let lagrangian = unit_circle();
        assert_eq!(lagrangian.num_vars(), 2);
        assert_eq!(lagrangian.num_multipliers(), 1);
        assert_eq!(lagrangian.dim(), 3);
    }

    #[test]
    fn evaluates_objective_plus_weighted_constraint() {
        let lagrangian = unit_circle();

        // x + y + λ(x² + y² − 1) at (2, 3, 0.5) = 5 + 0.5·12
        assert_relative_eq!(lagrangian.evaluate(&[2.0, 3.0, 0.5]).unwrap(), 11.0);

        // Zero multiplier leaves the objective.
        assert_relative_eq!(lagrangian.evaluate(&[0.3, -0.1, 0.0]).unwrap(), 0.2);

        // On the constraint the multiplier has no effect.
        let on_circle = [0.6, 0.8, -7.0];
        assert_relative_eq!(lagrangian.evaluate(&on_circle).unwrap(), 1.4, epsilon = 1e-12);
    }

    #[test]
    fn rejects_wrong_state_length() {
        let lagrangian = unit_circle();

        assert_eq!(
            lagrangian.evaluate(&[1.0, 1.0]),
            Err(ShapeMismatch {
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            lagrangian.evaluate(&[1.0, 1.0, 0.0, 0.0]),
            Err(ShapeMismatch {
                expected: 3,
                found: 4
            })
        );
    }

    #[test]
    fn splits_state() {
        let lagrangian = unit_circle();
        let (vars, multipliers) = lagrangian.split(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(vars, [1.0, 2.0]);
        assert_eq!(multipliers, [3.0]);
    }

    #[test]
    fn rejects_inconsistent_constraints() {
        let result = Lagrangian::new(Linear::new(vec![1.0, 1.0]), vec![Sphere::new(3, 1.0)]);
        assert_eq!(
            result.err(),
            Some(ShapeMismatch {
                expected: 2,
                found: 3
            })
        );
    }

    #[test]
    fn objective_and_constraints_check_variable_count() {
        let lagrangian = unit_circle();

        assert_relative_eq!(lagrangian.objective_value(&[0.5, 0.25]).unwrap(), 0.75);
        assert!(lagrangian.objective_value(&[0.5, 0.25, 0.0]).is_err());

        let residuals = lagrangian.constraint_residuals(&[1.0, 1.0]).unwrap();
        assert_eq!(residuals.len(), 1);
        assert_relative_eq!(residuals[0], 1.0);
        assert!(lagrangian.constraint_residuals(&[1.0]).is_err());
    }

    #[test]
    fn is_a_model() {
        let lagrangian = unit_circle();
        let value = lagrangian.call(&vec![1.0, 0.0, 2.0]).unwrap();
        assert_relative_eq!(value, 1.0);
    }
}
