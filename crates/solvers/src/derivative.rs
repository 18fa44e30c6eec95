//! Central finite differences.
//!
//! Derivatives are approximated with symmetric differences,
//!
//! ```text
//! ∂f/∂xᵢ ≈ (f(x + h·eᵢ) − f(x − h·eᵢ)) / 2h
//! ```
//!
//! which are second-order accurate (error `O(h²)`). The step `h` is absolute:
//! it is not scaled to the magnitude of `x`. Very large or very small
//! coordinates may call for a different step.

use thiserror::Error;

/// Error returned when a finite difference step is unusable.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error("finite difference step must be finite and positive, got {step}")]
pub struct InvalidStep {
    pub step: f64,
}

/// Central finite difference with a fixed absolute step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiniteDifference {
    step: f64,
}

impl Default for FiniteDifference {
    fn default() -> Self {
        Self {
            step: Self::DEFAULT_STEP,
        }
    }
}

impl FiniteDifference {
    /// Step used by [`FiniteDifference::default`].
    pub const DEFAULT_STEP: f64 = 1e-3;

    /// Creates a finite difference with the given step.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStep`] if `step` is not finite or not positive.
    pub fn new(step: f64) -> Result<Self, InvalidStep> {
        if !step.is_finite() || step <= 0.0 {
            return Err(InvalidStep { step });
        }
        Ok(Self { step })
    }

    /// Returns the step size.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Approximates the gradient of a scalar function at `x`.
    ///
    /// Calls `f` exactly `2 * x.len()` times, perturbing one coordinate at a time.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn gradient<E>(
        &self,
        mut f: impl FnMut(&[f64]) -> Result<f64, E>,
        x: &[f64],
    ) -> Result<Vec<f64>, E> {
        let mut point = x.to_vec();
        let mut gradient = Vec::with_capacity(x.len());

        for (i, &xi) in x.iter().enumerate() {
            point[i] = xi + self.step;
            let forward = f(&point)?;
            point[i] = xi - self.step;
            let backward = f(&point)?;
            point[i] = xi;

            gradient.push((forward - backward) / (2.0 * self.step));
        }

        Ok(gradient)
    }

    /// Approximates the Jacobian of a square vector function at `x`.
    ///
    /// The result is row-major: `jacobian[i][j]` is `∂fᵢ/∂xⱼ`.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by `f`.
    pub fn jacobian<const N: usize, E>(
        &self,
        mut f: impl FnMut(&[f64; N]) -> Result<[f64; N], E>,
        x: &[f64; N],
    ) -> Result<[[f64; N]; N], E> {
        let mut jacobian = [[0.0; N]; N];
        let mut point = *x;

        for j in 0..N {
            point[j] = x[j] + self.step;
            let forward = f(&point)?;
            point[j] = x[j] - self.step;
            let backward = f(&point)?;
            point[j] = x[j];

            for (row, (fwd, bwd)) in jacobian.iter_mut().zip(forward.iter().zip(&backward)) {
                row[j] = (fwd - bwd) / (2.0 * self.step);
            }
        }

        Ok(jacobian)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;

    #[test]
    fn rejects_bad_steps() {
        assert!(FiniteDifference::new(0.0).is_err());
        assert!(FiniteDifference::new(-1e-3).is_err());
        assert!(FiniteDifference::new(f64::NAN).is_err());
        assert!(FiniteDifference::new(f64::INFINITY).is_err());
        assert_eq!(FiniteDifference::default().step(), 1e-3);
    }

    #[test]
    fn gradient_of_quadratic_is_exact() {
        // f = x² + 3xy, ∇f = (2x + 3y, 3x)
        let diff = FiniteDifference::default();
        let f = |v: &[f64]| Ok::<_, Infallible>(v[0] * v[0] + 3.0 * v[0] * v[1]);

        let gradient = diff.gradient(f, &[1.0, 2.0]).expect("infallible");

        assert_eq!(gradient.len(), 2);
        assert_relative_eq!(gradient[0], 8.0, epsilon = 1e-9);
        assert_relative_eq!(gradient[1], 3.0, epsilon = 1e-9);
    }

    #[test]
    fn gradient_error_is_second_order() {
        // f = sin(x), f' = cos(x), central difference error ≈ h²/6 · cos(x)
        let x = 0.3_f64;
        let f = |v: &[f64]| Ok::<_, Infallible>(v[0].sin());

        let coarse = FiniteDifference::new(1e-2).unwrap();
        let fine = FiniteDifference::new(1e-3).unwrap();

        let coarse_err = (coarse.gradient(f, &[x]).unwrap()[0] - x.cos()).abs();
        let fine_err = (fine.gradient(f, &[x]).unwrap()[0] - x.cos()).abs();

        assert!(fine_err < 1e-6);
        assert_relative_eq!(coarse_err / fine_err, 100.0, max_relative = 0.05);
    }

    #[test]
    fn gradient_calls_function_twice_per_coordinate() {
        let mut calls = 0;
        let f = |v: &[f64]| {
            calls += 1;
            Ok::<_, Infallible>(v.iter().sum())
        };

        FiniteDifference::default()
            .gradient(f, &[0.0, 0.0, 0.0])
            .expect("infallible");

        assert_eq!(calls, 6);
    }

    #[test]
    fn gradient_propagates_errors() {
        let f = |v: &[f64]| if v[0] > 0.0 { Err("positive") } else { Ok(v[0]) };

        let result = FiniteDifference::default().gradient(f, &[0.0]);

        assert_eq!(result, Err("positive"));
    }

    #[test]
    fn jacobian_matches_analytic() {
        // F = (x²y, x + y), J = [[2xy, x²], [1, 1]]
        let f = |v: &[f64; 2]| Ok::<_, Infallible>([v[0] * v[0] * v[1], v[0] + v[1]]);

        let jacobian = FiniteDifference::new(1e-4)
            .unwrap()
            .jacobian(f, &[2.0, 3.0])
            .expect("infallible");

        assert_relative_eq!(jacobian[0][0], 12.0, epsilon = 1e-6);
        assert_relative_eq!(jacobian[0][1], 4.0, epsilon = 1e-6);
        assert_relative_eq!(jacobian[1][0], 1.0, epsilon = 1e-6);
        assert_relative_eq!(jacobian[1][1], 1.0, epsilon = 1e-6);
    }
}
