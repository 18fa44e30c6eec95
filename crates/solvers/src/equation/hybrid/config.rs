use thiserror::Error;

use crate::derivative::FiniteDifference;

/// Configuration for the hybrid solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Maximum number of trust region iterations.
    pub max_iters: usize,

    /// Converged once the residual norm is at or below this value.
    pub residual_tol: f64,

    /// Stalled once the step or trust radius falls below
    /// `step_tol * (1 + ‖x‖)` without convergence.
    pub step_tol: f64,

    /// Finite difference used to build the Jacobian.
    pub jacobian: FiniteDifference,

    /// Initial trust radius is `radius_factor * max(‖x₀‖, 1)`.
    pub radius_factor: f64,

    /// The Newton step is skipped when the smallest LU pivot is smaller than
    /// this fraction of the largest.
    pub singular_tol: f64,
}

/// Errors that can occur when validating a hybrid solver config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("residual_tol must be finite and non-negative")]
    ResidualTol,

    #[error("step_tol must be finite and non-negative")]
    StepTol,

    #[error("radius_factor must be finite and positive")]
    RadiusFactor,

    #[error("singular_tol must be finite and in [0, 1)")]
    SingularTol,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 100,
            residual_tol: 1e-10,
            step_tol: 1e-12,
            // Known-good value, unwrap is safe
            jacobian: FiniteDifference::new(1e-4).unwrap(),
            radius_factor: 100.0,
            singular_tol: 1e-8,
        }
    }
}

impl Config {
    /// Validates that all tolerances are usable.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.residual_tol.is_finite() || self.residual_tol < 0.0 {
            return Err(ConfigError::ResidualTol);
        }
        if !self.step_tol.is_finite() || self.step_tol < 0.0 {
            return Err(ConfigError::StepTol);
        }
        if !self.radius_factor.is_finite() || self.radius_factor <= 0.0 {
            return Err(ConfigError::RadiusFactor);
        }
        if !self.singular_tol.is_finite() || !(0.0..1.0).contains(&self.singular_tol) {
            return Err(ConfigError::SingularTol);
        }
        Ok(())
    }
}
