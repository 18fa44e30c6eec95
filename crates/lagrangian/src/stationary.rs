//! Stationary points of a Lagrangian.
//!
//! A stationary point is an augmented state where every component of `∇L`
//! vanishes. [`find_stationary_point`] finds one by handing the gradient to
//! the hybrid root finder as a square system of `D` equations.
//!
//! Which stationary point is reached depends entirely on the initial guess.
//! The guess also labels the result: a [`Candidate`] found from a guess marked
//! [`Extremum::Maximum`] is reported as a maximum without any second-order
//! check.

use std::{convert::Infallible, fmt};

use lagrange_core::{EquationProblem, Observer};
use lagrange_solvers::{
    derivative::FiniteDifference,
    equation::hybrid::{self, Action, Status},
};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{Extremum, GradientModel, Lagrangian, ScalarFunction, ShapeMismatch};

/// Solver event emitted while searching for a stationary point.
pub type SolverEvent<'a, const D: usize> = hybrid::Event<'a, [f64; D], [f64; D], D>;

/// Where a search starts and what it is expected to find.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialGuess<const D: usize> {
    pub extremum: Extremum,
    pub state: [f64; D],
}

impl<const D: usize> InitialGuess<D> {
    #[must_use]
    pub const fn new(extremum: Extremum, state: [f64; D]) -> Self {
        Self { extremum, state }
    }
}

/// Configuration for a stationary point search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Root finder settings.
    pub solver: hybrid::Config,

    /// Finite difference used for `∇L`.
    pub difference: FiniteDifference,

    /// A converged state is rejected if `‖∇L‖` re-evaluated there exceeds this.
    pub stationarity_tol: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            solver: hybrid::Config::default(),
            difference: FiniteDifference::default(),
            stationarity_tol: 1e-6,
        }
    }
}

/// Errors that can occur when validating a stationary point config.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("stationarity_tol must be finite and positive")]
    StationarityTol,

    #[error(transparent)]
    Solver(#[from] hybrid::ConfigError),
}

impl Config {
    /// Validates the stationarity tolerance and the solver settings.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.stationarity_tol.is_finite() || self.stationarity_tol <= 0.0 {
            return Err(ConfigError::StationarityTol);
        }
        self.solver.validate()?;
        Ok(())
    }
}

/// Errors that can occur while searching for a stationary point.
#[derive(Debug, Error)]
pub enum Error {
    /// The search config failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// The guess length does not match the Lagrangian.
    #[error(transparent)]
    Shape(#[from] ShapeMismatch),

    /// The root finder returned an error rather than a status.
    #[error("root finder failed")]
    Solver(#[from] hybrid::Error),

    /// The root finder stopped without converging.
    #[error(
        "{extremum} search from {guess:?} did not converge ({status:?}): \
         ‖∇L‖ = {residual_norm:e} at {state:?}"
    )]
    NotConverged {
        extremum: Extremum,
        status: Status,
        guess: Vec<f64>,
        state: Vec<f64>,
        residual_norm: f64,
    },

    /// The root finder converged but `‖∇L‖` at the result is too large.
    #[error(
        "{extremum} search converged to {state:?} but ‖∇L‖ = {gradient_norm:e} \
         exceeds {tolerance:e}"
    )]
    NotStationary {
        extremum: Extremum,
        state: Vec<f64>,
        gradient_norm: f64,
        tolerance: f64,
    },
}

/// A verified stationary point of a Lagrangian.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate<const D: usize> {
    /// Label taken from the initial guess.
    pub extremum: Extremum,

    /// Augmented state: decision variables then multipliers.
    pub state: [f64; D],

    /// Number of leading entries of `state` that are decision variables.
    pub num_vars: usize,

    /// Objective value at the decision variables.
    pub value: f64,

    /// Constraint values at the decision variables.
    pub constraint_residuals: Vec<f64>,

    /// `‖∇L‖` re-evaluated at `state`.
    pub gradient_norm: f64,

    /// Root finder iterations.
    pub iters: usize,
}

impl<const D: usize> Candidate<D> {
    #[must_use]
    pub fn decision_vars(&self) -> &[f64] {
        &self.state[..self.num_vars]
    }

    #[must_use]
    pub fn multipliers(&self) -> &[f64] {
        &self.state[self.num_vars..]
    }
}

impl<const D: usize> fmt::Display for Candidate<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: (", self.extremum)?;
        for (i, v) in self.state.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v:.6}")?;
        }
        write!(f, ") with value {:.6}", self.value)
    }
}

/// Treats `∇L(state) = 0` as a square equation problem.
///
/// The solver variables are the augmented state itself and the residuals are
/// the gradient components.
#[derive(Debug, Clone, Copy, Default)]
pub struct StationarityProblem<const D: usize>;

impl<const D: usize> EquationProblem<D> for StationarityProblem<D> {
    type Input = [f64; D];
    type Output = [f64; D];
    type Error = Infallible;

    fn input(&self, x: &[f64; D]) -> Result<[f64; D], Infallible> {
        Ok(*x)
    }

    fn residuals(&self, _input: &[f64; D], output: &[f64; D]) -> Result<[f64; D], Infallible> {
        Ok(*output)
    }
}

/// Finds a stationary point of `lagrangian` starting from `guess`.
///
/// # Errors
///
/// Returns an error if the config is invalid, `D` does not match the
/// Lagrangian's dimension, the root finder fails or does not converge, or the
/// converged state does not pass the stationarity check.
pub fn find_stationary_point<F, C, const D: usize>(
    lagrangian: &Lagrangian<F, C>,
    guess: &InitialGuess<D>,
    config: &Config,
) -> Result<Candidate<D>, Error>
where
    F: ScalarFunction,
    C: ScalarFunction,
{
    find_stationary_point_observed(lagrangian, guess, config, ())
}

/// Finds a stationary point, reporting each solver iteration to `observer`.
///
/// # Errors
///
/// See [`find_stationary_point`].
pub fn find_stationary_point_observed<F, C, Obs, const D: usize>(
    lagrangian: &Lagrangian<F, C>,
    guess: &InitialGuess<D>,
    config: &Config,
    observer: Obs,
) -> Result<Candidate<D>, Error>
where
    F: ScalarFunction,
    C: ScalarFunction,
    Obs: for<'a> Observer<SolverEvent<'a, D>, Action>,
{
    config.validate()?;

    let model = GradientModel::<F, C, D>::new(lagrangian, config.difference)?;
    debug!(extremum = %guess.extremum, guess = ?guess.state, "searching for stationary point");

    let solution = hybrid::solve(
        &model,
        &StationarityProblem,
        guess.state,
        &config.solver,
        observer,
    )?;

    if !solution.status.is_converged() {
        warn!(
            extremum = %guess.extremum,
            status = ?solution.status,
            residual_norm = solution.residual_norm,
            "stationary point search did not converge"
        );
        return Err(Error::NotConverged {
            extremum: guess.extremum,
            status: solution.status,
            guess: guess.state.to_vec(),
            state: solution.x.to_vec(),
            residual_norm: solution.residual_norm,
        });
    }

    let state = solution.x;
    let gradient_norm = lagrangian
        .gradient(&state, &config.difference)?
        .iter()
        .map(|g| g * g)
        .sum::<f64>()
        .sqrt();
    if gradient_norm > config.stationarity_tol {
        warn!(extremum = %guess.extremum, gradient_norm, "converged state is not stationary");
        return Err(Error::NotStationary {
            extremum: guess.extremum,
            state: state.to_vec(),
            gradient_norm,
            tolerance: config.stationarity_tol,
        });
    }

    let (vars, _) = lagrangian.split(&state)?;
    let candidate = Candidate {
        extremum: guess.extremum,
        state,
        num_vars: vars.len(),
        value: lagrangian.objective_value(vars)?,
        constraint_residuals: lagrangian.constraint_residuals(vars)?,
        gradient_norm,
        iters: solution.iters,
    };
    debug!(%candidate, iters = candidate.iters, "found stationary point");

    Ok(candidate)
}
