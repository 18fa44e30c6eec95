//! Powell's hybrid method for square systems of nonlinear equations.
//!
//! # Algorithm
//!
//! Each iteration linearizes the system `F(x) = 0` with a central-difference
//! Jacobian `J` and picks a step inside a trust region of radius `Δ`:
//!
//! - the Gauss–Newton step `J·p = −F` if it fits inside the region,
//! - otherwise a point on the dog-leg path from the Cauchy point
//!   `−(‖g‖² / ‖J·g‖²)·g`, where `g = Jᵀ·F`, toward the Gauss–Newton point.
//!
//! The step is accepted when the actual reduction of `‖F‖²` is a reasonable
//! fraction of the reduction predicted by the linear model, and the radius
//! grows or shrinks with that ratio.
//!
//! When the Jacobian is numerically singular the Gauss–Newton point is skipped
//! and the solver moves along the steepest descent direction, which lets it
//! escape starting points such as a zero Lagrange multiplier.
//!
//! # Termination
//!
//! - [`Status::Converged`] — `‖F‖ ≤ residual_tol`
//! - [`Status::Stalled`] — the step or radius collapsed, or `Jᵀ·F = 0` away
//!   from a root
//! - [`Status::MaxIters`] — the iteration budget ran out
//! - [`Status::StoppedByObserver`] — an observer returned [`Action::StopEarly`]
//!
//! Only `Converged` means the returned `x` is a root. Callers should check
//! [`Solution::status`] before trusting the result.
//!
//! # Observer Events
//!
//! The solver emits one [`Event`] per iteration, after the trial step has been
//! accepted or rejected.

mod action;
mod config;
mod error;
mod event;
mod solution;
mod step;


pub use action::Action;
pub use config::{Config, ConfigError};
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};
pub use step::StepKind;

use lagrange_core::{EquationProblem, Model, Observer};
use tracing::debug;

use crate::equation::{Evaluation, evaluate};

use step::Linearization;

/// Reject a trial step unless the gain ratio exceeds this value.
const ACCEPT_RATIO: f64 = 1e-4;

/// Finds a root of the equation problem starting from `x0`.
///
/// The observer receives an [`Event`] after every iteration.
///
/// # Errors
///
/// Returns an error if the config is invalid, the residual at `x0` is not
/// finite, the Jacobian is not finite, or the model or problem fails during
/// evaluation.
pub fn solve<M, P, Obs, const N: usize>(
    model: &M,
    problem: &P,
    x0: [f64; N],
    config: &Config,
    mut observer: Obs,
) -> Result<Solution<M::Input, M::Output, N>, Error>
where
    M: Model,
    P: EquationProblem<N, Input = M::Input, Output = M::Output>,
    Obs: for<'a> Observer<Event<'a, M::Input, M::Output, N>, Action>,
{
    config.validate()?;

    let mut current = evaluate(model, problem, x0)?;
    let residual_norm = current.residual_norm();
    if !residual_norm.is_finite() {
        return Err(Error::NonFiniteResidual {
            x: x0.to_vec(),
            residual_norm,
        });
    }
    if residual_norm <= config.residual_tol {
        return Ok(finish(current, Status::Converged, 0));
    }

    let mut radius = config.radius_factor * norm(&x0).max(1.0);

    // Rejected steps leave `x` unchanged, so the linearization stays valid.
    let mut cached: Option<Linearization> = None;

    for iter in 1..=config.max_iters {
        let linearization = match cached.take() {
            Some(linearization) => linearization,
            None => linearize(model, problem, &current, config, iter)?,
        };

        let Some(trial) = linearization.dog_leg::<N>(radius) else {
            return Ok(finish(current, Status::Stalled, iter));
        };

        let candidate = evaluate(model, problem, add(&current.x, &trial.step))?;
        let current_sq = current.residual_norm().powi(2);
        let candidate_sq = candidate.residual_norm().powi(2);

        let predicted = current_sq - trial.predicted_sq;
        let gain_ratio = if predicted > 0.0 && candidate_sq.is_finite() {
            (current_sq - candidate_sq) / predicted
        } else {
            0.0
        };

        if gain_ratio < 0.25 {
            radius = 0.5 * trial.norm;
        } else if gain_ratio > 0.75 {
            radius = radius.max(2.0 * trial.norm);
        }

        let accepted = gain_ratio > ACCEPT_RATIO;
        if accepted {
            current = candidate;
        } else {
            cached = Some(linearization);
        }

        let event = Event {
            iter,
            eval: &current,
            step_kind: trial.kind,
            step_norm: trial.norm,
            gain_ratio,
            accepted,
            radius,
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            return Ok(finish(current, Status::StoppedByObserver, iter));
        }

        if current.residual_norm() <= config.residual_tol {
            return Ok(finish(current, Status::Converged, iter));
        }

        let scale = config.step_tol * (1.0 + norm(&current.x));
        if radius <= scale || (accepted && trial.norm <= scale) {
            return Ok(finish(current, Status::Stalled, iter));
        }
    }

    Ok(finish(current, Status::MaxIters, config.max_iters))
}

/// Finds a root of the equation problem without observation.
///
/// # Errors
///
/// Returns an error if the config is invalid, the residual at `x0` is not
/// finite, the Jacobian is not finite, or the model or problem fails during
/// evaluation.
pub fn solve_unobserved<M, P, const N: usize>(
    model: &M,
    problem: &P,
    x0: [f64; N],
    config: &Config,
) -> Result<Solution<M::Input, M::Output, N>, Error>
where
    M: Model,
    P: EquationProblem<N, Input = M::Input, Output = M::Output>,
{
    solve(model, problem, x0, config, ())
}

/// Builds the central-difference Jacobian at `current` and linearizes there.
fn linearize<M, P, const N: usize>(
    model: &M,
    problem: &P,
    current: &Evaluation<M::Input, M::Output, N>,
    config: &Config,
    iter: usize,
) -> Result<Linearization, Error>
where
    M: Model,
    P: EquationProblem<N, Input = M::Input, Output = M::Output>,
{
    let jacobian = config
        .jacobian
        .jacobian(|x| evaluate(model, problem, *x).map(|eval| eval.residuals), &current.x)?;
    if jacobian.iter().flatten().any(|v| !v.is_finite()) {
        return Err(Error::NonFiniteJacobian {
            x: current.x.to_vec(),
        });
    }

    let linearization = Linearization::new(&jacobian, &current.residuals, config.singular_tol);
    if linearization.is_singular() {
        debug!(iter, x = ?current.x, "jacobian is singular, skipping newton step");
    }
    Ok(linearization)
}

fn finish<I, O, const N: usize>(
    eval: Evaluation<I, O, N>,
    status: Status,
    iters: usize,
) -> Solution<I, O, N> {
    debug!(?status, iters, residual_norm = eval.residual_norm(), "hybrid solve finished");
    Solution::from_eval(eval, status, iters)
}

fn norm<const N: usize>(x: &[f64; N]) -> f64 {
    x.iter().map(|v| v * v).sum::<f64>().sqrt()
}

fn add<const N: usize>(x: &[f64; N], step: &[f64; N]) -> [f64; N] {
    std::array::from_fn(|i| x[i] + step[i])
}
