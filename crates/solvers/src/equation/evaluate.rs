use thiserror::Error;

use lagrange_core::{EquationProblem, Model, Snapshot};

/// An equation problem evaluated at one point.
///
/// Keeps the model call alongside the residuals so solvers can hand the final
/// input and output back to the caller without calling the model again.
#[derive(Debug, Clone)]
pub struct Evaluation<I, O, const N: usize> {
    pub x: [f64; N],
    pub residuals: [f64; N],
    pub snapshot: Snapshot<I, O>,
    norm: f64,
}

impl<I, O, const N: usize> Evaluation<I, O, N> {
    /// Euclidean norm of the residuals, computed once at evaluation.
    #[must_use]
    pub fn residual_norm(&self) -> f64 {
        self.norm
    }
}

/// Failure while evaluating an equation problem, tagged by which side failed.
#[derive(Debug, Error)]
pub enum EvalError<ME, PE> {
    /// The model call failed.
    #[error("model call failed")]
    Model(#[source] ME),

    /// The problem rejected `x` or could not compute residuals.
    #[error("problem could not map x or compute residuals")]
    Problem(#[source] PE),
}

/// Result of [`evaluate`] for a given model and problem.
pub type EvaluateResult<M, P, const N: usize> = Result<
    Evaluation<<M as Model>::Input, <M as Model>::Output, N>,
    EvalError<<M as Model>::Error, <P as EquationProblem<N>>::Error>,
>;

/// Runs `x` through the problem and model: `input(x)`, `call`, `residuals`.
///
/// # Errors
///
/// Returns [`EvalError::Problem`] if the problem rejects `x` or cannot form
/// residuals, and [`EvalError::Model`] if the model call fails.
pub fn evaluate<M, P, const N: usize>(
    model: &M,
    problem: &P,
    x: [f64; N],
) -> EvaluateResult<M, P, N>
where
    M: Model,
    P: EquationProblem<N, Input = M::Input, Output = M::Output>,
{
    let input = problem.input(&x).map_err(EvalError::Problem)?;
    let output = model.call(&input).map_err(EvalError::Model)?;
    let residuals = problem
        .residuals(&input, &output)
        .map_err(EvalError::Problem)?;
    let norm = residuals.iter().map(|r| r * r).sum::<f64>().sqrt();

    Ok(Evaluation {
        x,
        residuals,
        snapshot: Snapshot::new(input, output),
        norm,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use approx::assert_relative_eq;
    use thiserror::Error;

    /// Model that returns the squares of its inputs.
    struct Squares;

    impl Model for Squares {
        type Input = [f64; 2];
        type Output = [f64; 2];
        type Error = Infallible;

        fn call(&self, input: &[f64; 2]) -> Result<[f64; 2], Infallible> {
            Ok(input.map(|v| v * v))
        }
    }

    #[derive(Debug, Error)]
    #[error("negative input")]
    struct NegativeInput;

    /// Drives both squares to 4, rejecting negative variables.
    struct SquaresToFour;

    impl EquationProblem<2> for SquaresToFour {
        type Input = [f64; 2];
        type Output = [f64; 2];
        type Error = NegativeInput;

        fn input(&self, x: &[f64; 2]) -> Result<[f64; 2], NegativeInput> {
            if x.iter().any(|v| *v < 0.0) {
                return Err(NegativeInput);
            }
            Ok(*x)
        }

        fn residuals(
            &self,
            _input: &[f64; 2],
            output: &[f64; 2],
        ) -> Result<[f64; 2], NegativeInput> {
            Ok(output.map(|v| v - 4.0))
        }
    }

    #[test]
    fn computes_residuals_and_snapshot() {
        let eval = evaluate(&Squares, &SquaresToFour, [1.0, 3.0]).expect("should evaluate");

        assert_eq!(eval.x, [1.0, 3.0]);
        assert_eq!(eval.residuals, [-3.0, 5.0]);
        assert_eq!(eval.snapshot.output, [1.0, 9.0]);
        assert_relative_eq!(eval.residual_norm(), 34.0_f64.sqrt());
    }

    #[test]
    fn problem_errors_are_reported() {
        let result = evaluate(&Squares, &SquaresToFour, [-1.0, 3.0]);
        assert!(matches!(result, Err(EvalError::Problem(NegativeInput))));
    }
}
