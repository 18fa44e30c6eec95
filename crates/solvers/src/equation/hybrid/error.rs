use std::error::Error as StdError;

use thiserror::Error;

use crate::equation::EvalError;

use super::ConfigError;

/// Errors that can occur during a hybrid solve.
#[derive(Debug, Error)]
pub enum Error {
    /// The solver config failed validation.
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// The residual norm at the starting point is NaN or infinite.
    #[error("non-finite residual norm {residual_norm} at x = {x:?}")]
    NonFiniteResidual { x: Vec<f64>, residual_norm: f64 },

    /// A finite-difference Jacobian entry is NaN or infinite.
    #[error("non-finite jacobian at x = {x:?}")]
    NonFiniteJacobian { x: Vec<f64> },

    /// The model call failed.
    #[error("model call failed")]
    Model(#[source] Box<dyn StdError + Send + Sync>),

    /// The problem could not map `x` or compute residuals.
    #[error("problem error")]
    Problem(#[source] Box<dyn StdError + Send + Sync>),
}

impl<ME, PE> From<EvalError<ME, PE>> for Error
where
    ME: StdError + Send + Sync + 'static,
    PE: StdError + Send + Sync + 'static,
{
    fn from(err: EvalError<ME, PE>) -> Self {
        match err {
            EvalError::Model(e) => Self::Model(Box::new(e)),
            EvalError::Problem(e) => Self::Problem(Box::new(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::convert::Infallible;

    use thiserror::Error;

    #[derive(Debug, Error)]
    #[error("bad input")]
    struct BadInput;

    #[test]
    fn eval_errors_keep_their_source() {
        let err: Error = EvalError::<BadInput, Infallible>::Model(BadInput).into();
        assert!(matches!(err, Error::Model(_)));
        assert_eq!(err.to_string(), "model call failed");
        assert_eq!(StdError::source(&err).map(ToString::to_string).as_deref(), Some("bad input"));

        let err: Error = EvalError::<Infallible, BadInput>::Problem(BadInput).into();
        assert!(matches!(err, Error::Problem(_)));
        assert_eq!(StdError::source(&err).map(ToString::to_string).as_deref(), Some("bad input"));
    }
}
