//! The fixed problem: extremize `x + y` subject to `x² + y² = 1`.
//!
//! The Lagrangian is `L(x, y, λ) = x + y + λ(x² + y² − 1)` with stationary
//! points at `±(√2/2, √2/2, −√2/2)`. The maximum `√2` is reached from
//! [`MAXIMUM_GUESS`] and the minimum `−√2` from [`MINIMUM_GUESS`]. Both guesses
//! were chosen by hand for this problem and say nothing about other
//! objectives or constraints.

use crate::{
    Extremum, Lagrangian, Linear, Sphere,
    stationary::{self, Candidate, Config, InitialGuess},
};

/// Lagrangian of the unit circle problem.
pub type UnitCircleLagrangian = Lagrangian<Linear, Sphere>;

/// Candidate over the augmented state `(x, y, λ)`.
pub type UnitCircleCandidate = Candidate<3>;

pub const MAXIMUM_GUESS: InitialGuess<3> = InitialGuess::new(Extremum::Maximum, [1.0, 1.0, 0.0]);

pub const MINIMUM_GUESS: InitialGuess<3> =
    InitialGuess::new(Extremum::Minimum, [-1.0, -1.0, 0.0]);

/// Builds `x + y + λ(x² + y² − 1)`.
#[must_use]
pub fn lagrangian() -> UnitCircleLagrangian {
    // Known-good arity, unwrap is safe
    Lagrangian::new(Linear::new(vec![1.0, 1.0]), vec![Sphere::new(2, 1.0)]).unwrap()
}

/// Outcome of both searches.
///
/// Each search fails or succeeds on its own, so one failure never hides the
/// other result.
#[derive(Debug)]
pub struct Extrema {
    pub maximum: Result<UnitCircleCandidate, stationary::Error>,
    pub minimum: Result<UnitCircleCandidate, stationary::Error>,
}

impl Extrema {
    /// Iterates over both outcomes, maximum first.
    pub fn iter(&self) -> impl Iterator<Item = &Result<UnitCircleCandidate, stationary::Error>> {
        [&self.maximum, &self.minimum].into_iter()
    }

    /// Returns the candidates whose search succeeded, maximum first.
    pub fn candidates(&self) -> impl Iterator<Item = &UnitCircleCandidate> {
        self.iter().filter_map(|result| result.as_ref().ok())
    }
}

/// Searches for the maximum, then the minimum.
///
/// Use [`stationary::find_stationary_point_observed`] with [`MAXIMUM_GUESS`]
/// and [`MINIMUM_GUESS`] to watch each search separately.
#[must_use]
pub fn solve_extrema(lagrangian: &UnitCircleLagrangian, config: &Config) -> Extrema {
    Extrema {
        maximum: stationary::find_stationary_point(lagrangian, &MAXIMUM_GUESS, config),
        minimum: stationary::find_stationary_point(lagrangian, &MINIMUM_GUESS, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn finds_both_extrema() {
        let extrema = solve_extrema(&lagrangian(), &Config::default());

        let maximum = extrema.maximum.as_ref().expect("maximum converges");
        let minimum = extrema.minimum.as_ref().expect("minimum converges");

        assert_eq!(maximum.extremum, Extremum::Maximum);
        assert_eq!(minimum.extremum, Extremum::Minimum);
        assert_relative_eq!(maximum.value, 2.0_f64.sqrt(), epsilon = 1e-6);
        assert_relative_eq!(minimum.value, -(2.0_f64.sqrt()), epsilon = 1e-6);

        let order: Vec<_> = extrema.candidates().map(|c| c.extremum).collect();
        assert_eq!(order, [Extremum::Maximum, Extremum::Minimum]);
    }
}
