use std::fmt;

/// Which extremum a stationary point search is aiming for.
///
/// The label comes from the initial guess that produced a candidate, not from
/// any second-order test of the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extremum {
    Maximum,
    Minimum,
}

impl fmt::Display for Extremum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Maximum => f.write_str("maximum"),
            Self::Minimum => f.write_str("minimum"),
        }
    }
}
