//! Traits that let one observer serve several solvers.
//!
//! An observer written against these traits only needs an iteration number
//! and a residual from the event. Solvers opt in by implementing them for
//! their own `Event` types.
//!
//! ```rust
//! use lagrange_core::Observer;
//! use lagrange_observers::traits::{HasIteration, HasResidual};
//!
//! /// Remembers the iteration with the smallest residual.
//! #[derive(Default)]
//! struct Best {
//!     iter: usize,
//!     residual: Option<f64>,
//! }
//!
//! impl<E: HasIteration + HasResidual, A> Observer<E, A> for Best {
//!     fn observe(&mut self, event: &E) -> Option<A> {
//!         if self.residual.is_none_or(|best| event.residual() < best) {
//!             self.iter = event.iteration();
//!             self.residual = Some(event.residual());
//!         }
//!         None
//!     }
//! }
//! ```

use lagrange_solvers::equation::hybrid;

/// An event tied to a numbered solver iteration.
pub trait HasIteration {
    /// Returns the iteration number, starting at 1 for each solve.
    fn iteration(&self) -> usize;
}

/// An event that carries a residual norm.
pub trait HasResidual {
    /// Returns the residual norm at the solver's current iterate.
    fn residual(&self) -> f64;
}

impl<I, O, const N: usize> HasIteration for hybrid::Event<'_, I, O, N> {
    fn iteration(&self) -> usize {
        self.iter
    }
}

impl<I, O, const N: usize> HasResidual for hybrid::Event<'_, I, O, N> {
    fn residual(&self) -> f64 {
        self.residual_norm()
    }
}
