use lagrange_core::Observer;
use tracing::debug;

use crate::traits::{HasIteration, HasResidual};

/// Emits a `DEBUG` level `tracing` event for every solver iteration.
///
/// Each event carries the observer's label along with the iteration number
/// and residual norm as structured fields. Never requests an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingObserver {
    label: String,
}

impl TracingObserver {
    /// Creates an observer whose events are tagged with `label`.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replaces the label, e.g. between consecutive solves.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Logs one event.
    pub fn log<E: HasIteration + HasResidual>(&self, event: &E) {
        debug!(
            label = %self.label,
            iter = event.iteration(),
            residual = event.residual(),
            "solver iteration"
        );
    }
}

impl<E, A> Observer<E, A> for TracingObserver
where
    E: HasIteration + HasResidual,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self.log(event);
        None
    }
}

impl<E, A> Observer<E, A> for &mut TracingObserver
where
    E: HasIteration + HasResidual,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        (*self).observe(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Event;

    impl HasIteration for Event {
        fn iteration(&self) -> usize {
            7
        }
    }

    impl HasResidual for Event {
        fn residual(&self) -> f64 {
            1e-3
        }
    }

    #[test]
    fn never_returns_an_action() {
        let mut observer = TracingObserver::new("maximum");
        let action: Option<()> = observer.observe(&Event);
        assert!(action.is_none());
    }

    #[test]
    fn label_can_change_between_solves() {
        let mut observer = TracingObserver::new("maximum");
        assert_eq!(observer.label(), "maximum");

        observer.set_label("minimum");
        assert_eq!(observer.label(), "minimum");
    }
}
