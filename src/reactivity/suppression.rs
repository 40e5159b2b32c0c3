// ============================================================================
// spark-list - Suppression Scopes
// Withhold structural notifications and replace them with one reset
// ============================================================================
//
// A list keeps a nesting counter. While it is above zero, mutations apply
// silently. When the outermost scope is released (counter 1 -> 0), the list
// publishes exactly one reset: changing(true) then changed(true).
//
// Scopes are guards. Release them explicitly with `release()` to see a
// failing reset observer; dropping an unreleased scope releases it too and
// can only log such a failure.
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use crate::core::error::ListError;

// =============================================================================
// SUPPRESSION COUNTER
// =============================================================================

/// Nesting counter gating structural notifications for one list.
#[derive(Debug, Default)]
pub(crate) struct SuppressionCounter {
    depth: Cell<usize>,
    warned: Cell<bool>,
}

impl SuppressionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment depth, returns new depth
    pub fn enter(&self) -> usize {
        let depth = self.depth.get() + 1;
        self.depth.set(depth);
        depth
    }

    /// Decrement depth, returns new depth
    pub fn exit(&self) -> usize {
        let depth = self.depth.get().saturating_sub(1);
        self.depth.set(depth);
        depth
    }

    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    pub fn is_suppressed(&self) -> bool {
        self.depth.get() > 0
    }

    /// Returns true the first time it is called with no reset observers.
    pub fn take_unobserved_warning(&self, reset_observers: usize) -> bool {
        if reset_observers > 0 || self.warned.get() {
            return false;
        }
        self.warned.set(true);
        true
    }
}

// =============================================================================
// RESET TARGET
// =============================================================================

/// What a scope needs from the list that created it.
pub(crate) trait ResetTarget {
    fn suppression(&self) -> &SuppressionCounter;

    /// Publish changing(true) then changed(true).
    fn publish_reset(&self) -> Result<(), ListError>;
}

// =============================================================================
// SUPPRESSION SCOPE
// =============================================================================

/// Guard returned by
/// [`ObservableList::suppress_change_notifications`](crate::ObservableList::suppress_change_notifications).
///
/// # Example
///
/// ```
/// use spark_list::ObservableList;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let list = ObservableList::from_vec(vec![1, 2, 3]);
/// let resets = Rc::new(RefCell::new(Vec::new()));
///
/// let resets_clone = resets.clone();
/// let _sub = list.changed().subscribe(move |reset| resets_clone.borrow_mut().push(*reset));
///
/// let outer = list.suppress_change_notifications();
/// let inner = list.suppress_change_notifications();
/// list.add(4).unwrap();
/// inner.release().unwrap();
/// assert!(resets.borrow().is_empty());
///
/// outer.release().unwrap();
/// assert_eq!(*resets.borrow(), vec![true]);
/// ```
#[must_use = "notifications stay suppressed until the scope is released"]
pub struct SuppressionScope {
    target: Option<Rc<dyn ResetTarget>>,
}

impl SuppressionScope {
    pub(crate) fn acquire(target: Rc<dyn ResetTarget>) -> Self {
        target.suppression().enter();
        Self {
            target: Some(target),
        }
    }

    pub fn is_released(&self) -> bool {
        self.target.is_none()
    }

    /// Leave the scope. The outermost release publishes the reset.
    pub fn release(mut self) -> Result<(), ListError> {
        self.release_inner()
    }

    fn release_inner(&mut self) -> Result<(), ListError> {
        // take() makes a second release a no-op
        let Some(target) = self.target.take() else {
            return Ok(());
        };

        if target.suppression().exit() == 0 {
            tracing::trace!("suppression released, publishing reset");
            target.publish_reset()?;
        }
        Ok(())
    }
}

impl Drop for SuppressionScope {
    fn drop(&mut self) {
        if let Err(err) = self.release_inner() {
            tracing::error!(error = %err, "reset observer failed while dropping a suppression scope");
        }
    }
}

impl std::fmt::Debug for SuppressionScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuppressionScope")
            .field("released", &self.is_released())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        counter: SuppressionCounter,
        resets: Cell<u32>,
        fail: Cell<bool>,
    }

    impl Probe {
        fn new() -> Rc<Self> {
            Rc::new(Self {
                counter: SuppressionCounter::new(),
                resets: Cell::new(0),
                fail: Cell::new(false),
            })
        }
    }

    impl ResetTarget for Probe {
        fn suppression(&self) -> &SuppressionCounter {
            &self.counter
        }

        fn publish_reset(&self) -> Result<(), ListError> {
            self.resets.set(self.resets.get() + 1);
            if self.fail.get() {
                return Err(ListError::observer("changed", "reset failed".into()));
            }
            Ok(())
        }
    }

    #[test]
    fn counter_nesting() {
        let counter = SuppressionCounter::new();
        assert!(!counter.is_suppressed());

        assert_eq!(counter.enter(), 1);
        assert_eq!(counter.enter(), 2);
        assert!(counter.is_suppressed());

        assert_eq!(counter.exit(), 1);
        assert_eq!(counter.exit(), 0);
        assert!(!counter.is_suppressed());

        // Never goes negative
        assert_eq!(counter.exit(), 0);
    }

    #[test]
    fn warning_is_taken_once() {
        let counter = SuppressionCounter::new();
        assert!(!counter.take_unobserved_warning(1));
        assert!(counter.take_unobserved_warning(0));
        assert!(!counter.take_unobserved_warning(0));
    }

    #[test]
    fn only_outermost_release_resets() {
        let probe = Probe::new();

        let outer = SuppressionScope::acquire(probe.clone());
        let inner = SuppressionScope::acquire(probe.clone());
        assert_eq!(probe.counter.depth(), 2);

        inner.release().unwrap();
        assert_eq!(probe.resets.get(), 0);

        outer.release().unwrap();
        assert_eq!(probe.resets.get(), 1);
        assert_eq!(probe.counter.depth(), 0);
    }

    #[test]
    fn drop_releases_once() {
        let probe = Probe::new();
        {
            let _scope = SuppressionScope::acquire(probe.clone());
        }
        assert_eq!(probe.resets.get(), 1);
        assert_eq!(probe.counter.depth(), 0);
    }

    #[test]
    fn explicit_release_then_drop_does_not_double_decrement() {
        let probe = Probe::new();
        let outer = SuppressionScope::acquire(probe.clone());

        let mut inner = SuppressionScope::acquire(probe.clone());
        inner.release_inner().unwrap();
        assert!(inner.is_released());
        drop(inner);

        // Outer is still holding the counter
        assert_eq!(probe.counter.depth(), 1);
        assert_eq!(probe.resets.get(), 0);

        drop(outer);
        assert_eq!(probe.resets.get(), 1);
    }

    #[test]
    fn failed_reset_surfaces_on_explicit_release() {
        let probe = Probe::new();
        probe.fail.set(true);

        let scope = SuppressionScope::acquire(probe.clone());
        let err = scope.release().unwrap_err();
        assert!(err.is_observer_failure());
        assert_eq!(probe.counter.depth(), 0);
    }

    #[test]
    fn failed_reset_on_drop_is_swallowed() {
        let probe = Probe::new();
        probe.fail.set(true);
        {
            let _scope = SuppressionScope::acquire(probe.clone());
        }
        assert_eq!(probe.resets.get(), 1);
        assert_eq!(probe.counter.depth(), 0);
    }
}
