// ============================================================================
// spark-list - Lifecycle Token
// Reference-counted ownership of a releasable subscription
// ============================================================================

use super::channel::Subscription;

/// Wraps a [`Subscription`] shared by several logical owners.
///
/// The count starts at 1. [`retain`](Self::retain) adds an owner,
/// [`release`](Self::release) removes one, and the subscription is torn down
/// exactly once, on the transition to zero.
///
/// # Example
///
/// ```
/// use spark_list::{LifecycleToken, Subscription};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let released = Rc::new(Cell::new(0));
/// let released_clone = released.clone();
/// let mut token = LifecycleToken::new(Subscription::new(move || {
///     released_clone.set(released_clone.get() + 1)
/// }));
///
/// token.retain();
/// assert!(!token.release());
/// assert_eq!(released.get(), 0);
///
/// assert!(token.release());
/// assert_eq!(released.get(), 1);
///
/// // Already released: nothing more happens
/// assert!(!token.release());
/// assert_eq!(released.get(), 1);
/// ```
#[derive(Debug)]
pub struct LifecycleToken {
    refs: usize,
    resource: Option<Subscription>,
}

impl LifecycleToken {
    pub fn new(resource: Subscription) -> Self {
        Self {
            refs: 1,
            resource: Some(resource),
        }
    }

    /// Current number of owners.
    pub fn ref_count(&self) -> usize {
        self.refs
    }

    pub fn is_released(&self) -> bool {
        self.resource.is_none()
    }

    /// Add an owner. Has no effect once released.
    pub fn retain(&mut self) {
        if !self.is_released() {
            self.refs += 1;
        }
    }

    /// Drop an owner. Returns `true` when this call tore the resource down.
    pub fn release(&mut self) -> bool {
        if self.is_released() {
            return false;
        }

        self.refs -= 1;
        if self.refs == 0 {
            self.teardown();
            true
        } else {
            false
        }
    }

    /// Tear down regardless of how many owners remain.
    pub fn release_all(&mut self) -> bool {
        if self.is_released() {
            return false;
        }
        self.refs = 0;
        self.teardown();
        true
    }

    fn teardown(&mut self) {
        if let Some(resource) = self.resource.take() {
            resource.unsubscribe();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
