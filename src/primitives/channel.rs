// ============================================================================
// spark-list - Channel
// Synchronous broadcast of one notification kind to zero or more observers
// ============================================================================
//
// A Channel<E> keeps its observers in registration order and calls them on
// the publisher's own stack. There is no buffering: an event published with
// nobody listening is gone.
//
// Delivery works on a snapshot of the observer list, so observers may
// subscribe or unsubscribe (including themselves) while an event is being
// delivered. An observer that unsubscribes before its turn is skipped.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::core::error::ObserverError;

// =============================================================================
// OBSERVER
// =============================================================================

/// Callback type stored for each observer.
pub type ObserverFn<E> = dyn Fn(&E) -> Result<(), ObserverError>;

struct Observer<E> {
    id: u64,
    active: Cell<bool>,
    callback: Box<ObserverFn<E>>,
}

struct ChannelInner<E> {
    name: &'static str,
    next_id: Cell<u64>,
    observers: RefCell<Vec<Rc<Observer<E>>>>,
}

// =============================================================================
// CHANNEL
// =============================================================================

/// A typed publish/subscribe broadcast primitive.
///
/// Cloning a `Channel` yields another handle to the same observer list.
///
/// # Example
///
/// ```
/// use spark_list::Channel;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let channel: Channel<i32> = Channel::new("numbers");
/// let total = Rc::new(Cell::new(0));
///
/// let total_clone = total.clone();
/// let sub = channel.subscribe(move |n| total_clone.set(total_clone.get() + n));
///
/// channel.publish(&2).unwrap();
/// channel.publish(&3).unwrap();
/// assert_eq!(total.get(), 5);
///
/// drop(sub);
/// channel.publish(&10).unwrap();
/// assert_eq!(total.get(), 5);
/// ```
pub struct Channel<E> {
    inner: Rc<ChannelInner<E>>,
}

impl<E> Clone for Channel<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<E> Channel<E> {
    /// Whether at least one observer is registered.
    pub fn has_observers(&self) -> bool {
        !self.inner.observers.borrow().is_empty()
    }

    pub fn observer_count(&self) -> usize {
        self.inner.observers.borrow().len()
    }
}

impl<E> fmt::Debug for Channel<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("name", &self.inner.name)
            .field("observers", &self.observer_count())
            .finish()
    }
}

impl<E: 'static> Channel<E> {
    /// Create a channel. `name` shows up in diagnostics and errors.
    pub fn new(name: &'static str) -> Self {
        Self {
            inner: Rc::new(ChannelInner {
                name,
                next_id: Cell::new(0),
                observers: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    /// Register an observer that cannot fail.
    pub fn subscribe(&self, observer: impl Fn(&E) + 'static) -> Subscription {
        self.try_subscribe(move |event| {
            observer(event);
            Ok(())
        })
    }

    /// Register an observer that may fail.
    ///
    /// A failure stops delivery of the current event: observers registered
    /// after the failing one do not see it, and `publish` returns the error.
    pub fn try_subscribe(
        &self,
        observer: impl Fn(&E) -> Result<(), ObserverError> + 'static,
    ) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);

        let entry = Rc::new(Observer {
            id,
            active: Cell::new(true),
            callback: Box::new(observer),
        });
        self.inner.observers.borrow_mut().push(entry.clone());

        let channel: Weak<ChannelInner<E>> = Rc::downgrade(&self.inner);
        Subscription::new(move || {
            entry.active.set(false);
            if let Some(channel) = channel.upgrade() {
                channel.observers.borrow_mut().retain(|o| o.id != entry.id);
            }
        })
    }

    /// Deliver `event` to every observer, in registration order.
    pub fn publish(&self, event: &E) -> Result<(), ObserverError> {
        // Snapshot so observers can (un)subscribe during delivery.
        let observers: Vec<Rc<Observer<E>>> = self.inner.observers.borrow().clone();

        for observer in &observers {
            if observer.active.get() {
                (observer.callback)(event)?;
            }
        }
        Ok(())
    }
}

// =============================================================================
// SUBSCRIPTION
// =============================================================================

/// Guard for a registration. Dropping it (or calling [`unsubscribe`]) runs
/// the teardown exactly once.
///
/// [`unsubscribe`]: Subscription::unsubscribe
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    teardowns: Vec<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// A subscription whose teardown is `f`.
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self {
            teardowns: vec![Box::new(f)],
        }
    }

    /// Combine two subscriptions; tearing down the result tears down both,
    /// `self` first.
    pub fn merge(mut self, mut other: Subscription) -> Subscription {
        self.teardowns.append(&mut other.teardowns);
        self
    }

    /// Whether there is still something to tear down.
    pub fn is_active(&self) -> bool {
        !self.teardowns.is_empty()
    }

    /// Tear down now.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        for teardown in self.teardowns.drain(..) {
            teardown();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
