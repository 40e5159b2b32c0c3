// ============================================================================
// spark-list - Property Notifier
// The item side of change tracking
// ============================================================================
//
// A list with change tracking enabled subscribes to two streams on each of
// its items: "property about to change" and "property changed". Items expose
// them through the ObservableObject trait. PropertyNotifier is a ready-made
// implementation items can embed and delegate to.
// ============================================================================

use std::rc::Rc;

use super::channel::Channel;
use crate::core::constants::{PROPERTY_CHANGED, PROPERTY_CHANGING};
use crate::core::error::ObserverError;
use crate::core::types::ObjectId;

// =============================================================================
// OBSERVABLE OBJECT
// =============================================================================

/// An item whose property changes can be tracked by a list.
///
/// `object_id` must be stable for the lifetime of the object and shared by
/// every handle to it; the list counts insertions per id.
pub trait ObservableObject {
    fn object_id(&self) -> ObjectId;

    /// Publishes the property name before the change is applied.
    fn property_changing(&self) -> Channel<String>;

    /// Publishes the property name after the change is applied.
    fn property_changed(&self) -> Channel<String>;
}

impl<O: ObservableObject + ?Sized> ObservableObject for Rc<O> {
    fn object_id(&self) -> ObjectId {
        (**self).object_id()
    }

    fn property_changing(&self) -> Channel<String> {
        (**self).property_changing()
    }

    fn property_changed(&self) -> Channel<String> {
        (**self).property_changed()
    }
}

// =============================================================================
// PROPERTY NOTIFIER
// =============================================================================

struct NotifierInner {
    changing: Channel<String>,
    changed: Channel<String>,
}

/// Embeddable source of property-change notifications.
///
/// Clones share identity and observers, so an item that derives `Clone`
/// around a `PropertyNotifier` keeps one identity across its clones.
///
/// # Example
///
/// ```
/// use spark_list::{ObservableObject, PropertyNotifier};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let notifier = PropertyNotifier::new();
/// let seen = Rc::new(RefCell::new(Vec::new()));
///
/// let seen_clone = seen.clone();
/// let _sub = notifier
///     .property_changed()
///     .subscribe(move |name| seen_clone.borrow_mut().push(name.clone()));
///
/// notifier.change("title", || { /* mutate the field here */ }).unwrap();
/// assert_eq!(*seen.borrow(), vec!["title".to_string()]);
/// ```
#[derive(Clone)]
pub struct PropertyNotifier {
    inner: Rc<NotifierInner>,
}

impl PropertyNotifier {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(NotifierInner {
                changing: Channel::new(PROPERTY_CHANGING),
                changed: Channel::new(PROPERTY_CHANGED),
            }),
        }
    }

    pub fn notify_changing(&self, property: &str) -> Result<(), ObserverError> {
        self.inner.changing.publish(&property.to_string())
    }

    pub fn notify_changed(&self, property: &str) -> Result<(), ObserverError> {
        self.inner.changed.publish(&property.to_string())
    }

    /// Bracket `apply` with changing/changed notifications for `property`.
    ///
    /// If a "changing" observer fails, `apply` is not run.
    pub fn change<R>(&self, property: &str, apply: impl FnOnce() -> R) -> Result<R, ObserverError> {
        self.notify_changing(property)?;
        let result = apply();
        self.notify_changed(property)?;
        Ok(result)
    }
}

impl Default for PropertyNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ObservableObject for PropertyNotifier {
    fn object_id(&self) -> ObjectId {
        ObjectId::of(&self.inner)
    }

    fn property_changing(&self) -> Channel<String> {
        self.inner.changing.clone()
    }

    fn property_changed(&self) -> Channel<String> {
        self.inner.changed.clone()
    }
}

/// Identity equality: two notifiers are equal when they are clones.
impl PartialEq for PropertyNotifier {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for PropertyNotifier {}

impl std::fmt::Debug for PropertyNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyNotifier")
            .field("id", &self.object_id())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
