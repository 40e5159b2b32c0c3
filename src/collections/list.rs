// ============================================================================
// spark-list - ObservableList
// An ordered sequence that reports every structural change
// ============================================================================
//
// Every targeted mutation (insert, remove, replace, move, and their range
// forms) publishes, in this order:
//
//   changing(false) -> before_<kind> -> [mutation] -> changed(false) -> <kind>
//
// Clearing, sorting and explicit resets publish changing(true) and
// changed(true) instead. While a suppression scope is open nothing is
// published; the outermost scope publishes one reset when it closes.
//
// Bulk operations touching more than `reset_threshold` of the list (and more
// than `reset_min_count` items) open such a scope themselves, so a large load
// reaches observers as a single reset rather than a flood of item events.
// ============================================================================

use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::core::config::ListConfig;
use crate::core::constants::*;
use crate::core::error::ListError;
use crate::core::types::{ItemPropertyChange, ListChange, MoveChange};
use crate::primitives::channel::{Channel, Subscription};
use crate::primitives::lazy::LazyChannel;
use crate::primitives::notifier::ObservableObject;
use crate::reactivity::suppression::{ResetTarget, SuppressionCounter, SuppressionScope};
use crate::reactivity::tracking::{ItemWatcher, PropertyChangeTracker};

// =============================================================================
// LIST INNER
// =============================================================================

pub(crate) struct ListInner<T> {
    items: RefCell<Vec<T>>,
    config: ListConfig,
    suppression: Rc<SuppressionCounter>,

    /// Present only while change tracking is enabled
    watcher: RefCell<Option<Box<dyn ItemWatcher<T>>>>,

    /// Live `on_should_reset` subscriptions
    reset_observers: Cell<usize>,

    changing: LazyChannel<bool>,
    changed: LazyChannel<bool>,
    before_items_added: LazyChannel<ListChange<T>>,
    items_added: LazyChannel<ListChange<T>>,
    before_items_removed: LazyChannel<ListChange<T>>,
    items_removed: LazyChannel<ListChange<T>>,
    before_item_replaced: LazyChannel<ListChange<T>>,
    item_replaced: LazyChannel<ListChange<T>>,
    before_items_moved: LazyChannel<MoveChange<T>>,
    items_moved: LazyChannel<MoveChange<T>>,
    item_changing: LazyChannel<ItemPropertyChange<T>>,
    item_changed: LazyChannel<ItemPropertyChange<T>>,
}

impl<T: 'static> ListInner<T> {
    fn new(items: Vec<T>, config: ListConfig) -> Self {
        Self {
            items: RefCell::new(items),
            config,
            suppression: Rc::new(SuppressionCounter::new()),
            watcher: RefCell::new(None),
            reset_observers: Cell::new(0),
            changing: LazyChannel::new(CHANGING),
            changed: LazyChannel::new(CHANGED),
            before_items_added: LazyChannel::new(BEFORE_ITEMS_ADDED),
            items_added: LazyChannel::new(ITEMS_ADDED),
            before_items_removed: LazyChannel::new(BEFORE_ITEMS_REMOVED),
            items_removed: LazyChannel::new(ITEMS_REMOVED),
            before_item_replaced: LazyChannel::new(BEFORE_ITEM_REPLACED),
            item_replaced: LazyChannel::new(ITEM_REPLACED),
            before_items_moved: LazyChannel::new(BEFORE_ITEMS_MOVED),
            items_moved: LazyChannel::new(ITEMS_MOVED),
            item_changing: LazyChannel::new(ITEM_CHANGING),
            item_changed: LazyChannel::new(ITEM_CHANGED),
        }
    }

    fn track(&self, items: &[T]) {
        if let Some(watcher) = self.watcher.borrow_mut().as_mut() {
            for item in items {
                watcher.track(item);
            }
        }
    }

    fn untrack(&self, items: &[T]) {
        if let Some(watcher) = self.watcher.borrow_mut().as_mut() {
            for item in items {
                watcher.untrack(item);
            }
        }
    }

    /// Release every token but keep tracking enabled.
    fn release_tracked(&self) {
        if let Some(watcher) = self.watcher.borrow_mut().as_mut() {
            watcher.release_all();
        }
    }

    fn disable_tracking(&self) {
        let watcher = self.watcher.borrow_mut().take();
        if let Some(mut watcher) = watcher {
            watcher.release_all();
        }
    }
}

impl<T: 'static> ResetTarget for ListInner<T> {
    fn suppression(&self) -> &SuppressionCounter {
        &self.suppression
    }

    fn publish_reset(&self) -> Result<(), ListError> {
        emit(&self.changing, &true)?;
        emit(&self.changed, &true)
    }
}

fn emit<E: 'static>(channel: &LazyChannel<E>, event: &E) -> Result<(), ListError> {
    channel
        .publish(event)
        .map_err(|source| ListError::observer(channel.name(), source))
}

fn check_index(index: usize, len: usize) -> Result<(), ListError> {
    if index < len {
        Ok(())
    } else {
        Err(ListError::IndexOutOfRange { index, len })
    }
}

fn check_insert_index(index: usize, len: usize) -> Result<(), ListError> {
    if index <= len {
        Ok(())
    } else {
        Err(ListError::invalid_argument(
            "index",
            format!("{index} is past the end (length {len})"),
        ))
    }
}

fn check_range(index: usize, count: usize, len: usize) -> Result<(), ListError> {
    let end = index.saturating_add(count);
    if index > len {
        Err(ListError::IndexOutOfRange { index, len })
    } else if end > len {
        Err(ListError::IndexOutOfRange {
            index: end - 1,
            len,
        })
    } else {
        Ok(())
    }
}

/// Outcome of a structural mutation that reached storage.
///
/// `delivered` carries an observer failure from after the mutation; storage
/// and tracking are already updated when it is inspected.
struct Applied<R> {
    value: R,
    delivered: Result<(), ListError>,
}

// =============================================================================
// OBSERVABLE LIST
// =============================================================================

/// An observable, index-addressable list.
///
/// `ObservableList` is a handle: clones share the same items, channels and
/// tracking state. The list is single-threaded and does not guard against
/// observers that mutate it during delivery; such mutations interleave with
/// the one in flight.
///
/// Observer callbacks run with no internal borrow held, so they may read the
/// list. Closures passed to [`with`](Self::with), [`for_each`](Self::for_each),
/// [`sort_by`](Self::sort_by) and friends run while the items are borrowed
/// and must not mutate the list.
///
/// # Example
///
/// ```
/// use spark_list::ObservableList;
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let list = ObservableList::from_vec(vec!["a", "b", "c"]);
/// let log = Rc::new(RefCell::new(Vec::new()));
///
/// let log_clone = log.clone();
/// let _added = list.items_added().subscribe(move |change| {
///     log_clone.borrow_mut().push(format!("added {:?} at {}", change.items, change.index));
/// });
/// let log_clone = log.clone();
/// let _moved = list.items_moved().subscribe(move |mv| {
///     log_clone.borrow_mut().push(format!("moved {} -> {}", mv.from, mv.to));
/// });
///
/// list.add("d").unwrap();
/// list.move_item(0, 2).unwrap();
///
/// assert_eq!(list.to_vec(), vec!["b", "c", "a", "d"]);
/// assert_eq!(*log.borrow(), vec!["added [\"d\"] at 3", "moved 0 -> 2"]);
/// ```
pub struct ObservableList<T> {
    inner: Rc<ListInner<T>>,
}

/// Non-owning handle to an [`ObservableList`], for observers that need to
/// reach back into the list without keeping it alive.
pub struct WeakObservableList<T> {
    inner: Weak<ListInner<T>>,
}

impl<T> Clone for ObservableList<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> Clone for WeakObservableList<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Weak::clone(&self.inner),
        }
    }
}

impl<T> WeakObservableList<T> {
    pub fn upgrade(&self) -> Option<ObservableList<T>> {
        self.inner.upgrade().map(|inner| ObservableList { inner })
    }
}

impl<T: Clone + PartialEq + 'static> ObservableList<T> {
    // =========================================================================
    // CONSTRUCTION
    // =========================================================================

    /// Create an empty list with the default reset policy.
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    /// Create a list holding `items`, with the default reset policy.
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            inner: Rc::new(ListInner::new(items, ListConfig::default())),
        }
    }

    /// Create a list with a custom reset ratio.
    pub fn with_threshold(items: Vec<T>, reset_threshold: f64) -> Result<Self, ListError> {
        Self::with_config(
            items,
            ListConfig::default().with_reset_threshold(reset_threshold),
        )
    }

    /// Create a list with explicit options.
    pub fn with_config(items: Vec<T>, config: ListConfig) -> Result<Self, ListError> {
        config.validate()?;
        Ok(Self {
            inner: Rc::new(ListInner::new(items, config)),
        })
    }

    pub fn config(&self) -> &ListConfig {
        &self.inner.config
    }

    pub fn downgrade(&self) -> WeakObservableList<T> {
        WeakObservableList {
            inner: Rc::downgrade(&self.inner),
        }
    }

    // =========================================================================
    // READING
    // =========================================================================

    pub fn len(&self) -> usize {
        self.inner.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Always `false`; kept for parity with read-only list views.
    pub fn is_read_only(&self) -> bool {
        false
    }

    /// Clone of the item at `index`.
    pub fn get(&self, index: usize) -> Result<T, ListError> {
        let items = self.inner.items.borrow();
        check_index(index, items.len())?;
        Ok(items[index].clone())
    }

    pub fn first(&self) -> Option<T> {
        self.inner.items.borrow().first().cloned()
    }

    pub fn last(&self) -> Option<T> {
        self.inner.items.borrow().last().cloned()
    }

    pub fn contains(&self, item: &T) -> bool {
        self.inner.items.borrow().contains(item)
    }

    /// Position of the first item equal to `item`.
    pub fn index_of(&self, item: &T) -> Option<usize> {
        self.inner.items.borrow().iter().position(|x| x == item)
    }

    /// Borrow the items as a slice for the duration of `f`.
    pub fn with<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.inner.items.borrow())
    }

    /// Snapshot of the current items.
    pub fn to_vec(&self) -> Vec<T> {
        self.inner.items.borrow().clone()
    }

    pub fn for_each(&self, mut f: impl FnMut(&T, usize)) {
        for (index, item) in self.inner.items.borrow().iter().enumerate() {
            f(item, index);
        }
    }

    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Vec<U> {
        self.inner.items.borrow().iter().map(f).collect()
    }

    pub fn filter(&self, mut f: impl FnMut(&T) -> bool) -> Vec<T> {
        self.inner
            .items
            .borrow()
            .iter()
            .filter(|item| f(item))
            .cloned()
            .collect()
    }

    pub fn any(&self, f: impl FnMut(&T) -> bool) -> bool {
        self.inner.items.borrow().iter().any(f)
    }

    pub fn all(&self, f: impl FnMut(&T) -> bool) -> bool {
        self.inner.items.borrow().iter().all(f)
    }

    // =========================================================================
    // CHANNELS
    // =========================================================================

    /// Fires before any structural change. `true` means a reset.
    pub fn changing(&self) -> &Channel<bool> {
        self.inner.changing.get()
    }

    /// Fires after any structural change. `true` means a reset.
    pub fn changed(&self) -> &Channel<bool> {
        self.inner.changed.get()
    }

    pub fn before_items_added(&self) -> &Channel<ListChange<T>> {
        self.inner.before_items_added.get()
    }

    pub fn items_added(&self) -> &Channel<ListChange<T>> {
        self.inner.items_added.get()
    }

    pub fn before_items_removed(&self) -> &Channel<ListChange<T>> {
        self.inner.before_items_removed.get()
    }

    pub fn items_removed(&self) -> &Channel<ListChange<T>> {
        self.inner.items_removed.get()
    }

    /// Carries the incoming item and the replaced index.
    pub fn before_item_replaced(&self) -> &Channel<ListChange<T>> {
        self.inner.before_item_replaced.get()
    }

    /// Carries the incoming item and the replaced index.
    pub fn item_replaced(&self) -> &Channel<ListChange<T>> {
        self.inner.item_replaced.get()
    }

    pub fn before_items_moved(&self) -> &Channel<MoveChange<T>> {
        self.inner.before_items_moved.get()
    }

    pub fn items_moved(&self) -> &Channel<MoveChange<T>> {
        self.inner.items_moved.get()
    }

    /// Property changes about to happen on tracked items.
    pub fn item_changing(&self) -> &Channel<ItemPropertyChange<T>> {
        self.inner.item_changing.get()
    }

    /// Property changes that happened on tracked items.
    pub fn item_changed(&self) -> &Channel<ItemPropertyChange<T>> {
        self.inner.item_changed.get()
    }

    // =========================================================================
    // DERIVED STREAMS
    // =========================================================================

    /// Length observed whenever `changing` fires, skipping repeats.
    pub fn on_count_changing(&self, f: impl Fn(usize) + 'static) -> Subscription {
        self.distinct_on(self.changing(), |items| items.len(), f)
    }

    /// Length observed whenever `changed` fires, skipping repeats.
    pub fn on_count_changed(&self, f: impl Fn(usize) + 'static) -> Subscription {
        self.distinct_on(self.changed(), |items| items.len(), f)
    }

    /// Emptiness observed whenever `changed` fires, skipping repeats.
    pub fn on_is_empty_changed(&self, f: impl Fn(bool) + 'static) -> Subscription {
        self.distinct_on(self.changed(), |items| items.is_empty(), f)
    }

    /// Fires after every reset.
    ///
    /// Live subscriptions are counted; suppressing notifications with none
    /// of them alive triggers a one-time advisory.
    pub fn on_should_reset(&self, f: impl Fn() + 'static) -> Subscription {
        let inner = &self.inner;
        inner.reset_observers.set(inner.reset_observers.get() + 1);

        let list = Rc::downgrade(inner);
        let counted = Subscription::new(move || {
            if let Some(list) = list.upgrade() {
                list.reset_observers
                    .set(list.reset_observers.get().saturating_sub(1));
            }
        });

        self.changed()
            .subscribe(move |reset| {
                if *reset {
                    f();
                }
            })
            .merge(counted)
    }

    fn distinct_on<V: Copy + PartialEq + 'static>(
        &self,
        source: &Channel<bool>,
        read: impl Fn(&[T]) -> V + 'static,
        f: impl Fn(V) + 'static,
    ) -> Subscription {
        let list = Rc::downgrade(&self.inner);
        let last: Cell<Option<V>> = Cell::new(None);

        source.subscribe(move |_| {
            let Some(list) = list.upgrade() else {
                return;
            };
            let value = read(&list.items.borrow());
            if last.get() != Some(value) {
                last.set(Some(value));
                f(value);
            }
        })
    }

    // =========================================================================
    // SUPPRESSION
    // =========================================================================

    /// Withhold structural notifications until the returned scope is
    /// released. Scopes nest; the outermost release publishes one reset.
    pub fn suppress_change_notifications(&self) -> SuppressionScope {
        let inner = &self.inner;

        if inner.config.warn_on_unobserved_suppression
            && inner
                .suppression
                .take_unobserved_warning(inner.reset_observers.get())
        {
            tracing::warn!(
                "change notifications suppressed without an on_should_reset observer; \
                 item-level observers will appear to miss changes"
            );
        }

        SuppressionScope::acquire(Rc::clone(&self.inner) as Rc<dyn ResetTarget>)
    }

    pub fn are_change_notifications_enabled(&self) -> bool {
        !self.inner.suppression.is_suppressed()
    }

    pub fn suppression_depth(&self) -> usize {
        self.inner.suppression.depth()
    }

    /// Run `op`, inside a suppression scope when `affected` items make it
    /// a large change. The scope is released on every path.
    fn with_reset_policy<R>(
        &self,
        affected: usize,
        op: impl FnOnce() -> Result<R, ListError>,
    ) -> Result<R, ListError> {
        let len = self.len();
        if !self.inner.config.is_above_reset_threshold(affected, len) {
            return op();
        }

        tracing::debug!(affected, len, "bulk change collapses into a reset");
        let scope = self.suppress_change_notifications();
        let result = op();
        let released = scope.release();

        let value = result?;
        released?;
        Ok(value)
    }

    // =========================================================================
    // STRUCTURAL MUTATION
    // =========================================================================

    /// Apply one structural mutation with its before/after notifications.
    fn apply<E: 'static, R>(
        &self,
        before: &LazyChannel<E>,
        after: &LazyChannel<E>,
        event: impl FnOnce() -> E,
        mutate: impl FnOnce(&mut Vec<T>) -> Result<R, ListError>,
    ) -> Result<Applied<R>, ListError> {
        let inner = &self.inner;

        if inner.suppression.is_suppressed() {
            let value = mutate(&mut inner.items.borrow_mut())?;
            return Ok(Applied {
                value,
                delivered: Ok(()),
            });
        }

        // Only build the payload if someone will see it.
        let event = (before.has_observers() || after.has_observers()).then(event);

        emit(&inner.changing, &false)?;
        if let Some(event) = &event {
            emit(before, event)?;
        }

        let value = mutate(&mut inner.items.borrow_mut())?;

        let delivered = emit(&inner.changed, &false).and_then(|()| match &event {
            Some(event) => emit(after, event),
            None => Ok(()),
        });

        Ok(Applied { value, delivered })
    }

    /// Insert `item` at `index`. `index == len()` appends.
    pub fn insert(&self, index: usize, item: T) -> Result<(), ListError> {
        check_insert_index(index, self.len())?;

        let inner = &self.inner;
        let tracked = item.clone();
        let applied = self.apply(
            &inner.before_items_added,
            &inner.items_added,
            || ListChange::single(tracked.clone(), index),
            |items| {
                check_insert_index(index, items.len())?;
                items.insert(index, item);
                Ok(())
            },
        )?;

        inner.track(std::slice::from_ref(&tracked));
        applied.delivered
    }

    /// Append `item`.
    pub fn add(&self, item: T) -> Result<(), ListError> {
        self.insert(self.len(), item)
    }

    /// Remove and return the item at `index`.
    pub fn remove_at(&self, index: usize) -> Result<T, ListError> {
        let removed = self.get(index)?;

        let inner = &self.inner;
        let applied = self.apply(
            &inner.before_items_removed,
            &inner.items_removed,
            || ListChange::single(removed, index),
            |items| {
                check_index(index, items.len())?;
                Ok(items.remove(index))
            },
        )?;

        inner.untrack(std::slice::from_ref(&applied.value));
        applied.delivered?;
        Ok(applied.value)
    }

    /// Remove the first item equal to `item`. Returns whether one was found.
    pub fn remove(&self, item: &T) -> Result<bool, ListError> {
        match self.index_of(item) {
            Some(index) => {
                self.remove_at(index)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Replace the item at `index`, returning the old one.
    pub fn set(&self, index: usize, item: T) -> Result<T, ListError> {
        check_index(index, self.len())?;

        let inner = &self.inner;
        let tracked = item.clone();
        let applied = self.apply(
            &inner.before_item_replaced,
            &inner.item_replaced,
            || ListChange::single(tracked.clone(), index),
            |items| {
                check_index(index, items.len())?;
                Ok(std::mem::replace(&mut items[index], item))
            },
        )?;

        inner.untrack(std::slice::from_ref(&applied.value));
        inner.track(std::slice::from_ref(&tracked));
        applied.delivered?;
        Ok(applied.value)
    }

    /// Take the item at `old_index` out and reinsert it at `new_index`.
    /// Both indices must be in `[0, len)`.
    pub fn move_item(&self, old_index: usize, new_index: usize) -> Result<(), ListError> {
        let moved = self.get(old_index)?;
        check_index(new_index, self.len())?;

        let inner = &self.inner;
        let applied = self.apply(
            &inner.before_items_moved,
            &inner.items_moved,
            || MoveChange::new(moved, old_index, new_index),
            |items| {
                check_index(old_index, items.len())?;
                check_index(new_index, items.len())?;
                let item = items.remove(old_index);
                items.insert(new_index, item);
                Ok(())
            },
        )?;

        applied.delivered
    }

    // =========================================================================
    // BULK MUTATION
    // =========================================================================

    /// Append all `items`.
    pub fn add_range(&self, items: impl IntoIterator<Item = T>) -> Result<(), ListError> {
        let items: Vec<T> = items.into_iter().collect();
        if items.is_empty() {
            return Ok(());
        }

        self.with_reset_policy(items.len(), || self.splice_in(None, items))
    }

    /// Insert all `items` starting at `index`.
    pub fn insert_range(
        &self,
        index: usize,
        items: impl IntoIterator<Item = T>,
    ) -> Result<(), ListError> {
        check_insert_index(index, self.len())?;

        let items: Vec<T> = items.into_iter().collect();
        if items.is_empty() {
            return Ok(());
        }

        self.with_reset_policy(items.len(), || self.splice_in(Some(index), items))
    }

    /// `None` appends at whatever the length is when the splice runs.
    fn splice_in(&self, index: Option<usize>, items: Vec<T>) -> Result<(), ListError> {
        let inner = &self.inner;
        let index = index.unwrap_or_else(|| self.len());

        let applied = self.apply(
            &inner.before_items_added,
            &inner.items_added,
            || ListChange::new(items.clone(), index),
            |storage| {
                check_insert_index(index, storage.len())?;
                storage.splice(index..index, items.iter().cloned());
                Ok(())
            },
        )?;

        inner.track(&items);
        applied.delivered
    }

    /// Remove `count` items starting at `index`, returning them.
    pub fn remove_range(&self, index: usize, count: usize) -> Result<Vec<T>, ListError> {
        check_range(index, count, self.len())?;
        if count == 0 {
            return Ok(Vec::new());
        }

        self.with_reset_policy(count, || {
            let inner = &self.inner;
            let applied = self.apply(
                &inner.before_items_removed,
                &inner.items_removed,
                || ListChange::new(inner.items.borrow()[index..index + count].to_vec(), index),
                |items| {
                    check_range(index, count, items.len())?;
                    Ok(items.drain(index..index + count).collect::<Vec<T>>())
                },
            )?;

            inner.untrack(&applied.value);
            applied.delivered?;
            Ok(applied.value)
        })
    }

    /// Remove each of `items` in turn, as if by [`remove`](Self::remove).
    ///
    /// Every removal is its own event, so observers keeping positions stay
    /// in step. Returns how many items were found and removed.
    pub fn remove_all(&self, items: &[T]) -> Result<usize, ListError> {
        if items.is_empty() {
            return Ok(0);
        }

        self.with_reset_policy(items.len(), || {
            let mut removed = 0;
            for item in items {
                if self.remove(item)? {
                    removed += 1;
                }
            }
            Ok(removed)
        })
    }

    // =========================================================================
    // RESETS
    // =========================================================================

    /// Remove everything. Publishes a reset and releases all tracked items.
    pub fn clear(&self) -> Result<(), ListError> {
        let inner = &self.inner;

        if inner.suppression.is_suppressed() {
            inner.items.borrow_mut().clear();
            inner.release_tracked();
            return Ok(());
        }

        emit(&inner.changing, &true)?;
        inner.items.borrow_mut().clear();
        let delivered = emit(&inner.changed, &true);

        inner.release_tracked();
        delivered
    }

    /// Publish a reset without changing anything.
    ///
    /// Inside a suppression scope nothing is published here. The reset is
    /// deferred to the enclosing scope, which publishes exactly one when
    /// its outermost release runs.
    pub fn reset(&self) -> Result<(), ListError> {
        if self.inner.suppression.is_suppressed() {
            return Ok(());
        }
        self.inner.publish_reset()
    }

    /// Sort in place with `compare`, then publish a reset (deferred to the
    /// enclosing scope while suppressed, as with [`reset`](Self::reset)).
    pub fn sort_by(&self, compare: impl FnMut(&T, &T) -> Ordering) -> Result<(), ListError> {
        self.inner.items.borrow_mut().sort_by(compare);
        self.reset()
    }

    /// Sort in place by a key, then publish a reset (deferred while suppressed).
    pub fn sort_by_key<K: Ord>(&self, key: impl FnMut(&T) -> K) -> Result<(), ListError> {
        self.inner.items.borrow_mut().sort_by_key(key);
        self.reset()
    }

    /// Sort in place, then publish a reset (deferred while suppressed).
    pub fn sort(&self) -> Result<(), ListError>
    where
        T: Ord,
    {
        self.sort_by(T::cmp)
    }

    // =========================================================================
    // CHANGE TRACKING (state)
    // =========================================================================

    pub fn change_tracking_enabled(&self) -> bool {
        self.inner.watcher.borrow().is_some()
    }

    /// Number of distinct item identities being tracked.
    pub fn tracked_item_count(&self) -> usize {
        self.inner
            .watcher
            .borrow()
            .as_ref()
            .map_or(0, |watcher| watcher.tracked_count())
    }

    /// How many times `item`'s identity is currently counted, if tracked.
    pub fn tracking_ref_count(&self, item: &T) -> Option<usize> {
        self.inner
            .watcher
            .borrow()
            .as_ref()
            .and_then(|watcher| watcher.ref_count(item))
    }

    /// Release all tracking resources. Items stay in place and the list
    /// keeps working; tracking can be enabled again later.
    pub fn dispose(&self) {
        self.inner.disable_tracking();
    }
}

impl<T: ObservableObject + Clone + PartialEq + 'static> ObservableList<T> {
    /// Turn per-item property tracking on or off.
    ///
    /// Turning it on registers every current item; turning it off releases
    /// every registration. Setting the current value does nothing.
    pub fn set_change_tracking_enabled(&self, enabled: bool) {
        if enabled == self.change_tracking_enabled() {
            return;
        }

        let inner = &self.inner;
        if !enabled {
            inner.disable_tracking();
            return;
        }

        let mut tracker = PropertyChangeTracker::new(
            inner.item_changing.clone(),
            inner.item_changed.clone(),
            Rc::clone(&inner.suppression),
        );
        for item in self.to_vec() {
            tracker.track(&item);
        }

        tracing::debug!(tracked = tracker.tracked_count(), "change tracking enabled");
        *inner.watcher.borrow_mut() = Some(Box::new(tracker));
    }
}

// =============================================================================
// TRAIT IMPLS
// =============================================================================

impl<T: Clone + PartialEq + 'static> Default for ObservableList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + PartialEq + 'static> From<Vec<T>> for ObservableList<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T: Clone + PartialEq + 'static> FromIterator<T> for ObservableList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = &self.inner;
        f.debug_struct("ObservableList")
            .field("items", &inner.items.borrow())
            .field("suppression_depth", &inner.suppression.depth())
            .field("change_tracking", &inner.watcher.borrow().is_some())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
