// ============================================================================
// spark-list - Property-Change Tracking
// Forward per-item property changes to list-level channels
// ============================================================================
//
// Each distinct item identity in the list owns one LifecycleToken wrapping
// two forwarders: item.property_changing -> list.item_changing and
// item.property_changed -> list.item_changed. The token's count is the
// number of times that identity currently appears in the list.
//
// Forwarders are silent while the list is suppressed, so property churn
// during a bulk load does not leak past a pending reset.
// ============================================================================

use std::collections::HashMap;
use std::rc::Rc;

use super::suppression::SuppressionCounter;
use crate::core::types::{ItemPropertyChange, ObjectId};
use crate::primitives::channel::{Channel, Subscription};
use crate::primitives::lazy::LazyChannel;
use crate::primitives::notifier::ObservableObject;
use crate::primitives::token::LifecycleToken;

// =============================================================================
// ITEM WATCHER
// =============================================================================

/// Type-erased tracking table, so the list can keep tracking state without
/// requiring `T: ObservableObject` on every operation.
pub(crate) trait ItemWatcher<T> {
    /// Register one more occurrence of `item`.
    fn track(&mut self, item: &T);

    /// Forget one occurrence of `item`. Unknown items are ignored.
    fn untrack(&mut self, item: &T);

    /// Release every token, whatever its count.
    fn release_all(&mut self);

    /// Number of distinct identities tracked.
    fn tracked_count(&self) -> usize;

    /// Occurrences of `item`'s identity, if tracked.
    fn ref_count(&self, item: &T) -> Option<usize>;
}

// =============================================================================
// PROPERTY CHANGE TRACKER
// =============================================================================

/// Identity-keyed table of lifecycle tokens.
pub(crate) struct PropertyChangeTracker<T> {
    watchers: HashMap<ObjectId, LifecycleToken>,
    item_changing: LazyChannel<ItemPropertyChange<T>>,
    item_changed: LazyChannel<ItemPropertyChange<T>>,
    gate: Rc<SuppressionCounter>,
}

impl<T> PropertyChangeTracker<T>
where
    T: ObservableObject + Clone + 'static,
{
    pub(crate) fn new(
        item_changing: LazyChannel<ItemPropertyChange<T>>,
        item_changed: LazyChannel<ItemPropertyChange<T>>,
        gate: Rc<SuppressionCounter>,
    ) -> Self {
        Self {
            watchers: HashMap::new(),
            item_changing,
            item_changed,
            gate,
        }
    }

    fn forward(
        &self,
        item: &T,
        source: Channel<String>,
        target: &LazyChannel<ItemPropertyChange<T>>,
    ) -> Subscription {
        let item = item.clone();
        let target = target.clone();
        let gate = Rc::clone(&self.gate);

        source.try_subscribe(move |property| {
            if gate.is_suppressed() || !target.has_observers() {
                return Ok(());
            }
            target.publish(&ItemPropertyChange {
                item: item.clone(),
                property: property.clone(),
            })
        })
    }
}

impl<T> ItemWatcher<T> for PropertyChangeTracker<T>
where
    T: ObservableObject + Clone + 'static,
{
    fn track(&mut self, item: &T) {
        let id = item.object_id();

        if let Some(token) = self.watchers.get_mut(&id) {
            token.retain();
            return;
        }

        let changing = self.forward(item, item.property_changing(), &self.item_changing);
        let changed = self.forward(item, item.property_changed(), &self.item_changed);

        tracing::trace!(object = id.as_raw(), "watching item properties");
        self.watchers
            .insert(id, LifecycleToken::new(changing.merge(changed)));
    }

    fn untrack(&mut self, item: &T) {
        let id = item.object_id();

        let Some(token) = self.watchers.get_mut(&id) else {
            return;
        };

        if token.release() {
            self.watchers.remove(&id);
            tracing::trace!(object = id.as_raw(), "released item watcher");
        }
    }

    fn release_all(&mut self) {
        let released = self.watchers.len();
        for (_, mut token) in self.watchers.drain() {
            token.release_all();
        }
        if released > 0 {
            tracing::trace!(released, "released all item watchers");
        }
    }

    fn tracked_count(&self) -> usize {
        self.watchers.len()
    }

    fn ref_count(&self, item: &T) -> Option<usize> {
        self.watchers
            .get(&item.object_id())
            .map(LifecycleToken::ref_count)
    }
}

impl<T> Drop for PropertyChangeTracker<T> {
    fn drop(&mut self) {
        for (_, mut token) in self.watchers.drain() {
            token.release_all();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
