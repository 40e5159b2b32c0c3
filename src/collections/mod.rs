// ============================================================================
// spark-list - Observable Collections
// Ordered lists that report their structural changes
// ============================================================================
//
// An ObservableList publishes three layers of notification:
//
// 1. Item-level: before/after add, remove, replace and move events
// 2. Change-level: changing/changed, with `true` marking a reset
// 3. Derived: count, emptiness and reset streams built on the second layer
// ============================================================================

mod list;

pub use list::{ObservableList, WeakObservableList};
