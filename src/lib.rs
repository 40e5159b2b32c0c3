// ============================================================================
// spark-list - Observable Lists for Rust
// ============================================================================
//
// An ordered collection that tells observers exactly what changed: items
// added, removed, replaced or moved, with before/after notifications, plus
// coarse "reset" notifications for changes too large to describe item by item.
//
// Layout:
//   core/         event payloads, errors, configuration, constants
//   primitives/   channels, subscriptions, lifecycle tokens, notifiers
//   reactivity/   suppression scopes and per-item property tracking
//   collections/  ObservableList
// ============================================================================

#[macro_use]
mod macros;

pub mod collections;
pub mod core;
pub mod primitives;
pub mod reactivity;

// Re-export core items at crate root
pub use crate::core::constants;
pub use crate::core::{
    ItemPropertyChange, ListChange, ListConfig, ListError, MoveChange, ObjectId, ObserverError,
};

// Re-export primitives
pub use primitives::{
    Channel, LazyChannel, LifecycleToken, ObservableObject, ObserverFn, PropertyNotifier,
    Subscription,
};

// Re-export reactivity
pub use reactivity::SuppressionScope;

// Re-export collections
pub use collections::{ObservableList, WeakObservableList};

// =============================================================================
// TESTS
// =============================================================================
