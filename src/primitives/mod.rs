// ============================================================================
// spark-list - Primitives Module
// Building blocks: channels, subscriptions, lifecycle tokens, notifiers
// ============================================================================

pub mod channel;
pub mod lazy;
pub mod notifier;
pub mod token;

// Re-export for convenience
pub use channel::{Channel, ObserverFn, Subscription};
pub use lazy::LazyChannel;
pub use notifier::{ObservableObject, PropertyNotifier};
pub use token::LifecycleToken;
