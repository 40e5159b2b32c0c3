// ============================================================================
// spark-list - Reactivity Module
// Notification suppression and per-item property tracking
// ============================================================================

pub mod suppression;
pub(crate) mod tracking;

pub use suppression::SuppressionScope;
