// ============================================================================
// spark-list - Constants
// Reset policy defaults and channel names
// ============================================================================

// =============================================================================
// RESET POLICY
// =============================================================================

/// Default ratio of affected items to current length above which a bulk
/// operation collapses into a single reset.
pub const DEFAULT_RESET_THRESHOLD: f64 = 0.3;

/// Default absolute floor: a bulk operation must affect more than this many
/// items before it can collapse into a reset.
pub const DEFAULT_RESET_MIN_COUNT: usize = 10;

// =============================================================================
// CHANNEL NAMES
// =============================================================================
// Used in diagnostics and in `ListError::ObserverFailure`.

pub const CHANGING: &str = "changing";
pub const CHANGED: &str = "changed";

pub const BEFORE_ITEMS_ADDED: &str = "before_items_added";
pub const ITEMS_ADDED: &str = "items_added";

pub const BEFORE_ITEMS_REMOVED: &str = "before_items_removed";
pub const ITEMS_REMOVED: &str = "items_removed";

pub const BEFORE_ITEM_REPLACED: &str = "before_item_replaced";
pub const ITEM_REPLACED: &str = "item_replaced";

pub const BEFORE_ITEMS_MOVED: &str = "before_items_moved";
pub const ITEMS_MOVED: &str = "items_moved";

pub const ITEM_CHANGING: &str = "item_changing";
pub const ITEM_CHANGED: &str = "item_changed";

pub const PROPERTY_CHANGING: &str = "property_changing";
pub const PROPERTY_CHANGED: &str = "property_changed";

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_threshold_is_a_ratio() {
        assert!(DEFAULT_RESET_THRESHOLD > 0.0 && DEFAULT_RESET_THRESHOLD < 1.0);
        assert_eq!(DEFAULT_RESET_MIN_COUNT, 10);
    }

    #[test]
    fn structural_channel_names_are_distinct() {
        let names = [
            CHANGING,
            CHANGED,
            BEFORE_ITEMS_ADDED,
            ITEMS_ADDED,
            BEFORE_ITEMS_REMOVED,
            ITEMS_REMOVED,
            BEFORE_ITEM_REPLACED,
            ITEM_REPLACED,
            BEFORE_ITEMS_MOVED,
            ITEMS_MOVED,
            ITEM_CHANGING,
            ITEM_CHANGED,
        ];

        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
