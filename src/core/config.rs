// ============================================================================
// spark-list - Configuration
// Per-list reset policy and diagnostics switches
// ============================================================================

use super::constants::{DEFAULT_RESET_MIN_COUNT, DEFAULT_RESET_THRESHOLD};
use super::error::ListError;

// =============================================================================
// LIST CONFIG
// =============================================================================

/// Options for a new [`ObservableList`](crate::ObservableList).
///
/// # Example
///
/// ```
/// use spark_list::ListConfig;
///
/// let config = ListConfig::default()
///     .with_reset_threshold(0.5)
///     .with_warn_on_unobserved_suppression(false);
///
/// assert!(config.validate().is_ok());
/// assert_eq!(config.reset_min_count, 10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ListConfig {
    /// Ratio in (0, 1). A bulk operation touching `k` of `n` items is "large"
    /// when `k / n` exceeds it.
    pub reset_threshold: f64,

    /// A bulk operation must also touch more than this many items to be "large".
    pub reset_min_count: usize,

    /// Emit the one-time advisory when notifications are suppressed while
    /// nobody listens for resets. Tests usually turn this off.
    pub warn_on_unobserved_suppression: bool,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            reset_threshold: DEFAULT_RESET_THRESHOLD,
            reset_min_count: DEFAULT_RESET_MIN_COUNT,
            warn_on_unobserved_suppression: true,
        }
    }
}

impl ListConfig {
    pub fn with_reset_threshold(mut self, ratio: f64) -> Self {
        self.reset_threshold = ratio;
        self
    }

    pub fn with_reset_min_count(mut self, count: usize) -> Self {
        self.reset_min_count = count;
        self
    }

    pub fn with_warn_on_unobserved_suppression(mut self, warn: bool) -> Self {
        self.warn_on_unobserved_suppression = warn;
        self
    }

    /// Check that the threshold is a finite ratio strictly between 0 and 1.
    pub fn validate(&self) -> Result<(), ListError> {
        let r = self.reset_threshold;
        if !r.is_finite() || r <= 0.0 || r >= 1.0 {
            return Err(ListError::invalid_argument(
                "reset_threshold",
                format!("{r} is not a ratio in (0, 1)"),
            ));
        }
        Ok(())
    }

    /// Whether touching `affected` items of a list currently `len` long
    /// should collapse into a single reset.
    pub fn is_above_reset_threshold(&self, affected: usize, len: usize) -> bool {
        // len == 0 gives +inf, which is above any ratio.
        let ratio = affected as f64 / len as f64;
        ratio > self.reset_threshold && affected > self.reset_min_count
    }
}

// =============================================================================
// TESTS
// =============================================================================
