// ============================================================================
// spark-list - Errors
// Failures surfaced synchronously to the caller of a list operation
// ============================================================================

use thiserror::Error;

/// Error returned by a fallible observer.
///
/// Any `std::error::Error` converts into it, as do `&str` and `String`:
///
/// ```
/// use spark_list::ObserverError;
///
/// let err: ObserverError = "view detached".into();
/// assert_eq!(err.to_string(), "view detached");
/// ```
pub type ObserverError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Everything a list operation can fail with.
///
/// All failures are synchronous. Nothing is retried internally.
#[derive(Debug, Error)]
pub enum ListError {
    /// A required argument was unusable. Raised before any mutation.
    #[error("invalid argument `{argument}`: {reason}")]
    InvalidArgument {
        argument: &'static str,
        reason: String,
    },

    /// A single-index operation addressed a position outside `[0, len)`.
    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    /// An observer failed during synchronous delivery. Notification steps
    /// after the failing one were not delivered.
    #[error("observer on `{channel}` failed: {source}")]
    ObserverFailure {
        channel: &'static str,
        #[source]
        source: ObserverError,
    },
}

impl ListError {
    pub(crate) fn invalid_argument(argument: &'static str, reason: impl Into<String>) -> Self {
        ListError::InvalidArgument {
            argument,
            reason: reason.into(),
        }
    }

    pub(crate) fn observer(channel: &'static str, source: ObserverError) -> Self {
        ListError::ObserverFailure { channel, source }
    }

    /// Whether this error came from an observer rather than from the call itself.
    pub fn is_observer_failure(&self) -> bool {
        matches!(self, ListError::ObserverFailure { .. })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn index_out_of_range_message() {
        let err = ListError::IndexOutOfRange { index: 4, len: 2 };
        assert_eq!(err.to_string(), "index 4 is out of range for length 2");
        assert!(!err.is_observer_failure());
    }

    #[test]
    fn invalid_argument_message() {
        let err = ListError::invalid_argument("index", "5 is past the end (length 3)");
        assert_eq!(
            err.to_string(),
            "invalid argument `index`: 5 is past the end (length 3)"
        );
    }

    #[test]
    fn observer_failure_keeps_source() {
        let err = ListError::observer("items_added", "boom".into());
        assert!(err.is_observer_failure());
        assert_eq!(err.source().map(|s| s.to_string()), Some("boom".to_string()));
        assert!(err.to_string().contains("items_added"));
    }
}
