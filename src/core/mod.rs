// ============================================================================
// spark-list - Core Module
// Event types, errors, configuration and constants
// ============================================================================

pub mod config;
pub mod constants;
pub mod error;
pub mod types;

// Re-export commonly used items
pub use config::ListConfig;
pub use error::{ListError, ObserverError};
pub use types::{ItemPropertyChange, ListChange, MoveChange, ObjectId};
