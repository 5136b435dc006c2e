// ============================================================================
// snapdiff - Core Module
// Fundamental types, equality policy, and configuration errors
// ============================================================================

pub mod error;
pub mod types;

// Re-export commonly used items
pub use error::ConfigError;
pub use types::{default_equals, ChangeHandler, EqualsFn, Transition};
