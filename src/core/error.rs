// ============================================================================
// snapdiff - Configuration Errors
// Construction-time failures; update() defines no runtime error kind
// ============================================================================

use thiserror::Error;

/// Error returned when a tracker or reconciler is misconfigured.
///
/// All variants are construction-time failures: the builder returns `Err`
/// and no usable object exists. `update` itself has no error path under
/// normal operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A closure-built handler set was missing its `on_add` callback.
    #[error("on_add handler is required")]
    MissingOnAdd,

    /// A closure-built handler set was missing its `on_remove` callback.
    #[error("on_remove handler is required")]
    MissingOnRemove,

    /// A field set declared the same field name more than once.
    #[error("field `{0}` declared more than once")]
    DuplicateField(String),
}
