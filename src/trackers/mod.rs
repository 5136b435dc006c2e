// ============================================================================
// snapdiff - Trackers Module
// The three reconciliation primitives: value, array, keyed fields
// ============================================================================

pub mod array;
pub mod fields;
pub mod state;
pub mod value;

// Re-export for convenience
pub use array::ArrayReconciler;
pub use fields::{FieldSetBuilder, KeyedFieldReconciler};
pub use state::SlotState;
pub use value::{Callbacks, CallbacksBuilder, ValueTracker};
