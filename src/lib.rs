// ============================================================================
// snapdiff - A Snapshot Change-Detection Library for Rust
// ============================================================================
//
// Turns "here is the whole current state" snapshots into incremental
// add/update/remove events, so consumers (renderers, sync layers) never
// diff state themselves.
//
// Three primitives built on one state-transition algorithm:
// - ValueTracker:         one logical slot, absent or holding a value
// - ArrayReconciler:      a collection of slots keyed by identity
// - KeyedFieldReconciler: a fixed set of named slots fed from a record
//
// Everything is synchronous and single-threaded: update() runs the diff
// and invokes handlers inline before returning. Do not re-enter update()
// on the same instance from inside a handler.
// ============================================================================

pub mod core;
pub mod equality;
pub mod trackers;

// Re-export core items at crate root for ergonomic access
pub use core::error::ConfigError;
pub use core::types::{default_equals, ChangeHandler, EqualsFn, Transition};

// Re-export the primitives at crate root
pub use trackers::array::ArrayReconciler;
pub use trackers::fields::{FieldSetBuilder, KeyedFieldReconciler};
pub use trackers::state::SlotState;
pub use trackers::value::{Callbacks, CallbacksBuilder, ValueTracker};

// =============================================================================
// TESTS
// =============================================================================
