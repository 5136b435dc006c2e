// ============================================================================
// snapdiff - Type Definitions
// Equality policies and the change-handler capability interface
// ============================================================================

// =============================================================================
// EQUALITY POLICY
// =============================================================================

/// Equality function type for comparing slot values.
///
/// The policy, not reference identity, decides whether two present values
/// count as "the same": two distinct instances with equal contents must not
/// fire an update under the default.
pub type EqualsFn<T> = fn(&T, &T) -> bool;

/// Default structural equality using PartialEq.
///
/// Rust's `derive(PartialEq)` already compares contents recursively, so this
/// doubles as the deep-equality default.
pub fn default_equals<T: PartialEq>(a: &T, b: &T) -> bool {
    a == b
}

// =============================================================================
// TRANSITIONS
// =============================================================================

/// The transition a slot went through on one `update` call.
///
/// `advance`/`update` return `None` when the new value was judged equal to
/// the current one and nothing fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Slot went from absent to present
    Added,
    /// Slot stayed present but the value changed under the equality policy
    Updated,
    /// Slot went from present to absent
    Removed,
}

// =============================================================================
// CHANGE HANDLER
// =============================================================================

/// The three-method capability interface every tracker dispatches into.
///
/// `on_add` and `on_remove` are required; `on_update` defaults to a no-op.
/// Implement it directly for compile-time verification that the required
/// members exist, or build a [`Callbacks`](crate::trackers::value::Callbacks)
/// from closures when the handler set is assembled at runtime.
///
/// `context` is an optional caller-supplied payload riding alongside the
/// value: the containing item for array entries, the whole record for named
/// fields, `None` for bare slots.
///
/// `on_remove` receives the NEW value of the slot. A removal only ever
/// happens because the new value is absent, so the argument is always
/// `None`; the last known value, where the owner still has it, arrives as
/// the context instead. This mirrors the contract of the system this library
/// replaces and is pinned by tests.
///
/// Handlers run inline on the caller's stack. A panic inside one propagates
/// out of `update` immediately and aborts the remaining diff work for that
/// call; nothing is caught internally. Re-entering `update` on the same
/// tracker from inside a handler is unsupported.
pub trait ChangeHandler<T, C = T> {
    /// The slot went from absent to present.
    fn on_add(&mut self, value: &T, context: Option<&C>);

    /// The slot stayed present but its value changed.
    fn on_update(&mut self, _value: &T, _context: Option<&C>) {}

    /// The slot went from present to absent. `value` is the new (absent)
    /// value, so it is always `None`.
    fn on_remove(&mut self, value: Option<&T>, context: Option<&C>);
}

// =============================================================================
// TESTS
// =============================================================================
