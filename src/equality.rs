// ============================================================================
// snapdiff - Equality Functions
// Injectable policies deciding whether a new snapshot value "changed"
// ============================================================================

use crate::core::types::EqualsFn;

// =============================================================================
// STRUCTURAL EQUALITY (Default)
// =============================================================================

/// Structural equality using PartialEq. This is the default policy for
/// every tracker.
///
/// # Example
/// ```
/// use snapdiff::equality::equals;
///
/// assert!(equals(&42, &42));
/// assert!(!equals(&42, &43));
/// assert!(equals(&vec![1, 2], &vec![1, 2]));
/// ```
pub fn equals<T: PartialEq>(a: &T, b: &T) -> bool {
    a == b
}

// =============================================================================
// FORCING / SUPPRESSING POLICIES
// =============================================================================

/// Never equal - every snapshot fires an update for a present slot, even
/// when the value is unchanged.
///
/// # Example
/// ```
/// use snapdiff::equality::never_equals;
///
/// assert!(!never_equals(&42, &42));
/// ```
pub fn never_equals<T>(_a: &T, _b: &T) -> bool {
    false
}

/// Always equal - a present slot never fires an update; only the
/// absent/present edges (add, remove) are reported.
///
/// # Example
/// ```
/// use snapdiff::equality::always_equals;
///
/// assert!(always_equals(&42, &43));
/// ```
pub fn always_equals<T>(_a: &T, _b: &T) -> bool {
    true
}

// =============================================================================
// FLOAT EQUALITY (Handles NaN)
// =============================================================================

/// Equality for f64 treating NaN as equal to NaN.
///
/// A snapshot field stuck at NaN would otherwise compare unequal to itself
/// and fire `on_update` on every cycle.
///
/// # Example
/// ```
/// use snapdiff::equality::safe_equals_f64;
///
/// assert!(safe_equals_f64(&1.0, &1.0));
/// assert!(safe_equals_f64(&f64::NAN, &f64::NAN));
/// assert!(!safe_equals_f64(&f64::NAN, &1.0));
/// ```
pub fn safe_equals_f64(a: &f64, b: &f64) -> bool {
    if a.is_nan() {
        return b.is_nan();
    }
    a == b
}

/// Equality for f32 treating NaN as equal to NaN.
pub fn safe_equals_f32(a: &f32, b: &f32) -> bool {
    if a.is_nan() {
        return b.is_nan();
    }
    a == b
}

// =============================================================================
// LIFTED EQUALITY
// =============================================================================

/// Lift a policy over the absent sentinel: absent equals absent, absent
/// never equals present, two present values defer to the policy.
///
/// This is the comparison every tracker applies on `update`.
///
/// # Example
/// ```
/// use snapdiff::equality::{equals, equals_option};
///
/// assert!(equals_option(equals, &None::<i32>, &None));
/// assert!(!equals_option(equals, &Some(0), &None));
/// assert!(equals_option(equals, &Some(7), &Some(7)));
/// ```
pub fn equals_option<T>(eq: EqualsFn<T>, a: &Option<T>, b: &Option<T>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => eq(a, b),
        _ => false,
    }
}

// =============================================================================
// PROJECTED EQUALITY
// =============================================================================

/// Compare values through a projection, e.g. "same entry iff same revision".
///
/// Returns a closure, not an [`EqualsFn`] fn pointer, so it documents the
/// pattern rather than plugging into `with_equals` directly; for injectable
/// policies write a named fn over your concrete type.
///
/// # Example
/// ```
/// use snapdiff::equality::by_key;
///
/// struct Row { id: u32, rev: u64 }
///
/// let same_rev = by_key(|r: &Row| r.rev);
/// assert!(same_rev(&Row { id: 1, rev: 3 }, &Row { id: 2, rev: 3 }));
/// assert!(!same_rev(&Row { id: 1, rev: 3 }, &Row { id: 1, rev: 4 }));
/// ```
pub fn by_key<T, F, K>(key_fn: F) -> impl Fn(&T, &T) -> bool
where
    F: Fn(&T) -> K,
    K: PartialEq,
{
    move |a, b| key_fn(a) == key_fn(b)
}

// =============================================================================
// TESTS
// =============================================================================
