// ============================================================================
// snapdiff - Slot State
//
// The one state-transition algorithm shared by all three trackers.
// A SlotState is pure bookkeeping: current value + equality policy. It does
// not own a handler, so a reconciler can share one handler across many
// slots; ValueTracker pairs a SlotState with an owned handler for the
// standalone case.
// ============================================================================

use crate::core::types::{default_equals, ChangeHandler, EqualsFn, Transition};

/// The leaf state machine behind one logical slot.
///
/// `current` is either absent (`None`) or the last value an `advance` call
/// judged present. The absent sentinel is distinct from every real value:
/// `Some(0)`, `Some(false)` and `Some("")` are present.
pub struct SlotState<T> {
    /// Last observed value, or absent
    current: Option<T>,

    /// Equality policy for comparing two present values
    equals: EqualsFn<T>,
}

impl<T> SlotState<T> {
    /// Create an absent slot with the default structural equality policy.
    pub fn new() -> Self
    where
        T: PartialEq,
    {
        Self::with_equals(default_equals)
    }

    /// Create an absent slot with a custom equality policy.
    pub fn with_equals(equals: EqualsFn<T>) -> Self {
        Self {
            current: None,
            equals,
        }
    }

    /// The last value judged present, if any.
    pub fn current(&self) -> Option<&T> {
        self.current.as_ref()
    }

    /// Whether the slot currently holds a value.
    pub fn is_present(&self) -> bool {
        self.current.is_some()
    }

    /// Feed the next observed value through the transition algorithm.
    ///
    /// Exactly one of the handler's methods fires per detected transition;
    /// an unchanged value fires nothing and leaves the slot untouched
    /// (idempotence). The slot commits to `next` only after dispatch, so a
    /// panicking handler leaves the previous value in place.
    ///
    /// Transition table, with `equals` deciding "same" for two present
    /// values:
    ///
    /// | current | next      | fires       |
    /// |---------|-----------|-------------|
    /// | absent  | absent    | nothing     |
    /// | absent  | present   | `on_add`    |
    /// | present | same      | nothing     |
    /// | present | different | `on_update` |
    /// | present | absent    | `on_remove` |
    pub fn advance<C>(
        &mut self,
        next: Option<T>,
        context: Option<&C>,
        handler: &mut dyn ChangeHandler<T, C>,
    ) -> Option<Transition> {
        let fired = match (self.current.as_ref(), next.as_ref()) {
            (None, None) => None,
            (Some(current), Some(new)) if (self.equals)(new, current) => None,
            (None, Some(new)) => {
                handler.on_add(new, context);
                Some(Transition::Added)
            }
            (Some(_), Some(new)) => {
                handler.on_update(new, context);
                Some(Transition::Updated)
            }
            (Some(_), None) => {
                // The removal callback receives the NEW (absent) value.
                handler.on_remove(None, context);
                Some(Transition::Removed)
            }
        };

        if fired.is_some() {
            self.current = next;
        }
        fired
    }
}

impl<T: PartialEq> Default for SlotState<T> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Counting handler for transition assertions
    struct Counter {
        adds: usize,
        updates: usize,
        removes: usize,
        last_seen: Option<i32>,
    }

    impl Counter {
        fn new() -> Self {
            Self {
                adds: 0,
                updates: 0,
                removes: 0,
                last_seen: None,
            }
        }
    }

    impl ChangeHandler<i32> for Counter {
        fn on_add(&mut self, value: &i32, _context: Option<&i32>) {
            self.adds += 1;
            self.last_seen = Some(*value);
        }

        fn on_update(&mut self, value: &i32, _context: Option<&i32>) {
            self.updates += 1;
            self.last_seen = Some(*value);
        }

        fn on_remove(&mut self, value: Option<&i32>, _context: Option<&i32>) {
            self.removes += 1;
            self.last_seen = value.copied();
        }
    }

    #[test]
    fn test_absent_to_present_fires_add() {
        let mut slot = SlotState::new();
        let mut handler = Counter::new();

        let fired = slot.advance(Some(1), None, &mut handler);
        assert_eq!(fired, Some(Transition::Added));
        assert_eq!(handler.adds, 1);
        assert_eq!(slot.current(), Some(&1));
    }

    #[test]
    fn test_same_value_is_idempotent() {
        let mut slot = SlotState::new();
        let mut handler = Counter::new();

        slot.advance(Some(1), None, &mut handler);
        let fired = slot.advance(Some(1), None, &mut handler);

        assert_eq!(fired, None);
        assert_eq!(handler.adds, 1);
        assert_eq!(handler.updates, 0);
    }

    #[test]
    fn test_absent_stays_absent() {
        let mut slot: SlotState<i32> = SlotState::new();
        let mut handler = Counter::new();

        // Repeated absent values never fire
        for _ in 0..5 {
            assert_eq!(slot.advance(None, None, &mut handler), None);
        }
        assert_eq!(handler.adds, 0);
        assert_eq!(handler.removes, 0);
        assert!(!slot.is_present());
    }

    #[test]
    fn test_present_to_absent_fires_remove_with_new_value() {
        let mut slot = SlotState::new();
        let mut handler = Counter::new();

        slot.advance(Some(7), None, &mut handler);
        handler.last_seen = Some(99); // poison, to see what remove writes

        let fired = slot.advance(None, None, &mut handler);
        assert_eq!(fired, Some(Transition::Removed));
        assert_eq!(handler.removes, 1);
        // on_remove saw the new (absent) value, not the old 7
        assert_eq!(handler.last_seen, None);
        assert!(!slot.is_present());
    }

    #[test]
    fn test_changed_value_fires_update() {
        let mut slot = SlotState::new();
        let mut handler = Counter::new();

        slot.advance(Some(1), None, &mut handler);
        let fired = slot.advance(Some(2), None, &mut handler);

        assert_eq!(fired, Some(Transition::Updated));
        assert_eq!(handler.updates, 1);
        assert_eq!(handler.last_seen, Some(2));
        assert_eq!(slot.current(), Some(&2));
    }

    #[test]
    fn test_custom_policy_suppresses_update() {
        use crate::equality::always_equals;

        let mut slot = SlotState::with_equals(always_equals);
        let mut handler = Counter::new();

        slot.advance(Some(1), None, &mut handler);
        // Different value, but the policy says "same": nothing fires and
        // the slot keeps its first value
        assert_eq!(slot.advance(Some(2), None, &mut handler), None);
        assert_eq!(handler.updates, 0);
        assert_eq!(slot.current(), Some(&1));

        // The absent edge still fires regardless of policy
        assert_eq!(
            slot.advance(None, None, &mut handler),
            Some(Transition::Removed)
        );
    }
}
