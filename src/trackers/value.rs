// ============================================================================
// snapdiff - ValueTracker
// A single logical slot paired with an owned change handler
// ============================================================================

use crate::core::error::ConfigError;
use crate::core::types::{ChangeHandler, EqualsFn, Transition};
use crate::trackers::state::SlotState;

// =============================================================================
// VALUE TRACKER
// =============================================================================

/// Tracks one logical slot and reports Add/Update/Remove transitions
/// against each new observed value.
///
/// `T` is the tracked value, `C` the context payload handed through to the
/// handler (defaults to `T`; a [`KeyedFieldReconciler`] sets it to the
/// whole record so callbacks can read sibling fields).
///
/// [`KeyedFieldReconciler`]: crate::trackers::fields::KeyedFieldReconciler
///
/// # Example
/// ```
/// use snapdiff::{Callbacks, ValueTracker};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let adds = Rc::new(Cell::new(0));
/// let adds_spy = adds.clone();
///
/// let callbacks = Callbacks::builder()
///     .on_add(move |_: &i32, _| adds_spy.set(adds_spy.get() + 1))
///     .on_remove(|_, _| {})
///     .build()?;
///
/// let mut tracker: ValueTracker<i32> = ValueTracker::new(callbacks);
/// tracker.update(Some(1), None); // fires on_add
/// tracker.update(Some(1), None); // equal value: fires nothing
/// assert_eq!(adds.get(), 1);
/// # Ok::<(), snapdiff::ConfigError>(())
/// ```
pub struct ValueTracker<T, C = T> {
    state: SlotState<T>,
    handler: Box<dyn ChangeHandler<T, C>>,
}

impl<T, C> ValueTracker<T, C> {
    /// Create a tracker with the default structural equality policy.
    pub fn new(handler: impl ChangeHandler<T, C> + 'static) -> Self
    where
        T: PartialEq,
    {
        Self {
            state: SlotState::new(),
            handler: Box::new(handler),
        }
    }

    /// Create a tracker with a custom equality policy.
    pub fn with_equals(handler: impl ChangeHandler<T, C> + 'static, equals: EqualsFn<T>) -> Self {
        Self {
            state: SlotState::with_equals(equals),
            handler: Box::new(handler),
        }
    }

    /// Feed the next observed value, invoking at most one handler method.
    ///
    /// `None` is the absent sentinel; an absent slot fed `None` stays
    /// silent, a present one fires `on_remove`. Returns which transition
    /// fired, if any.
    pub fn update(&mut self, value: Option<T>, context: Option<&C>) -> Option<Transition> {
        self.state.advance(value, context, &mut *self.handler)
    }

    /// The last value judged present, if any.
    pub fn current(&self) -> Option<&T> {
        self.state.current()
    }

    /// Whether the slot currently holds a value.
    pub fn is_present(&self) -> bool {
        self.state.is_present()
    }
}

// =============================================================================
// CLOSURE-BASED HANDLER
// =============================================================================

type ValueFn<T, C> = Box<dyn FnMut(&T, Option<&C>)>;
type RemoveFn<T, C> = Box<dyn FnMut(Option<&T>, Option<&C>)>;

/// A [`ChangeHandler`] assembled from closures at runtime.
///
/// Use [`Callbacks::builder`]; `build` fails with [`ConfigError`] when a
/// required callback (`on_add`, `on_remove`) was not supplied, and
/// `on_update` defaults to a no-op.
pub struct Callbacks<T, C = T> {
    on_add: ValueFn<T, C>,
    on_update: ValueFn<T, C>,
    on_remove: RemoveFn<T, C>,
}

impl<T, C> Callbacks<T, C> {
    /// Start assembling a callback set.
    pub fn builder() -> CallbacksBuilder<T, C> {
        CallbacksBuilder {
            on_add: None,
            on_update: None,
            on_remove: None,
        }
    }
}

impl<T, C> ChangeHandler<T, C> for Callbacks<T, C> {
    fn on_add(&mut self, value: &T, context: Option<&C>) {
        (self.on_add)(value, context);
    }

    fn on_update(&mut self, value: &T, context: Option<&C>) {
        (self.on_update)(value, context);
    }

    fn on_remove(&mut self, value: Option<&T>, context: Option<&C>) {
        (self.on_remove)(value, context);
    }
}

/// Builder for [`Callbacks`].
pub struct CallbacksBuilder<T, C = T> {
    on_add: Option<ValueFn<T, C>>,
    on_update: Option<ValueFn<T, C>>,
    on_remove: Option<RemoveFn<T, C>>,
}

impl<T, C> CallbacksBuilder<T, C> {
    /// Callback for absent-to-present transitions. Required.
    pub fn on_add(mut self, f: impl FnMut(&T, Option<&C>) + 'static) -> Self {
        self.on_add = Some(Box::new(f));
        self
    }

    /// Callback for present-value changes. Optional; defaults to a no-op.
    pub fn on_update(mut self, f: impl FnMut(&T, Option<&C>) + 'static) -> Self {
        self.on_update = Some(Box::new(f));
        self
    }

    /// Callback for present-to-absent transitions. Required. The first
    /// argument is the new (absent) value, so always `None`.
    pub fn on_remove(mut self, f: impl FnMut(Option<&T>, Option<&C>) + 'static) -> Self {
        self.on_remove = Some(Box::new(f));
        self
    }

    /// Finish the callback set.
    pub fn build(self) -> Result<Callbacks<T, C>, ConfigError> {
        let on_add = self.on_add.ok_or(ConfigError::MissingOnAdd)?;
        let on_remove = self.on_remove.ok_or(ConfigError::MissingOnRemove)?;
        let on_update = self.on_update.unwrap_or_else(|| Box::new(|_, _| {}));

        Ok(Callbacks {
            on_add,
            on_update,
            on_remove,
        })
    }
}

impl<T, C> Default for CallbacksBuilder<T, C> {
    fn default() -> Self {
        Callbacks::builder()
    }
}

// =============================================================================
// TESTS
// =============================================================================
