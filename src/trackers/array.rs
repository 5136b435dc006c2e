// ============================================================================
// snapdiff - ArrayReconciler
//
// Diffs successive ordered snapshots of a collection against each other,
// keyed by an identity function. One SlotState per identity, created
// lazily on first sight and discarded on removal; one handler shared by
// every slot.
// ============================================================================

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::core::types::{default_equals, ChangeHandler, EqualsFn};
use crate::trackers::state::SlotState;

type IdentityFn<T, K> = Box<dyn Fn(&T) -> K>;

/// Converts whole-collection snapshots into per-entry add/update/remove
/// events.
///
/// `K` is the identity key matching entries across snapshots, independent
/// of value equality. With no identity function the whole value is its own
/// key, which only behaves sensibly for primitive-like items; collections
/// of records want [`with_identity`](ArrayReconciler::with_identity).
///
/// Each item is passed to the handler as its own context. On removal the
/// handler sees the absent value (`None`) with the entry's last known value
/// as context.
///
/// # Example
/// ```
/// use snapdiff::{ArrayReconciler, Callbacks};
///
/// #[derive(Clone, PartialEq, Debug)]
/// struct Item { id: u32, label: &'static str }
///
/// let callbacks = Callbacks::builder()
///     .on_add(|item: &Item, _| println!("add {item:?}"))
///     .on_update(|item: &Item, _| println!("update {item:?}"))
///     .on_remove(|_, last: Option<&Item>| println!("remove {last:?}"))
///     .build()?;
///
/// let mut list = ArrayReconciler::with_identity(callbacks, |item: &Item| item.id);
///
/// list.update(&[Item { id: 1, label: "a" }]); // add
/// list.update(&[Item { id: 1, label: "b" }]); // update
/// list.update(&[]);                           // remove
/// # Ok::<(), snapdiff::ConfigError>(())
/// ```
pub struct ArrayReconciler<T, K = T> {
    identity: IdentityFn<T, K>,
    equals: EqualsFn<T>,
    trackers: HashMap<K, SlotState<T>>,
    handler: Box<dyn ChangeHandler<T, T>>,
}

impl<T> ArrayReconciler<T, T>
where
    T: Clone + Eq + Hash,
{
    /// Create a reconciler whose identity is the value itself.
    ///
    /// Two snapshots match an entry iff they contain an equal value, so an
    /// in-place edit of a record reads as remove+add. Prefer
    /// [`with_identity`](ArrayReconciler::with_identity) for anything with
    /// a stable key.
    pub fn new(handler: impl ChangeHandler<T, T> + 'static) -> Self {
        Self::with_identity(handler, |item: &T| item.clone())
    }
}

impl<T, K> ArrayReconciler<T, K>
where
    T: Clone + PartialEq,
    K: Eq + Hash + Clone,
{
    /// Create a reconciler with an identity function and the default
    /// structural equality policy.
    pub fn with_identity(
        handler: impl ChangeHandler<T, T> + 'static,
        identity: impl Fn(&T) -> K + 'static,
    ) -> Self {
        Self::with_identity_and_equals(handler, identity, default_equals)
    }
}

impl<T, K> ArrayReconciler<T, K>
where
    T: Clone,
    K: Eq + Hash + Clone,
{
    /// Create a reconciler with an identity function and a custom equality
    /// policy for deciding whether a matched entry changed.
    pub fn with_identity_and_equals(
        handler: impl ChangeHandler<T, T> + 'static,
        identity: impl Fn(&T) -> K + 'static,
        equals: EqualsFn<T>,
    ) -> Self {
        Self {
            identity: Box::new(identity),
            equals,
            trackers: HashMap::new(),
            handler: Box::new(handler),
        }
    }

    /// Diff a new snapshot against the previous one.
    ///
    /// Adds and updates fire in input order, each item as its own context.
    /// Keys absent from `items` fire `on_remove` afterwards and their
    /// slots are discarded; order among removals is unspecified.
    ///
    /// An empty snapshot removes every tracked entry. When two items share
    /// an identity key within one snapshot each occurrence runs through the
    /// same slot in order, so the last occurrence wins for the stored
    /// value (and a changed duplicate fires an update in the same cycle).
    pub fn update(&mut self, items: &[T]) {
        let equals = self.equals;
        let mut seen: HashSet<K> = HashSet::with_capacity(items.len());

        for item in items {
            let key = (self.identity)(item);
            seen.insert(key.clone());

            let slot = self
                .trackers
                .entry(key)
                .or_insert_with(|| SlotState::with_equals(equals));
            slot.advance(Some(item.clone()), Some(item), &mut *self.handler);
        }

        let vanished: Vec<K> = self
            .trackers
            .keys()
            .filter(|key| !seen.contains(*key))
            .cloned()
            .collect();

        for key in vanished {
            if let Some(mut slot) = self.trackers.remove(&key) {
                let last = slot.current().cloned();
                slot.advance(None, last.as_ref(), &mut *self.handler);
            }
        }
    }

    /// Number of entries currently tracked.
    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    /// Whether no entries are currently tracked.
    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }
}

// =============================================================================
// TESTS
// =============================================================================
