// ============================================================================
// snapdiff - KeyedFieldReconciler
//
// A fixed, ordered set of named fields, each bound to a pre-constructed
// ValueTracker through a projection out of the record. The whole record is
// the callback context, so a field's handler can read its siblings.
// ============================================================================

use std::collections::HashSet;

use crate::core::error::ConfigError;
use crate::trackers::value::ValueTracker;

// =============================================================================
// FIELD BINDING (type-erased per-field slot)
// =============================================================================

/// One named field: how to pull its value out of a record, plus the
/// tracker fed with it. Boxed behind this trait so fields of different
/// value types live in one reconciler.
trait FieldSlot<R> {
    fn update(&mut self, record: Option<&R>);
}

struct FieldBinding<R, T> {
    project: Box<dyn Fn(&R) -> Option<T>>,
    tracker: ValueTracker<T, R>,
}

impl<R, T> FieldSlot<R> for FieldBinding<R, T> {
    fn update(&mut self, record: Option<&R>) {
        let value = record.and_then(|r| (self.project)(r));
        self.tracker.update(value, record);
    }
}

// =============================================================================
// KEYED FIELD RECONCILER
// =============================================================================

/// Feeds each declared field of an incoming record into that field's own
/// [`ValueTracker`].
///
/// The field set is fixed at construction and never grows or shrinks.
/// There is no add/remove notion at this level; each field's tracker
/// reports its own transitions, so a field going `Some -> None` fires that
/// field's `on_remove` while its siblings stay silent.
///
/// # Example
/// ```
/// use snapdiff::{Callbacks, KeyedFieldReconciler, ValueTracker};
///
/// #[derive(Clone)]
/// struct Badge { label: Option<String>, count: Option<u32> }
///
/// let label_callbacks = Callbacks::builder()
///     .on_add(|label: &String, _: Option<&Badge>| println!("label set to {label}"))
///     .on_update(|label: &String, _| println!("label now {label}"))
///     .on_remove(|_, _| println!("label cleared"))
///     .build()?;
///
/// let mut badge = KeyedFieldReconciler::builder()
///     .field("label", |b: &Badge| b.label.clone(), ValueTracker::new(label_callbacks))
///     .build()?;
///
/// badge.update(Some(&Badge { label: Some("new".into()), count: Some(1) }));
/// badge.update(None); // absent record: every field resolves to absent
/// # Ok::<(), snapdiff::ConfigError>(())
/// ```
pub struct KeyedFieldReconciler<R> {
    fields: Vec<(String, Box<dyn FieldSlot<R>>)>,
}

impl<R> KeyedFieldReconciler<R> {
    /// Start declaring the field set.
    pub fn builder() -> FieldSetBuilder<R> {
        FieldSetBuilder { fields: Vec::new() }
    }

    /// Feed a record through every field's tracker, in declared order.
    ///
    /// `None` stands for a missing record: every field resolves to absent,
    /// so present fields fire their `on_remove` (with no context to offer).
    pub fn update(&mut self, record: Option<&R>) {
        for (_, slot) in &mut self.fields {
            slot.update(record);
        }
    }

    /// Declared field names, in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Number of declared fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields were declared.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

// =============================================================================
// FIELD SET BUILDER
// =============================================================================

/// Builder for [`KeyedFieldReconciler`]. Declaring the same name twice is
/// a [`ConfigError`] at `build` time.
pub struct FieldSetBuilder<R> {
    fields: Vec<(String, Box<dyn FieldSlot<R>>)>,
}

impl<R: 'static> FieldSetBuilder<R> {
    /// Bind a field name to a projection and its pre-constructed tracker.
    ///
    /// The projection returns `None` when the field is absent on the
    /// record, which is distinct from any present value.
    pub fn field<T: 'static>(
        mut self,
        name: impl Into<String>,
        project: impl Fn(&R) -> Option<T> + 'static,
        tracker: ValueTracker<T, R>,
    ) -> Self {
        self.fields.push((
            name.into(),
            Box::new(FieldBinding {
                project: Box::new(project),
                tracker,
            }),
        ));
        self
    }

    /// Finish the field set, rejecting duplicate names.
    pub fn build(self) -> Result<KeyedFieldReconciler<R>, ConfigError> {
        let mut names: HashSet<&str> = HashSet::with_capacity(self.fields.len());
        for (name, _) in &self.fields {
            if !names.insert(name.as_str()) {
                return Err(ConfigError::DuplicateField(name.clone()));
            }
        }

        Ok(KeyedFieldReconciler {
            fields: self.fields,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trackers::value::Callbacks;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    struct Record {
        label: Option<String>,
        count: Option<u32>,
    }

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        Add(String, String),    // field, value
        Update(String, String), // field, value
        Remove(String),         // field
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    fn label_tracker(log: &Log) -> ValueTracker<String, Record> {
        let callbacks = Callbacks::builder()
            .on_add({
                let log = log.clone();
                move |v: &String, _: Option<&Record>| {
                    log.borrow_mut().push(Event::Add("label".into(), v.clone()))
                }
            })
            .on_update({
                let log = log.clone();
                move |v: &String, _: Option<&Record>| {
                    log.borrow_mut()
                        .push(Event::Update("label".into(), v.clone()))
                }
            })
            .on_remove({
                let log = log.clone();
                move |_, _: Option<&Record>| log.borrow_mut().push(Event::Remove("label".into()))
            })
            .build()
            .expect("required callbacks present");
        ValueTracker::new(callbacks)
    }

    fn count_tracker(log: &Log) -> ValueTracker<u32, Record> {
        let callbacks = Callbacks::builder()
            .on_add({
                let log = log.clone();
                move |v: &u32, _: Option<&Record>| {
                    log.borrow_mut()
                        .push(Event::Add("count".into(), v.to_string()))
                }
            })
            .on_update({
                let log = log.clone();
                move |v: &u32, _: Option<&Record>| {
                    log.borrow_mut()
                        .push(Event::Update("count".into(), v.to_string()))
                }
            })
            .on_remove({
                let log = log.clone();
                move |_, _: Option<&Record>| log.borrow_mut().push(Event::Remove("count".into()))
            })
            .build()
            .expect("required callbacks present");
        ValueTracker::new(callbacks)
    }

    fn recording_reconciler() -> (KeyedFieldReconciler<Record>, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let reconciler = KeyedFieldReconciler::builder()
            .field("label", |r: &Record| r.label.clone(), label_tracker(&log))
            .field("count", |r: &Record| r.count, count_tracker(&log))
            .build()
            .expect("unique field names");
        (reconciler, log)
    }

    #[test]
    fn test_duplicate_field_is_a_config_error() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let result = KeyedFieldReconciler::builder()
            .field("label", |r: &Record| r.label.clone(), label_tracker(&log))
            .field("label", |r: &Record| r.label.clone(), label_tracker(&log))
            .build();

        assert!(matches!(
            result.err(),
            Some(ConfigError::DuplicateField(name)) if name == "label"
        ));
    }

    #[test]
    fn test_fields_visited_in_declared_order() {
        let (mut reconciler, log) = recording_reconciler();
        assert_eq!(
            reconciler.field_names().collect::<Vec<_>>(),
            vec!["label", "count"]
        );

        reconciler.update(Some(&Record {
            label: Some("1".into()),
            count: Some(10),
        }));
        assert_eq!(
            *log.borrow(),
            vec![
                Event::Add("label".into(), "1".into()),
                Event::Add("count".into(), "10".into()),
            ]
        );
    }

    #[test]
    fn test_field_isolation() {
        let (mut reconciler, log) = recording_reconciler();

        reconciler.update(Some(&Record {
            label: Some("1".into()),
            count: Some(10),
        }));
        log.borrow_mut().clear();

        // Same record again: nothing fires anywhere
        reconciler.update(Some(&Record {
            label: Some("1".into()),
            count: Some(10),
        }));
        assert!(log.borrow().is_empty());

        // Only the label changes: one update, count untouched
        reconciler.update(Some(&Record {
            label: Some("2".into()),
            count: Some(10),
        }));
        assert_eq!(
            *log.borrow(),
            vec![Event::Update("label".into(), "2".into())]
        );

        log.borrow_mut().clear();
        // Label cleared: one remove on that field's tracker only
        reconciler.update(Some(&Record {
            label: None,
            count: Some(10),
        }));
        assert_eq!(*log.borrow(), vec![Event::Remove("label".into())]);
    }

    #[test]
    fn test_missing_record_resolves_all_fields_absent() {
        let (mut reconciler, log) = recording_reconciler();

        reconciler.update(Some(&Record {
            label: Some("1".into()),
            count: Some(10),
        }));
        log.borrow_mut().clear();

        reconciler.update(None);
        assert_eq!(
            *log.borrow(),
            vec![Event::Remove("label".into()), Event::Remove("count".into())]
        );

        // And an absent record on an already-empty state stays silent
        log.borrow_mut().clear();
        reconciler.update(None);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_whole_record_is_the_context() {
        let seen: Rc<RefCell<Vec<Option<u32>>>> = Rc::new(RefCell::new(Vec::new()));

        let callbacks = Callbacks::builder()
            .on_add({
                let seen = seen.clone();
                // The context is the whole record: sibling fields are visible
                move |_: &String, record: Option<&Record>| {
                    seen.borrow_mut().push(record.and_then(|r| r.count))
                }
            })
            .on_remove(|_, _: Option<&Record>| {})
            .build()
            .expect("required callbacks present");

        let mut reconciler = KeyedFieldReconciler::builder()
            .field(
                "label",
                |r: &Record| r.label.clone(),
                ValueTracker::new(callbacks),
            )
            .build()
            .expect("unique field names");

        reconciler.update(Some(&Record {
            label: Some("1".into()),
            count: Some(42),
        }));
        assert_eq!(*seen.borrow(), vec![Some(42)]);
    }
}
