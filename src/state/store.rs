//! The keyed per-tool state container.
//!
//! Every tool widget owns a private slice of mutable state, addressed by its
//! [`ToolId`]. The store keeps those slices alive for the whole application
//! session, so switching tools and switching back never loses an edit. The
//! store itself knows nothing about the shape of a slice: each value is
//! type-erased behind `Box<dyn Any>` and the schema is owned entirely by the
//! consuming tool, which supplies the concrete type at every call site.
//!
//! # Lifecycle
//!
//! A slot is created the first time a tool adopts an initial value for its
//! id. From then on it is only ever replaced or updated; there is no remove
//! operation on purpose. `absent -> present` is the whole state machine and
//! `present` is terminal until the process (or browser tab) goes away.
//!
//! # Notification
//!
//! Writes bump a revision counter and fan out a [`StateEvent`] to every
//! subscribed [`StateObserver`]. Observers are deliberately coarse: they hear
//! about every key, and the shell answers with a single repaint request.

use std::any::Any;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::tool::ToolId;

/// Emitted on every write to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateEvent {
    /// A slot was created by adopting an initial value.
    Adopted { id: ToolId },
    /// An existing slot was replaced or updated in place.
    Changed { id: ToolId },
}

impl StateEvent {
    /// The tool whose slot was written.
    pub fn id(&self) -> ToolId {
        match self {
            StateEvent::Adopted { id } | StateEvent::Changed { id } => *id,
        }
    }
}

/// Receives [`StateEvent`]s for every write to any slot.
pub trait StateObserver {
    fn state_changed(&mut self, event: &StateEvent);
}

/// Maps each [`ToolId`] to one opaque state value for the session's lifetime.
pub struct ToolStateStore {
    slots: HashMap<ToolId, Box<dyn Any>>,
    observers: Vec<Box<dyn StateObserver>>,
    revision: u64,
}

impl Default for ToolStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ToolStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolStateStore")
            .field("slots", &self.slots.len())
            .field("observers", &format!("<{} observers>", self.observers.len()))
            .field("revision", &self.revision)
            .finish()
    }
}

impl ToolStateStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            observers: Vec::new(),
            revision: 0,
        }
    }

    /// Registers `initial` under `id` only if no value is present yet.
    ///
    /// Idempotent: calling this on every mount of every consumer is safe and
    /// never clobbers prior edits, regardless of the type a present slot
    /// holds.
    pub fn initialize<T: 'static>(&mut self, id: ToolId, initial: T) {
        self.initialize_with(id, || initial);
    }

    /// Like [`initialize`](Self::initialize), but builds the initial value
    /// only when the slot is actually vacant.
    pub fn initialize_with<T: 'static>(&mut self, id: ToolId, initial: impl FnOnce() -> T) {
        if let Entry::Vacant(slot) = self.slots.entry(id) {
            slot.insert(Box::new(initial()));
            self.touch(StateEvent::Adopted { id });
        }
    }

    /// Returns the current value for `id`.
    ///
    /// `None` is the explicit absent signal: it means the slot was never
    /// initialized (or holds a different type than `T`), and is always
    /// distinguishable from a legitimately stored `0`, `false` or `""`.
    pub fn get<T: 'static>(&self, id: ToolId) -> Option<&T> {
        self.slots.get(&id).and_then(|slot| slot.downcast_ref::<T>())
    }

    /// Replaces the value for `id` unconditionally, inserting if absent.
    pub fn set<T: 'static>(&mut self, id: ToolId, value: T) {
        let replaced = self.slots.insert(id, Box::new(value)).is_some();
        if replaced {
            self.touch(StateEvent::Changed { id });
        } else {
            self.touch(StateEvent::Adopted { id });
        }
    }

    /// Applies `f` to the current value for `id` and stores the result.
    ///
    /// The previous value is read at call time, so rapid sequential updates
    /// each observe the result of the one before, never a stale snapshot.
    /// An absent slot feeds `T::default()` into `f`; a slot holding a
    /// different type is treated the same way, with a warning.
    pub fn update<T: Default + 'static>(&mut self, id: ToolId, f: impl FnOnce(T) -> T) {
        let prev = match self.slots.remove(&id) {
            Some(slot) => match slot.downcast::<T>() {
                Ok(prev) => *prev,
                Err(_) => {
                    log::warn!("state for {id:?} held a different type; updating from the default");
                    T::default()
                }
            },
            None => T::default(),
        };
        self.slots.insert(id, Box::new(f(prev)));
        self.touch(StateEvent::Changed { id });
    }

    /// Idempotently adopts `initial` for `id`, then returns a clone of the
    /// current value. This is the mount-time read behind the consumer
    /// combinator.
    pub fn adopt_with<T: Clone + 'static>(&mut self, id: ToolId, initial: impl FnOnce() -> T) -> T {
        if !self.slots.contains_key(&id) {
            let value = initial();
            self.slots.insert(id, Box::new(value.clone()));
            self.touch(StateEvent::Adopted { id });
            return value;
        }
        if let Some(value) = self.get::<T>(id) {
            return value.clone();
        }
        // The slot holds a different type than the consumer asked for. That
        // is a wiring bug (two tools sharing an id, or a changed schema), so
        // surface it in the log and re-adopt the caller's schema.
        log::warn!("state for {id:?} held a different type; re-adopting");
        let value = initial();
        self.slots.insert(id, Box::new(value.clone()));
        self.touch(StateEvent::Changed { id });
        value
    }

    /// True if a value has ever been adopted or set for `id`.
    pub fn contains(&self, id: ToolId) -> bool {
        self.slots.contains_key(&id)
    }

    /// Number of tracked slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Monotonically increasing write counter. Bumped by every adopt, set
    /// and update; unchanged by reads.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Subscribe an observer to all future writes.
    pub fn subscribe(&mut self, observer: Box<dyn StateObserver>) {
        self.observers.push(observer);
    }

    fn touch(&mut self, event: StateEvent) {
        self.revision += 1;
        for observer in &mut self.observers {
            observer.state_changed(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn initialize_is_idempotent() {
        let mut store = ToolStateStore::new();
        store.initialize(ToolId::Base64Text, String::from("first"));
        store.initialize(ToolId::Base64Text, String::from("second"));
        assert_eq!(
            store.get::<String>(ToolId::Base64Text).map(String::as_str),
            Some("first")
        );
    }

    #[test]
    fn initialize_never_clobbers_across_types() {
        let mut store = ToolStateStore::new();
        store.initialize(ToolId::Base64Text, 7_u32);
        store.initialize(ToolId::Base64Text, String::from("other schema"));
        assert_eq!(store.get::<u32>(ToolId::Base64Text), Some(&7));
        assert_eq!(store.get::<String>(ToolId::Base64Text), None);
    }

    #[test]
    fn absent_is_distinct_from_falsy_values() {
        let mut store = ToolStateStore::new();
        assert_eq!(store.get::<u32>(ToolId::JsonFormatter), None);
        store.set(ToolId::JsonFormatter, 0_u32);
        assert_eq!(store.get::<u32>(ToolId::JsonFormatter), Some(&0));

        assert_eq!(store.get::<bool>(ToolId::RegexTester), None);
        store.set(ToolId::RegexTester, false);
        assert_eq!(store.get::<bool>(ToolId::RegexTester), Some(&false));
    }

    #[test]
    fn keys_are_isolated() {
        let mut store = ToolStateStore::new();
        store.set(ToolId::HashDigest, String::from("left"));
        store.set(ToolId::Timestamp, String::from("right"));
        store.set(ToolId::HashDigest, String::from("changed"));
        assert_eq!(
            store.get::<String>(ToolId::Timestamp).map(String::as_str),
            Some("right")
        );
    }

    #[test]
    fn update_reads_the_latest_value() {
        let mut store = ToolStateStore::new();
        store.initialize(ToolId::UuidGenerator, 0_i32);
        for _ in 0..3 {
            store.update(ToolId::UuidGenerator, |n: i32| n + 1);
        }
        assert_eq!(store.get::<i32>(ToolId::UuidGenerator), Some(&3));
    }

    #[test]
    fn update_on_absent_slot_starts_from_default() {
        let mut store = ToolStateStore::new();
        store.update(ToolId::LoremIpsum, |n: i32| n + 5);
        assert_eq!(store.get::<i32>(ToolId::LoremIpsum), Some(&5));
    }

    #[test]
    fn adopt_with_self_heals_a_mismatched_slot() {
        let mut store = ToolStateStore::new();
        store.set(ToolId::ColorConverter, 3_u8);
        let adopted = store.adopt_with(ToolId::ColorConverter, || String::from("fresh"));
        assert_eq!(adopted, "fresh");
        assert_eq!(
            store.get::<String>(ToolId::ColorConverter).map(String::as_str),
            Some("fresh")
        );
    }

    #[test]
    fn revision_counts_writes_but_not_reads() {
        let mut store = ToolStateStore::new();
        assert_eq!(store.revision(), 0);
        store.initialize(ToolId::CaseConverter, 1_u8);
        store.initialize(ToolId::CaseConverter, 2_u8); // no-op, no bump
        let _ = store.get::<u8>(ToolId::CaseConverter);
        assert_eq!(store.revision(), 1);
        store.set(ToolId::CaseConverter, 3_u8);
        assert_eq!(store.revision(), 2);
    }

    #[derive(Default)]
    struct Recorder(Rc<RefCell<Vec<StateEvent>>>);

    impl StateObserver for Recorder {
        fn state_changed(&mut self, event: &StateEvent) {
            self.0.borrow_mut().push(*event);
        }
    }

    #[test]
    fn observers_hear_about_every_key() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut store = ToolStateStore::new();
        store.subscribe(Box::new(Recorder(Rc::clone(&events))));

        store.initialize(ToolId::NumberBase, 1_u8);
        store.set(ToolId::HtmlEntities, 2_u8);
        store.update(ToolId::NumberBase, |n: u8| n + 1);

        let seen = events.borrow();
        assert_eq!(
            *seen,
            vec![
                StateEvent::Adopted { id: ToolId::NumberBase },
                StateEvent::Adopted { id: ToolId::HtmlEntities },
                StateEvent::Changed { id: ToolId::NumberBase },
            ]
        );
    }
}
