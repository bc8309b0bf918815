//! Provider/consumer plumbing around [`ToolStateStore`].
//!
//! The store is page-lifetime shared state, but it is never a global: the
//! top-level app object constructs one [`StateProvider`] and hands
//! [`StateAccess`] handles down the UI tree. A handle is a `Weak` reference,
//! so a consumer that somehow outlives the provider fails loudly at the call
//! site instead of silently reading defaults.
//!
//! All access is UI-thread-only; `Rc<RefCell<..>>` matches the
//! single-threaded contract and borrows never escape this module's API.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::{Rc, Weak};

use super::store::ToolStateStore;
use crate::tool::ToolId;

/// Owns the [`ToolStateStore`] for the lifetime of the UI tree.
pub struct StateProvider {
    store: Rc<RefCell<ToolStateStore>>,
}

impl Default for StateProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateProvider")
            .field("store", &self.store.borrow())
            .finish()
    }
}

impl StateProvider {
    pub fn new() -> Self {
        Self {
            store: Rc::new(RefCell::new(ToolStateStore::new())),
        }
    }

    /// A cheap clonable handle for consumers further down the UI tree.
    pub fn access(&self) -> StateAccess {
        StateAccess {
            store: Rc::downgrade(&self.store),
        }
    }

    /// Runs `f` with direct mutable access to the store. Used by the shell
    /// for wiring (subscribing observers) and by tests for inspection.
    pub fn with<R>(&self, f: impl FnOnce(&mut ToolStateStore) -> R) -> R {
        f(&mut self.store.borrow_mut())
    }
}

/// A consumer-side handle to the provider's store.
#[derive(Clone)]
pub struct StateAccess {
    store: Weak<RefCell<ToolStateStore>>,
}

impl StateAccess {
    /// The consumer combinator: idempotently adopts `T::default()` for `id`
    /// on first use, then returns the current value together with a setter
    /// bound to `id`.
    pub fn use_state<T>(&self, id: ToolId) -> (T, StateSetter<T>)
    where
        T: Clone + Default + 'static,
    {
        self.use_state_or(id, T::default)
    }

    /// Like [`use_state`](Self::use_state) with an explicit initial value,
    /// built only when the slot is vacant.
    pub fn use_state_or<T, F>(&self, id: ToolId, initial: F) -> (T, StateSetter<T>)
    where
        T: Clone + 'static,
        F: FnOnce() -> T,
    {
        let store = self.upgrade();
        let value = store.borrow_mut().adopt_with(id, initial);
        let setter = StateSetter {
            id,
            store: self.store.clone(),
            marker: PhantomData,
        };
        (value, setter)
    }

    /// Reads the current value for `id` without adopting anything.
    pub fn get_cloned<T: Clone + 'static>(&self, id: ToolId) -> Option<T> {
        let store = self.upgrade();
        let value = store.borrow().get::<T>(id).cloned();
        value
    }

    fn upgrade(&self) -> Rc<RefCell<ToolStateStore>> {
        self.store.upgrade().unwrap_or_else(|| {
            panic!("tool state accessed outside the lifetime of its StateProvider")
        })
    }
}

/// Writes values for one tool id back into the live store.
///
/// Each call goes through the store at call time, so a burst of sequential
/// `update`s composes: every closure sees the value produced by the previous
/// one, never a snapshot captured when the setter was created.
pub struct StateSetter<T> {
    id: ToolId,
    store: Weak<RefCell<ToolStateStore>>,
    marker: PhantomData<fn(T) -> T>,
}

impl<T> Clone for StateSetter<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            store: self.store.clone(),
            marker: PhantomData,
        }
    }
}

impl<T: 'static> StateSetter<T> {
    /// The tool id this setter is bound to.
    pub fn id(&self) -> ToolId {
        self.id
    }

    /// Replaces the stored value.
    pub fn set(&self, value: T) {
        let store = self.upgrade();
        store.borrow_mut().set(self.id, value);
    }

    fn upgrade(&self) -> Rc<RefCell<ToolStateStore>> {
        self.store.upgrade().unwrap_or_else(|| {
            panic!("tool state written outside the lifetime of its StateProvider")
        })
    }
}

impl<T: Default + 'static> StateSetter<T> {
    /// Applies `f` to the latest stored value (or `T::default()` if absent)
    /// and stores the result.
    pub fn update(&self, f: impl FnOnce(T) -> T) {
        let store = self.upgrade();
        store.borrow_mut().update(self.id, f);
    }
}
