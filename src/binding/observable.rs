//! Observable property: a piece of state plus the observers rendering it

use std::{
    cell::{Ref, RefCell},
    fmt,
    rc::Rc,
};
use tracing::debug;

/// Something that re-renders when the property it watches notifies
pub trait Observer {
    /// Pull the watched state into whatever this observer renders to
    fn update_as_observer(&self);
}

/// Wraps state of type `T` and broadcasts it to an ordered list of observers.
///
/// Attaching the same observer twice is allowed and makes it render twice
/// per [`notify`](Self::notify). Setting state never notifies on its own;
/// callers batch their edits and call `notify` when the views should catch up.
pub struct ObservableProperty<T> {
    state: RefCell<T>,
    observers: RefCell<Vec<Rc<dyn Observer>>>,
}

impl<T> ObservableProperty<T> {
    pub fn new(initial: T) -> Self {
        Self {
            state: RefCell::new(initial),
            observers: RefCell::new(Vec::new()),
        }
    }

    /// Append an observer; no uniqueness check
    pub fn attach(&self, observer: Rc<dyn Observer>) {
        let mut observers = self.observers.borrow_mut();
        observers.push(observer);
        debug!("Observer attached ({} total)", observers.len());
    }

    /// Remove the first occurrence of `observer`, compared by identity
    pub fn detach(&self, observer: &Rc<dyn Observer>) {
        let mut observers = self.observers.borrow_mut();
        if let Some(pos) = observers.iter().position(|o| same_observer(o, observer)) {
            observers.remove(pos);
            debug!("Observer detached ({} left)", observers.len());
        }
    }

    pub fn observer_count(&self) -> usize {
        self.observers.borrow().len()
    }

    /// Render every attached observer once, in attachment order.
    ///
    /// Iterates over the observer list as it was when the call started, so
    /// observers may attach or detach from inside a render.
    pub fn notify(&self) {
        let observers: Vec<Rc<dyn Observer>> = self.observers.borrow().clone();
        debug!("Notifying {} observers", observers.len());
        for observer in observers {
            observer.update_as_observer();
        }
    }

    /// Borrow the current state
    pub fn state(&self) -> Ref<'_, T> {
        self.state.borrow()
    }

    /// Run `f` against the current state
    pub fn with_state<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.state.borrow())
    }

    /// Read through a custom accessor
    pub fn get_state_with<R>(&self, getter: impl FnOnce(&Self) -> R) -> R {
        getter(self)
    }

    /// Replace the state outright
    pub fn set_state(&self, new_state: T) {
        *self.state.borrow_mut() = new_state;
    }

    /// Hand `input` to a custom mutator, which decides what (if anything)
    /// changes and whether to notify.
    pub fn set_state_with<I>(&self, input: I, setter: impl FnOnce(&Self, I)) {
        setter(self, input);
    }

    /// Mutate the state in place
    pub fn update_state<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.state.borrow_mut())
    }
}

impl<T: Clone> ObservableProperty<T> {
    pub fn get_state(&self) -> T {
        self.state.borrow().clone()
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableProperty")
            .field("state", &self.state.borrow())
            .field("observers", &self.observers.borrow().len())
            .finish()
    }
}

fn same_observer(a: &Rc<dyn Observer>, b: &Rc<dyn Observer>) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}
