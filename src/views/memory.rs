//! In-process view handle

use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet},
    fmt,
    rc::Rc,
};

use crate::binding::{ChangeCallback, ViewHandle};

#[derive(Default)]
struct Inner {
    text: RefCell<String>,
    callbacks: RefCell<Vec<ChangeCallback>>,
    styles: RefCell<BTreeMap<String, String>>,
    classes: RefCell<BTreeSet<String>>,
}

/// A text cell with styles and classes, shared by cheap clones.
///
/// Stands in for an input element: [`input`](Self::input) plays the part of a
/// user finishing an edit, [`write`](ViewHandle::write) the part of a render.
#[derive(Clone, Default)]
pub struct MemoryView {
    inner: Rc<Inner>,
}

impl MemoryView {
    pub fn new(text: &str) -> Self {
        let view = Self::default();
        *view.inner.text.borrow_mut() = text.to_string();
        view
    }

    /// Simulate a user edit: replace the text, then fire change callbacks
    pub fn input(&self, text: &str) {
        *self.inner.text.borrow_mut() = text.to_string();
        let callbacks: Vec<ChangeCallback> = self.inner.callbacks.borrow().clone();
        for callback in callbacks {
            callback();
        }
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.inner.styles.borrow().get(property).cloned()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.inner.classes.borrow().contains(class)
    }
}

impl ViewHandle for MemoryView {
    fn read(&self) -> String {
        self.inner.text.borrow().clone()
    }

    fn write(&self, text: &str) {
        *self.inner.text.borrow_mut() = text.to_string();
    }

    fn on_change(&self, callback: ChangeCallback) {
        self.inner.callbacks.borrow_mut().push(callback);
    }

    fn set_style(&self, property: &str, value: &str) {
        self.inner
            .styles
            .borrow_mut()
            .insert(property.to_string(), value.to_string());
    }

    fn set_class(&self, class: &str, enabled: bool) {
        let mut classes = self.inner.classes.borrow_mut();
        if enabled {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }
}

impl fmt::Debug for MemoryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryView")
            .field("text", &self.inner.text.borrow())
            .field("classes", &self.inner.classes.borrow())
            .finish()
    }
}
