//! Presentation-thread state the screens bind to.
//!
//! Both containers are `Rc<RefCell<_>>` underneath and therefore `!Send`:
//! a worker future cannot capture them, so only completions running on the
//! presentation thread can change what the user sees.  Every write bumps a
//! revision counter the view layer (and tests) can watch.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// An ordered collection shown in a list view.
#[derive(Debug)]
pub struct ObservableList<T> {
    items: Rc<RefCell<Vec<T>>>,
    revision: Rc<Cell<u64>>,
}

impl<T> Clone for ObservableList<T> {
    fn clone(&self) -> Self {
        Self {
            items: Rc::clone(&self.items),
            revision: Rc::clone(&self.revision),
        }
    }
}

impl<T> Default for ObservableList<T> {
    fn default() -> Self {
        Self {
            items: Rc::new(RefCell::new(Vec::new())),
            revision: Rc::new(Cell::new(0)),
        }
    }
}

impl<T> ObservableList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole contents.
    pub fn set_all(&self, items: Vec<T>) {
        *self.items.borrow_mut() = items;
        self.revision.set(self.revision.get() + 1);
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.revision.get()
    }

    pub fn with<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.items.borrow())
    }
}

impl<T: Clone> ObservableList<T> {
    pub fn snapshot(&self) -> Vec<T> {
        self.items.borrow().clone()
    }

    pub fn find(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.items.borrow().iter().find(|item| predicate(item)).cloned()
    }
}

/// A single bound value such as a label or a form field.
#[derive(Debug)]
pub struct Observable<T> {
    value: Rc<RefCell<T>>,
    revision: Rc<Cell<u64>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
            revision: Rc::clone(&self.revision),
        }
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            revision: Rc::new(Cell::new(0)),
        }
    }

    pub fn set(&self, value: T) {
        *self.value.borrow_mut() = value;
        self.revision.set(self.revision.get() + 1);
    }

    pub fn revision(&self) -> u64 {
        self.revision.get()
    }
}

impl<T: Clone> Observable<T> {
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }
}
