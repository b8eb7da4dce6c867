use std::cell::RefCell;
use std::rc::Rc;

/// Shared cell holding a component's target element.
///
/// The element is typically filled in during render and read during mount,
/// so readers must resolve it at call time rather than capture it early.
#[derive(Debug)]
pub struct ElementRef<T> {
    slot: Rc<RefCell<Option<T>>>,
}

impl<T> Clone for ElementRef<T> {
    fn clone(&self) -> Self {
        Self { slot: Rc::clone(&self.slot) }
    }
}

impl<T> Default for ElementRef<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ElementRef<T> {
    pub fn new() -> Self {
        Self { slot: Rc::new(RefCell::new(None)) }
    }

    pub fn with_element(element: T) -> Self {
        Self { slot: Rc::new(RefCell::new(Some(element))) }
    }

    pub fn set(&self, element: T) {
        *self.slot.borrow_mut() = Some(element);
    }

    pub fn clear(&self) -> Option<T> {
        self.slot.borrow_mut().take()
    }
}

impl<T: Clone> ElementRef<T> {
    pub fn get(&self) -> Option<T> {
        self.slot.borrow().clone()
    }
}
