use std::{
    cell::{Ref, RefCell},
    rc::Rc,
};

use crate::selector::Selector;

/// The selector list of a style rule, shared between the CSS tree and the
/// [`super::ExtensionStore`].
///
/// Extending a rule appends to this list in place, so the serializer sees
/// every alias without the rule's declarations ever being copied.
#[derive(Debug, Clone)]
pub(crate) struct ExtendedSelector(Rc<RefCell<Vec<Selector>>>);

impl ExtendedSelector {
    pub fn new(selectors: Vec<Selector>) -> Self {
        Self(Rc::new(RefCell::new(selectors)))
    }

    /// Whether every selector contains a placeholder
    pub fn is_invisible(&self) -> bool {
        self.0.borrow().iter().all(Selector::is_invisible)
    }

    pub fn selectors(&self) -> Ref<'_, [Selector]> {
        Ref::map(self.0.borrow(), Vec::as_slice)
    }

    pub fn get(&self, idx: usize) -> Option<Selector> {
        self.0.borrow().get(idx).cloned()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn contains(&self, selector: &Selector) -> bool {
        self.0.borrow().contains(selector)
    }

    /// Returns the index of the new selector
    pub fn push(&self, selector: Selector) -> usize {
        let mut selectors = self.0.borrow_mut();
        selectors.push(selector);
        selectors.len() - 1
    }

    pub fn replace(&self, idx: usize, selector: Selector) {
        self.0.borrow_mut()[idx] = selector;
    }
}
