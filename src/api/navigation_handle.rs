use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use tracing::warn;

use crate::interaction::NavigationTarget;
use crate::source::PageSource;
use crate::surface::ListSurface;

use super::ListNavigator;

/// Cloneable entry point letting other UI components trigger navigation.
///
/// A sidebar or table of contents keeps a handle and calls
/// [`NavigationHandle::navigate_to`]; requests run as `select` calls at the
/// start of the navigator's next frame, in request order.
#[derive(Debug, Clone, Default)]
pub struct NavigationHandle {
    queue: Rc<RefCell<VecDeque<NavigationTarget>>>,
}

impl NavigationHandle {
    pub fn request(&self, target: NavigationTarget) {
        self.queue.borrow_mut().push_back(target);
    }

    pub fn navigate_to(&self, id: &str, title: impl Into<String>) {
        self.request(NavigationTarget::new(id, title));
    }

    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    fn drain(&self) -> Vec<NavigationTarget> {
        self.queue.borrow_mut().drain(..).collect()
    }
}

impl<S: ListSurface, P: PageSource> ListNavigator<S, P> {
    /// Returns a handle that queues `select` requests for this navigator.
    #[must_use]
    pub fn register_navigation_handler(&self) -> NavigationHandle {
        self.requests.clone()
    }

    /// Runs queued handle requests now instead of waiting for the next frame.
    ///
    /// Returns how many requests started a navigation.
    pub fn process_navigation_requests(&mut self) -> usize {
        let mut started = 0;
        for target in self.requests.drain() {
            match self.select(target) {
                Ok(_) => started += 1,
                Err(err) => warn!(error = %err, "dropping invalid navigation request"),
            }
        }
        started
    }
}
