use crate::error::{NavigatorError, NavigatorResult};
use crate::extensions::{NavigatorContext, NavigatorEvent, NavigatorObserver};
use crate::source::PageSource;
use crate::surface::ListSurface;

use super::ListNavigator;

impl<S: ListSurface, P: PageSource> ListNavigator<S, P> {
    /// Registers an observer with unique identifier.
    pub fn register_observer(&mut self, observer: Box<dyn NavigatorObserver>) -> NavigatorResult<()> {
        let observer_id = observer.id().to_owned();
        if observer_id.is_empty() {
            return Err(NavigatorError::InvalidData(
                "observer id must not be empty".to_owned(),
            ));
        }
        if self.has_observer(&observer_id) {
            return Err(NavigatorError::InvalidData(format!(
                "observer with id `{observer_id}` is already registered"
            )));
        }
        self.observers.push(observer);
        Ok(())
    }

    /// Unregisters an observer by id. Returns `true` when removed.
    pub fn unregister_observer(&mut self, observer_id: &str) -> bool {
        if let Some(position) = self
            .observers
            .iter()
            .position(|entry| entry.id() == observer_id)
        {
            self.observers.remove(position);
            return true;
        }
        false
    }

    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    #[must_use]
    pub fn has_observer(&self, observer_id: &str) -> bool {
        self.observers
            .iter()
            .any(|observer| observer.id() == observer_id)
    }

    #[must_use]
    pub fn observer_context(&self) -> NavigatorContext {
        NavigatorContext {
            metrics: self.surface.metrics(),
            active_item: self.active_item.clone(),
            is_navigating: self.state.is_navigating(),
            auto_fetch_pause_count: self.pause.count(),
            zoom_scale: self.zoom_scale,
            frame: self.frame,
        }
    }

    pub(super) fn emit_event(&mut self, event: NavigatorEvent) {
        if self.observers.is_empty() {
            return;
        }
        let context = self.observer_context();
        for observer in &mut self.observers {
            observer.on_event(&event, &context);
        }
    }
}
