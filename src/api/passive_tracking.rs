use tracing::trace;

use crate::core::{ItemId, ViewportAnchor};
use crate::extensions::NavigatorEvent;
use crate::source::PageSource;
use crate::surface::ListSurface;

use super::ListNavigator;

impl<S: ListSurface, P: PageSource> ListNavigator<S, P> {
    /// Scroll listener entry point.
    ///
    /// Evaluation is throttled: any number of calls between two frames results
    /// in one active-item evaluation on the next frame. A user scroll also
    /// re-arms background pagination after a failed page request; scroll
    /// events caused by the navigator itself do not.
    pub fn on_scroll(&mut self) {
        self.passive_pending = true;
        if !self.suppression.is_programmatic(self.frame) {
            self.auto_fetch_blocked = false;
        }
    }

    pub(super) fn evaluate_passive_tracking(&mut self) {
        if !std::mem::take(&mut self.passive_pending) {
            return;
        }
        if self.suppression.is_programmatic(self.frame) {
            trace!(frame = self.frame, "passive tracking skipped during programmatic scroll");
            return;
        }

        if let ViewportAnchor::Item { id, .. } = self.capture_anchor() {
            self.set_active_item(Some(id));
        }
    }

    /// Updates the tracked item. Returns `true` when it changed.
    pub(super) fn set_active_item(&mut self, id: Option<ItemId>) -> bool {
        if self.active_item == id {
            return false;
        }
        self.active_item = id.clone();
        self.emit_event(NavigatorEvent::ActiveItemChanged { id });
        true
    }
}
