mod stacked_surface;

pub use stacked_surface::{SharedItems, StackedItem, StackedSurface};

use crate::core::{ItemId, ItemRect, MaterializedItem, ScrollMetrics};

/// Contract implemented by the rendering layer hosting the list.
///
/// The navigator only measures and scrolls: it never creates, destroys or
/// styles items. Rects are viewport-relative at the time of the call.
pub trait ListSurface {
    fn metrics(&self) -> ScrollMetrics;

    /// Looks up the live rect of a materialized item by its identity marker.
    fn find(&self, id: &ItemId) -> Option<ItemRect>;

    fn materialized(&self) -> Vec<MaterializedItem>;

    /// Imperative, instant scroll primitive. Implementations clamp as needed.
    fn scroll_to(&mut self, scroll_top: f64);

    /// Applies a content zoom factor. Layout may commit later.
    fn set_content_scale(&mut self, scale: f64);
}
