use std::cell::RefCell;
use std::rc::Rc;

use crate::core::{ItemId, ItemRect, MaterializedItem, ScrollMetrics};

use super::ListSurface;

#[derive(Debug, Clone, PartialEq)]
pub struct StackedItem {
    pub id: ItemId,
    pub height: f64,
}

impl StackedItem {
    #[must_use]
    pub fn new(id: impl Into<ItemId>, height: f64) -> Self {
        Self {
            id: id.into(),
            height,
        }
    }
}

/// Item list shared between a [`StackedSurface`] and whatever feeds it.
///
/// Page sources append through this handle; the surface sees the change on its
/// next measurement, like a DOM updated by a data layer.
#[derive(Debug, Clone, Default)]
pub struct SharedItems {
    inner: Rc<RefCell<Vec<StackedItem>>>,
}

impl SharedItems {
    pub fn push(&self, item: StackedItem) {
        self.inner.borrow_mut().push(item);
    }

    pub fn extend<I>(&self, items: I)
    where
        I: IntoIterator<Item = StackedItem>,
    {
        self.inner.borrow_mut().extend(items);
    }

    /// Inserts `items` before position `index` (clamped to the list length).
    pub fn insert_at<I>(&self, index: usize, items: I)
    where
        I: IntoIterator<Item = StackedItem>,
    {
        let mut list = self.inner.borrow_mut();
        let index = index.min(list.len());
        let tail = list.split_off(index);
        list.extend(items);
        list.extend(tail);
    }

    /// Updates an item height. Returns `false` when the id is unknown.
    pub fn set_height(&self, id: &ItemId, height: f64) -> bool {
        let mut list = self.inner.borrow_mut();
        match list.iter_mut().find(|item| &item.id == id) {
            Some(item) => {
                item.height = height;
                true
            }
            None => false,
        }
    }

    pub fn remove(&self, id: &ItemId) -> bool {
        let mut list = self.inner.borrow_mut();
        let before = list.len();
        list.retain(|item| &item.id != id);
        list.len() != before
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.inner.borrow().iter().any(|item| &item.id == id)
    }

    fn with_items<T>(&self, f: impl FnOnce(&[StackedItem]) -> T) -> T {
        f(self.inner.borrow().as_slice())
    }
}

/// Headless surface laying items out in a single vertical stack.
///
/// Used by tests, benches and hosts without a real rendering layer. Every item
/// is materialized; heights are multiplied by the content scale. Scroll calls
/// are clamped and recorded so callers can assert on programmatic scrolling.
#[derive(Debug, Clone)]
pub struct StackedSurface {
    items: SharedItems,
    viewport_height: f64,
    scroll_top: f64,
    scale: f64,
    scroll_calls: Vec<f64>,
}

impl StackedSurface {
    #[must_use]
    pub fn new(viewport_height: f64) -> Self {
        Self::with_shared_items(viewport_height, SharedItems::default())
    }

    #[must_use]
    pub fn with_shared_items(viewport_height: f64, items: SharedItems) -> Self {
        Self {
            items,
            viewport_height: viewport_height.max(0.0),
            scroll_top: 0.0,
            scale: 1.0,
            scroll_calls: Vec::new(),
        }
    }

    /// Convenience constructor for uniform rows named `{prefix}-{index}`.
    #[must_use]
    pub fn uniform(viewport_height: f64, prefix: &str, count: usize, height: f64) -> Self {
        let surface = Self::new(viewport_height);
        surface.items.extend(
            (0..count).map(|index| StackedItem::new(format!("{prefix}-{index}"), height)),
        );
        surface
    }

    #[must_use]
    pub fn items(&self) -> &SharedItems {
        &self.items
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    /// Every value passed to [`ListSurface::scroll_to`], after clamping.
    #[must_use]
    pub fn scroll_calls(&self) -> &[f64] {
        &self.scroll_calls
    }

    pub fn clear_scroll_calls(&mut self) {
        self.scroll_calls.clear();
    }

    /// Simulates a user scroll: moves without being recorded as programmatic.
    pub fn user_scroll_to(&mut self, scroll_top: f64) {
        self.scroll_top = self.metrics().clamp_scroll_top(scroll_top);
    }

    pub fn set_viewport_height(&mut self, viewport_height: f64) {
        self.viewport_height = viewport_height.max(0.0);
        self.scroll_top = self.metrics().clamp_scroll_top(self.scroll_top);
    }

    fn content_height(&self) -> f64 {
        self.items
            .with_items(|items| items.iter().map(|item| item.height.max(0.0)).sum::<f64>())
            * self.scale
    }
}

impl ListSurface for StackedSurface {
    fn metrics(&self) -> ScrollMetrics {
        ScrollMetrics::new(self.scroll_top, self.viewport_height, self.content_height())
    }

    fn find(&self, id: &ItemId) -> Option<ItemRect> {
        self.items.with_items(|items| {
            let mut offset = 0.0;
            for item in items {
                let height = item.height.max(0.0) * self.scale;
                if &item.id == id {
                    return Some(ItemRect::new(offset - self.scroll_top, height));
                }
                offset += height;
            }
            None
        })
    }

    fn materialized(&self) -> Vec<MaterializedItem> {
        self.items.with_items(|items| {
            let mut offset = 0.0;
            items
                .iter()
                .map(|item| {
                    let height = item.height.max(0.0) * self.scale;
                    let rect = ItemRect::new(offset - self.scroll_top, height);
                    offset += height;
                    MaterializedItem::new(item.id.clone(), rect)
                })
                .collect()
        })
    }

    fn scroll_to(&mut self, scroll_top: f64) {
        let clamped = self.metrics().clamp_scroll_top(scroll_top);
        self.scroll_top = clamped;
        self.scroll_calls.push(clamped);
    }

    fn set_content_scale(&mut self, scale: f64) {
        if scale.is_finite() && scale > 0.0 {
            self.scale = scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StackedItem, StackedSurface};
    use crate::core::{ItemId, ItemRect};
    use crate::surface::ListSurface;

    #[test]
    fn rects_are_viewport_relative() {
        let mut surface = StackedSurface::uniform(300.0, "row", 10, 50.0);
        surface.scroll_to(120.0);

        let rect = surface.find(&ItemId::new("row-3")).expect("row-3");
        assert_eq!(rect, ItemRect::new(30.0, 50.0));
        assert_eq!(surface.metrics().content_height, 500.0);
    }

    #[test]
    fn scroll_is_clamped_and_recorded() {
        let mut surface = StackedSurface::uniform(300.0, "row", 10, 50.0);
        surface.scroll_to(10_000.0);
        surface.scroll_to(-5.0);
        assert_eq!(surface.scroll_calls(), &[200.0, 0.0]);

        surface.user_scroll_to(90.0);
        assert_eq!(surface.scroll_calls().len(), 2);
        assert_eq!(surface.scroll_top(), 90.0);
    }

    #[test]
    fn scale_multiplies_geometry() {
        let mut surface = StackedSurface::uniform(300.0, "row", 4, 50.0);
        surface.set_content_scale(2.0);
        assert_eq!(
            surface.find(&ItemId::new("row-2")),
            Some(ItemRect::new(200.0, 100.0))
        );
        surface.set_content_scale(f64::NAN);
        assert_eq!(surface.scale(), 2.0);
    }

    #[test]
    fn shared_items_insert_shifts_following_rows() {
        let surface = StackedSurface::uniform(300.0, "row", 3, 50.0);
        surface
            .items()
            .insert_at(0, [StackedItem::new("new-0", 70.0)]);

        assert_eq!(
            surface.find(&ItemId::new("row-0")),
            Some(ItemRect::new(70.0, 50.0))
        );
        assert_eq!(surface.materialized().len(), 4);
    }
}
