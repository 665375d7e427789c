use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{ItemId, ItemRect, MaterializedItem, ScrollMetrics};

/// Ratio used when an item has no measurable height.
const DEGENERATE_RATIO: f64 = 0.5;

/// Reflow-independent description of what the viewport center is looking at.
///
/// Anchors are point-in-time snapshots: capture one right before a layout
/// mutation (zoom, prepended page) and restore it once the layout committed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViewportAnchor {
    /// Viewport center sits at `ratio` through item `id`.
    Item { id: ItemId, ratio: f64 },
    /// No item available: `ratio` through the whole list container.
    Container { ratio: f64 },
}

impl ViewportAnchor {
    #[must_use]
    pub fn ratio(&self) -> f64 {
        match self {
            Self::Item { ratio, .. } | Self::Container { ratio } => *ratio,
        }
    }

    #[must_use]
    pub fn item_id(&self) -> Option<&ItemId> {
        match self {
            Self::Item { id, .. } => Some(id),
            Self::Container { .. } => None,
        }
    }
}

/// Computes the anchor for the current viewport.
///
/// `items` carry viewport-relative rects. The item containing the viewport
/// center wins; otherwise the item whose center is nearest. With no usable
/// item the anchor falls back to the container position.
#[must_use]
pub fn calculate_anchor(metrics: ScrollMetrics, items: &[MaterializedItem]) -> ViewportAnchor {
    let center = metrics.viewport_center();

    let candidates = items
        .iter()
        .filter(|item| item.rect.is_finite())
        .map(|item| (item, item.rect.to_content(metrics.scroll_top)));

    let containing = candidates
        .clone()
        .find(|(_, rect)| rect.height > 0.0 && rect.contains(center));

    let chosen = containing.or_else(|| {
        candidates.min_by_key(|(_, rect)| OrderedFloat((rect.center() - center).abs()))
    });

    match chosen {
        Some((item, rect)) => ViewportAnchor::Item {
            id: item.id.clone(),
            ratio: ratio_within(rect, center),
        },
        None => ViewportAnchor::Container {
            ratio: container_ratio(metrics),
        },
    }
}

/// Resolves the scroll offset that puts the anchored point back under the
/// viewport center.
///
/// `find` looks up the live viewport-relative rect of an item; missing items
/// fall back to the container formula with the anchor ratio. The result is
/// clamped to `[0, max_scroll_top]`.
#[must_use]
pub fn resolve_restore_target<F>(anchor: &ViewportAnchor, metrics: ScrollMetrics, find: F) -> f64
where
    F: Fn(&ItemId) -> Option<ItemRect>,
{
    let half_viewport = metrics.viewport_height * 0.5;
    let raw = match anchor {
        ViewportAnchor::Item { id, ratio } => match find(id).filter(|rect| rect.is_finite()) {
            Some(rect) => {
                let rect = rect.to_content(metrics.scroll_top);
                rect.top + rect.height.max(0.0) * ratio.clamp(0.0, 1.0) - half_viewport
            }
            None => container_target(*ratio, metrics),
        },
        ViewportAnchor::Container { ratio } => container_target(*ratio, metrics),
    };
    metrics.clamp_scroll_top(raw)
}

fn ratio_within(rect: ItemRect, y: f64) -> f64 {
    if rect.height <= 0.0 {
        return DEGENERATE_RATIO;
    }
    ((y - rect.top) / rect.height).clamp(0.0, 1.0)
}

fn container_ratio(metrics: ScrollMetrics) -> f64 {
    if metrics.content_height <= 0.0 {
        return DEGENERATE_RATIO;
    }
    (metrics.viewport_center() / metrics.content_height).clamp(0.0, 1.0)
}

fn container_target(ratio: f64, metrics: ScrollMetrics) -> f64 {
    ratio.clamp(0.0, 1.0) * metrics.content_height - metrics.viewport_height * 0.5
}
