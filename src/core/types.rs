use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable opaque identity of a list item.
///
/// The navigator never inspects item content; this marker is the only link
/// between a navigation request and the rendered node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Vertical geometry of one rendered item, relative to the viewport top.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ItemRect {
    pub top: f64,
    pub height: f64,
}

impl ItemRect {
    #[must_use]
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn center(self) -> f64 {
        self.top + self.height * 0.5
    }

    #[must_use]
    pub fn contains(self, y: f64) -> bool {
        y >= self.top && y <= self.bottom()
    }

    /// Converts a viewport-relative rect into content coordinates.
    #[must_use]
    pub fn to_content(self, scroll_top: f64) -> Self {
        Self {
            top: self.top + scroll_top,
            height: self.height,
        }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.top.is_finite() && self.height.is_finite()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterializedItem {
    pub id: ItemId,
    pub rect: ItemRect,
}

impl MaterializedItem {
    #[must_use]
    pub fn new(id: impl Into<ItemId>, rect: ItemRect) -> Self {
        Self {
            id: id.into(),
            rect,
        }
    }
}

/// Scroll container state at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub viewport_height: f64,
    pub content_height: f64,
}

impl ScrollMetrics {
    #[must_use]
    pub fn new(scroll_top: f64, viewport_height: f64, content_height: f64) -> Self {
        Self {
            scroll_top,
            viewport_height,
            content_height,
        }
    }

    #[must_use]
    pub fn max_scroll_top(self) -> f64 {
        (self.content_height - self.viewport_height).max(0.0)
    }

    /// Viewport center expressed in content coordinates.
    #[must_use]
    pub fn viewport_center(self) -> f64 {
        self.scroll_top + self.viewport_height * 0.5
    }

    #[must_use]
    pub fn clamp_scroll_top(self, scroll_top: f64) -> f64 {
        if !scroll_top.is_finite() {
            return self.scroll_top.clamp(0.0, self.max_scroll_top());
        }
        scroll_top.clamp(0.0, self.max_scroll_top())
    }

    /// Remaining scrollable distance below the current viewport.
    #[must_use]
    pub fn distance_to_end(self) -> f64 {
        (self.max_scroll_top() - self.scroll_top).max(0.0)
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.scroll_top.is_finite()
            && self.viewport_height.is_finite()
            && self.content_height.is_finite()
            && self.viewport_height >= 0.0
            && self.content_height >= 0.0
    }
}
