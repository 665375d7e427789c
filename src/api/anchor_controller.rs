use tracing::debug;

use crate::core::{ViewportAnchor, calculate_anchor, resolve_restore_target};
use crate::error::NavigatorResult;
use crate::extensions::NavigatorEvent;
use crate::source::PageSource;
use crate::surface::ListSurface;

use super::ListNavigator;
use super::validation::validate_zoom_scale;

/// Scale differences below this are treated as no change.
const ZOOM_EPSILON: f64 = 1e-9;

impl<S: ListSurface, P: PageSource> ListNavigator<S, P> {
    /// Computes the anchor for the current viewport without side effects.
    #[must_use]
    pub fn capture_anchor(&self) -> ViewportAnchor {
        calculate_anchor(self.surface.metrics(), &self.surface.materialized())
    }

    /// Captures the anchor to restore after an imminent reflow.
    ///
    /// At most one anchor is pending: when one is already waiting for the
    /// next layout pass it describes the pre-reflow view and is kept.
    /// Returns `true` when a new anchor was captured.
    pub fn capture_reflow_anchor(&mut self) -> bool {
        if self.pending_anchor.is_some() {
            return false;
        }
        let anchor = self.capture_anchor();
        debug!(anchor = ?anchor, "captured reflow anchor");
        self.pending_anchor = Some(anchor);
        true
    }

    #[must_use]
    pub fn pending_anchor(&self) -> Option<&ViewportAnchor> {
        self.pending_anchor.as_ref()
    }

    /// Layout-commit hook: restores the pending anchor, if any.
    ///
    /// Hosts call this after layout committed and before the frame is
    /// painted. Returns the scroll offset applied.
    pub fn on_layout_committed(&mut self) -> Option<f64> {
        let anchor = self.pending_anchor.take()?;
        Some(self.restore_anchor(&anchor))
    }

    /// Instantly scrolls so that `anchor` is back under the viewport center.
    ///
    /// Passive tracking ignores the resulting scroll event.
    pub fn restore_anchor(&mut self, anchor: &ViewportAnchor) -> f64 {
        let metrics = self.surface.metrics();
        let surface = &self.surface;
        let target = resolve_restore_target(anchor, metrics, |id| surface.find(id));

        self.suppression.mark_instant_scroll(self.frame);
        self.surface.scroll_to(target);
        debug!(scroll_top = target, anchor = ?anchor, "anchor restored");
        self.emit_event(NavigatorEvent::AnchorRestored { scroll_top: target });
        target
    }

    #[must_use]
    pub fn zoom_scale(&self) -> f64 {
        self.zoom_scale
    }

    /// Zoom-change hook: captures the anchor, then applies the new scale.
    ///
    /// The scale is clamped to the configured bounds. Restoration happens on
    /// the next [`Self::on_layout_committed`]. Returns `false` when the
    /// clamped scale equals the current one.
    pub fn zoom_to(&mut self, scale: f64) -> NavigatorResult<bool> {
        validate_zoom_scale(scale)?;
        Ok(self.apply_zoom(self.config.zoom.clamp(scale)))
    }

    /// Steps the zoom up by the configured increment, clamped to the bounds.
    pub fn zoom_in(&mut self) -> NavigatorResult<bool> {
        Ok(self.zoom_by(self.config.zoom.step))
    }

    /// Steps the zoom down by the configured increment, clamped to the bounds.
    pub fn zoom_out(&mut self) -> NavigatorResult<bool> {
        Ok(self.zoom_by(-self.config.zoom.step))
    }

    pub fn reset_zoom(&mut self) -> NavigatorResult<bool> {
        self.zoom_to(1.0)
    }

    fn zoom_by(&mut self, delta: f64) -> bool {
        self.apply_zoom(self.config.zoom.clamp(self.zoom_scale + delta))
    }

    /// `next` must already be clamped to the zoom bounds.
    fn apply_zoom(&mut self, next: f64) -> bool {
        if (next - self.zoom_scale).abs() <= ZOOM_EPSILON {
            return false;
        }

        self.capture_reflow_anchor();
        self.surface.set_content_scale(next);
        debug!(from = self.zoom_scale, to = next, "content zoom changed");
        self.zoom_scale = next;
        self.emit_event(NavigatorEvent::ZoomChanged { scale: next });
        true
    }
}
