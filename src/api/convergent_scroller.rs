use crate::core::{
    ConvergenceConfig, ConvergenceStep, ItemId, converge_step, resolve_scroll_target,
};
use crate::interaction::CancellationProbe;
use crate::surface::ListSurface;

/// Result of one convergence frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollStep {
    /// Moved part of the way; keep stepping.
    Pending { scroll_top: f64 },
    /// Snapped onto the target. No further scroll calls follow.
    Arrived { scroll_top: f64, timed_out: bool },
    /// The item is no longer materialized; the viewport stays where it is.
    Lost,
    Cancelled,
}

/// Animates the viewport toward a live item with a damped step.
///
/// The target is re-read every frame, so an item still drifting because of
/// concurrent loads is followed without overshoot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergentScroller {
    started_at: f64,
    frames: u32,
}

impl ConvergentScroller {
    #[must_use]
    pub fn new(now_seconds: f64) -> Self {
        Self {
            started_at: now_seconds,
            frames: 0,
        }
    }

    #[must_use]
    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn step<S>(
        &mut self,
        id: &ItemId,
        surface: &mut S,
        config: ConvergenceConfig,
        now_seconds: f64,
        probe: &CancellationProbe,
    ) -> ScrollStep
    where
        S: ListSurface + ?Sized,
    {
        if probe.is_cancelled() {
            return ScrollStep::Cancelled;
        }
        let Some(rect) = surface.find(id) else {
            return ScrollStep::Lost;
        };

        self.frames = self.frames.saturating_add(1);
        let metrics = surface.metrics();
        let target = resolve_scroll_target(config, metrics, rect);
        let elapsed = now_seconds - self.started_at;

        match converge_step(config, metrics.scroll_top, target, elapsed) {
            ConvergenceStep::Snap { scroll_top } => {
                surface.scroll_to(scroll_top);
                ScrollStep::Arrived {
                    scroll_top,
                    timed_out: elapsed >= config.max_duration_seconds,
                }
            }
            ConvergenceStep::Continue { scroll_top } => {
                surface.scroll_to(scroll_top);
                ScrollStep::Pending { scroll_top }
            }
        }
    }
}
