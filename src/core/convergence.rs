use serde::{Deserialize, Serialize};

use crate::core::{ItemRect, ScrollMetrics};

/// Tuning for damped scroll convergence toward a live target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvergenceConfig {
    /// Fraction of the remaining distance covered per frame.
    pub damping: f64,
    /// Distance under which the scroll snaps to the target and stops.
    pub settle_tolerance_px: f64,
    /// Wall-clock ceiling after which the scroll snaps regardless of distance.
    pub max_duration_seconds: f64,
    /// Distance kept between the target item and the viewport top, as a
    /// fraction of the viewport height.
    pub offset_viewport_fraction: f64,
    /// Lower bound for that distance.
    pub min_offset_px: f64,
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self {
            damping: 0.28,
            settle_tolerance_px: 1.5,
            max_duration_seconds: 1.6,
            offset_viewport_fraction: 0.15,
            min_offset_px: 120.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConvergenceStep {
    /// Move to `scroll_top` and keep iterating next frame.
    Continue { scroll_top: f64 },
    /// Jump exactly to `scroll_top`; convergence is over.
    Snap { scroll_top: f64 },
}

impl ConvergenceStep {
    #[must_use]
    pub fn scroll_top(self) -> f64 {
        match self {
            Self::Continue { scroll_top } | Self::Snap { scroll_top } => scroll_top,
        }
    }

    #[must_use]
    pub fn is_snap(self) -> bool {
        matches!(self, Self::Snap { .. })
    }
}

#[must_use]
pub fn resolve_scroll_offset(config: ConvergenceConfig, viewport_height: f64) -> f64 {
    (viewport_height * config.offset_viewport_fraction).max(config.min_offset_px)
}

/// Scroll offset that lands `rect` (viewport-relative) slightly below the top edge.
#[must_use]
pub fn resolve_scroll_target(
    config: ConvergenceConfig,
    metrics: ScrollMetrics,
    rect: ItemRect,
) -> f64 {
    let absolute_top = rect.to_content(metrics.scroll_top).top;
    let offset = resolve_scroll_offset(config, metrics.viewport_height);
    metrics.clamp_scroll_top(absolute_top - offset)
}

/// Computes one damped frame step from `current` toward `target`.
#[must_use]
pub fn converge_step(
    config: ConvergenceConfig,
    current: f64,
    target: f64,
    elapsed_seconds: f64,
) -> ConvergenceStep {
    let distance = target - current;
    if distance.abs() < config.settle_tolerance_px || elapsed_seconds >= config.max_duration_seconds
    {
        return ConvergenceStep::Snap { scroll_top: target };
    }
    ConvergenceStep::Continue {
        scroll_top: current + distance * config.damping,
    }
}
