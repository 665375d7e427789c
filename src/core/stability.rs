use serde::{Deserialize, Serialize};

use crate::core::ItemRect;

/// Tuning for the per-frame layout stability check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilityConfig {
    /// Max movement (top and height) between frames still counted as stable.
    pub pixel_threshold: f64,
    /// Consecutive stable frames required before the item counts as settled.
    pub required_stable_frames: u32,
    /// Wall-clock ceiling for the whole wait.
    pub max_wait_seconds: f64,
}

impl Default for StabilityConfig {
    fn default() -> Self {
        Self {
            pixel_threshold: 1.0,
            required_stable_frames: 8,
            max_wait_seconds: 2.0,
        }
    }
}

/// Tracks consecutive stable samples of one item's content-space rect.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StabilityTracker {
    last: Option<ItemRect>,
    stable_frames: u32,
}

impl StabilityTracker {
    #[must_use]
    pub fn stable_frames(self) -> u32 {
        self.stable_frames
    }

    /// Records one frame sample and returns the current stable streak.
    ///
    /// `None` means the item was not measurable this frame and breaks the streak.
    pub fn sample(&mut self, rect: Option<ItemRect>, pixel_threshold: f64) -> u32 {
        let Some(rect) = rect.filter(|rect| rect.is_finite()) else {
            self.last = None;
            self.stable_frames = 0;
            return 0;
        };

        match self.last {
            Some(previous)
                if (rect.top - previous.top).abs() < pixel_threshold
                    && (rect.height - previous.height).abs() < pixel_threshold =>
            {
                self.stable_frames = self.stable_frames.saturating_add(1);
            }
            _ => self.stable_frames = 0,
        }
        self.last = Some(rect);
        self.stable_frames
    }

    #[must_use]
    pub fn is_settled(self, config: StabilityConfig) -> bool {
        self.stable_frames >= config.required_stable_frames
    }
}

#[cfg(test)]
mod tests {
    use super::{StabilityConfig, StabilityTracker};
    use crate::core::ItemRect;

    #[test]
    fn first_sample_only_sets_baseline() {
        let mut tracker = StabilityTracker::default();
        assert_eq!(tracker.sample(Some(ItemRect::new(10.0, 50.0)), 1.0), 0);
        assert_eq!(tracker.sample(Some(ItemRect::new(10.2, 50.0)), 1.0), 1);
    }

    #[test]
    fn movement_resets_streak() {
        let mut tracker = StabilityTracker::default();
        for _ in 0..4 {
            tracker.sample(Some(ItemRect::new(10.0, 50.0)), 1.0);
        }
        assert_eq!(tracker.stable_frames(), 3);
        assert_eq!(tracker.sample(Some(ItemRect::new(30.0, 50.0)), 1.0), 0);
        assert_eq!(tracker.sample(Some(ItemRect::new(30.0, 80.0)), 1.0), 0);
    }

    #[test]
    fn missing_rect_breaks_streak() {
        let mut tracker = StabilityTracker::default();
        tracker.sample(Some(ItemRect::new(0.0, 50.0)), 1.0);
        tracker.sample(Some(ItemRect::new(0.0, 50.0)), 1.0);
        assert_eq!(tracker.sample(None, 1.0), 0);
        assert_eq!(tracker.sample(Some(ItemRect::new(0.0, 50.0)), 1.0), 0);
    }

    #[test]
    fn settles_after_required_frames() {
        let config = StabilityConfig {
            required_stable_frames: 3,
            ..StabilityConfig::default()
        };
        let mut tracker = StabilityTracker::default();
        for _ in 0..3 {
            tracker.sample(Some(ItemRect::new(5.0, 5.0)), config.pixel_threshold);
        }
        assert!(!tracker.is_settled(config));
        tracker.sample(Some(ItemRect::new(5.0, 5.0)), config.pixel_threshold);
        assert!(tracker.is_settled(config));
    }
}
