use crate::core::{ItemId, ItemRect, StabilityConfig, StabilityTracker};
use crate::interaction::CancellationProbe;
use crate::surface::ListSurface;

/// Result of one stability-wait frame.
///
/// Every resolved variant carries the most recent live rect for the item,
/// which may differ from the one seen when waiting started.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettleStep {
    Pending,
    Settled {
        rect: Option<ItemRect>,
        timed_out: bool,
    },
    Cancelled {
        rect: Option<ItemRect>,
    },
}

/// Waits until a freshly materialized item stops moving.
///
/// Sibling content loading above the item keeps shifting it for a few frames.
/// The waiter samples the item's content-space rect every frame and resolves
/// after enough consecutive still frames or when the wall-clock ceiling hits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StabilityWaiter {
    tracker: StabilityTracker,
    started_at: f64,
}

impl StabilityWaiter {
    #[must_use]
    pub fn new(now_seconds: f64) -> Self {
        Self {
            tracker: StabilityTracker::default(),
            started_at: now_seconds,
        }
    }

    #[must_use]
    pub fn stable_frames(&self) -> u32 {
        self.tracker.stable_frames()
    }

    pub fn step<S>(
        &mut self,
        id: &ItemId,
        surface: &S,
        config: StabilityConfig,
        now_seconds: f64,
        probe: &CancellationProbe,
    ) -> SettleStep
    where
        S: ListSurface + ?Sized,
    {
        let rect = surface.find(id);
        if probe.is_cancelled() {
            return SettleStep::Cancelled { rect };
        }

        let scroll_top = surface.metrics().scroll_top;
        self.tracker.sample(
            rect.map(|rect| rect.to_content(scroll_top)),
            config.pixel_threshold,
        );
        if self.tracker.is_settled(config) {
            return SettleStep::Settled {
                rect,
                timed_out: false,
            };
        }
        if now_seconds - self.started_at >= config.max_wait_seconds {
            return SettleStep::Settled {
                rect,
                timed_out: true,
            };
        }
        SettleStep::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::{SettleStep, StabilityWaiter};
    use crate::core::{ItemId, StabilityConfig};
    use crate::interaction::TokenSequence;
    use crate::surface::{ListSurface, StackedSurface};

    const FRAME: f64 = 1.0 / 60.0;

    #[test]
    fn still_item_settles_after_required_frames() {
        let surface = StackedSurface::uniform(400.0, "row", 10, 40.0);
        let mut tokens = TokenSequence::default();
        let token = tokens.mint();
        let probe = tokens.probe(token);
        let config = StabilityConfig::default();
        let id = ItemId::new("row-4");

        let mut waiter = StabilityWaiter::new(0.0);
        let mut frames = 0u32;
        let step = loop {
            frames += 1;
            let step = waiter.step(&id, &surface, config, f64::from(frames) * FRAME, &probe);
            if step != SettleStep::Pending {
                break step;
            }
        };
        // one baseline sample plus the required streak
        assert_eq!(frames, config.required_stable_frames + 1);
        assert!(matches!(step, SettleStep::Settled { timed_out: false, .. }));
    }

    #[test]
    fn user_scroll_does_not_count_as_movement() {
        let mut surface = StackedSurface::uniform(400.0, "row", 50, 40.0);
        let mut tokens = TokenSequence::default();
        let token = tokens.mint();
        let probe = tokens.probe(token);
        let config = StabilityConfig {
            required_stable_frames: 2,
            ..StabilityConfig::default()
        };
        let id = ItemId::new("row-20");

        let mut waiter = StabilityWaiter::new(0.0);
        assert_eq!(waiter.step(&id, &surface, config, FRAME, &probe), SettleStep::Pending);
        surface.user_scroll_to(300.0);
        assert_eq!(waiter.step(&id, &surface, config, 2.0 * FRAME, &probe), SettleStep::Pending);
        let step = waiter.step(&id, &surface, config, 3.0 * FRAME, &probe);
        assert!(matches!(step, SettleStep::Settled { timed_out: false, .. }));
        assert_eq!(surface.find(&id).map(|rect| rect.top), Some(500.0));
    }

    #[test]
    fn drifting_item_resolves_on_timeout() {
        let surface = StackedSurface::uniform(400.0, "row", 10, 40.0);
        let mut tokens = TokenSequence::default();
        let token = tokens.mint();
        let probe = tokens.probe(token);
        let config = StabilityConfig::default();
        let id = ItemId::new("row-5");

        let mut waiter = StabilityWaiter::new(0.0);
        let mut now = 0.0;
        let mut height = 40.0;
        let step = loop {
            now += FRAME;
            height += 5.0;
            surface.items().set_height(&ItemId::new("row-0"), height);
            let step = waiter.step(&id, &surface, config, now, &probe);
            if step != SettleStep::Pending {
                break step;
            }
        };
        assert!(matches!(step, SettleStep::Settled { timed_out: true, .. }));
        assert!(now >= config.max_wait_seconds);
    }

    #[test]
    fn cancelled_wait_returns_current_rect() {
        let surface = StackedSurface::uniform(400.0, "row", 10, 40.0);
        let mut tokens = TokenSequence::default();
        let token = tokens.mint();
        let probe = tokens.probe(token);
        tokens.mint();

        let step = StabilityWaiter::new(0.0).step(
            &ItemId::new("row-1"),
            &surface,
            StabilityConfig::default(),
            FRAME,
            &probe,
        );
        assert!(matches!(step, SettleStep::Cancelled { rect: Some(_) }));
    }
}
