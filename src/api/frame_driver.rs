use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::trace;

use crate::core::ItemId;
use crate::error::NavigatorResult;
use crate::extensions::NavigationOutcome;
use crate::interaction::NavigationToken;
use crate::source::PageSource;
use crate::surface::ListSurface;

use super::ListNavigator;
use super::validation::validate_frame_delta;

/// Final record of one navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRecord {
    pub token: NavigationToken,
    pub id: ItemId,
    pub outcome: NavigationOutcome,
}

/// What happened during one [`ListNavigator::advance_frame`] call.
///
/// `navigations` also includes navigations that finished synchronously inside
/// `select` since the previous frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameReport {
    pub frame: u64,
    pub navigations: SmallVec<[NavigationRecord; 2]>,
    pub active_item_changed: bool,
    pub background_fetch_started: bool,
}

impl<S: ListSurface, P: PageSource> ListNavigator<S, P> {
    /// Runs one animation frame.
    ///
    /// Order within a frame: queued navigation requests, in-flight navigation
    /// steps (oldest token first), passive active-item tracking, background
    /// pagination.
    pub fn advance_frame(&mut self, delta_seconds: f64) -> NavigatorResult<FrameReport> {
        validate_frame_delta(delta_seconds)?;
        self.clock_seconds += delta_seconds;
        self.frame = self.frame.saturating_add(1);
        trace!(frame = self.frame, jobs = self.jobs.len(), "advance frame");

        let active_before = self.active_item.clone();
        self.process_navigation_requests();
        self.step_navigations();
        self.evaluate_passive_tracking();
        let background_fetch_started = self.step_auto_fetch();

        Ok(FrameReport {
            frame: self.frame,
            navigations: std::mem::take(&mut self.finished),
            active_item_changed: active_before != self.active_item,
            background_fetch_started,
        })
    }

    /// Drives frames until no navigation is in flight or `max_frames` ran.
    ///
    /// Returns every navigation record produced on the way. Useful for headless
    /// hosts and tests; interactive hosts call `advance_frame` from their
    /// frame callback instead.
    pub fn run_navigations(
        &mut self,
        delta_seconds: f64,
        max_frames: u32,
    ) -> NavigatorResult<Vec<NavigationRecord>> {
        validate_frame_delta(delta_seconds)?;
        let mut records: Vec<NavigationRecord> = self.finished.drain(..).collect();
        for _ in 0..max_frames {
            if self.jobs.is_empty() && self.requests.pending() == 0 {
                break;
            }
            let report = self.advance_frame(delta_seconds)?;
            records.extend(report.navigations);
        }
        Ok(records)
    }
}
