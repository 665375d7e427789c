use serde::{Deserialize, Serialize};

use crate::interaction::{CancellationProbe, NavigationTarget, NavigationToken, PauseGuard};

use super::{ConvergentScroller, Materializer, StabilityWaiter};

/// Public view of where an in-flight navigation currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum NavigationPhase {
    Materializing { attempts: u32 },
    Settling { stable_frames: u32 },
    Scrolling { frames: u32 },
}

#[derive(Debug, Clone)]
pub(super) enum JobPhase {
    Materializing(Materializer),
    Settling(StabilityWaiter),
    Scrolling(ConvergentScroller),
}

impl JobPhase {
    pub(super) fn public_phase(&self) -> NavigationPhase {
        match self {
            Self::Materializing(materializer) => NavigationPhase::Materializing {
                attempts: materializer.attempts(),
            },
            Self::Settling(waiter) => NavigationPhase::Settling {
                stable_frames: waiter.stable_frames(),
            },
            Self::Scrolling(scroller) => NavigationPhase::Scrolling {
                frames: scroller.frames(),
            },
        }
    }
}

/// One `select` call in flight.
///
/// The job owns its pause guard: however the job ends, dropping it releases
/// exactly the one pause it acquired.
#[derive(Debug)]
pub(super) struct NavigationJob {
    pub(super) token: NavigationToken,
    pub(super) target: NavigationTarget,
    pub(super) probe: CancellationProbe,
    pub(super) phase: JobPhase,
    pub(super) pause: PauseGuard,
    pub(super) selected_frame: u64,
}

impl NavigationJob {
    pub(super) fn new(
        target: NavigationTarget,
        probe: CancellationProbe,
        pause: PauseGuard,
        selected_frame: u64,
    ) -> Self {
        Self {
            token: probe.token(),
            target,
            probe,
            phase: JobPhase::Materializing(Materializer::new()),
            pause,
            selected_frame,
        }
    }
}
