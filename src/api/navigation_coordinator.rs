use smallvec::SmallVec;
use tracing::{debug, trace, warn};

use crate::error::{NavigatorError, NavigatorResult};
use crate::extensions::{NavigationOutcome, NavigatorEvent};
use crate::interaction::{NavigationTarget, NavigationToken};
use crate::source::PageSource;
use crate::surface::ListSurface;

use super::navigation_job::{JobPhase, NavigationJob};
use super::{
    ConvergentScroller, ListNavigator, MaterializeStep, NavigationRecord, ScrollStep, SettleStep,
    StabilityWaiter,
};

enum PhaseTransition {
    Stay,
    Enter(JobPhase),
    Finish(NavigationOutcome),
}

impl<S: ListSurface, P: PageSource> ListNavigator<S, P> {
    /// Starts navigating to `target`, superseding any navigation in flight.
    ///
    /// The target becomes the active item immediately. Materialization starts
    /// within this call (an already present item triggers no fetch); settling
    /// and scrolling proceed on subsequent frames.
    pub fn select(&mut self, target: NavigationTarget) -> NavigatorResult<NavigationToken> {
        if target.id.is_empty() {
            return Err(NavigatorError::InvalidData(
                "navigation target id must not be empty".to_owned(),
            ));
        }

        let token = self.tokens.mint();
        debug!(
            token = %token,
            id = %target.id,
            superseding = self.jobs.len(),
            "navigation selected"
        );

        self.state.begin(target.clone());
        let pause = self.pause.acquire();
        // the newest navigation takes over the claim of any superseded one
        self.suppression.begin_navigation();
        self.set_active_item(Some(target.id.clone()));
        self.emit_event(NavigatorEvent::NavigationStarted {
            token,
            id: target.id.clone(),
        });

        let mut job = NavigationJob::new(target, self.tokens.probe(token), pause, self.frame);
        match self.step_job(&mut job) {
            Some(outcome) => {
                let record = self.finish_job(job, outcome);
                self.finished.push(record);
            }
            None => {
                self.jobs.insert(token, job);
            }
        }
        Ok(token)
    }

    /// Convenience wrapper around [`Self::select`].
    pub fn select_item(
        &mut self,
        id: &str,
        title: impl Into<String>,
    ) -> NavigatorResult<NavigationToken> {
        self.select(NavigationTarget::new(id, title))
    }

    /// Advances every in-flight navigation by one frame, oldest first.
    ///
    /// Jobs selected during the current frame already took their step inside
    /// `select` and wait for the next frame.
    pub(super) fn step_navigations(&mut self) {
        let frame = self.frame;
        let tokens: SmallVec<[NavigationToken; 4]> = self
            .jobs
            .iter()
            .filter(|(_, job)| job.selected_frame != frame)
            .map(|(token, _)| *token)
            .collect();
        for token in tokens {
            let Some(mut job) = self.jobs.shift_remove(&token) else {
                continue;
            };
            match self.step_job(&mut job) {
                Some(outcome) => {
                    let record = self.finish_job(job, outcome);
                    self.finished.push(record);
                }
                None => {
                    self.jobs.insert(token, job);
                }
            }
        }
    }

    fn step_job(&mut self, job: &mut NavigationJob) -> Option<NavigationOutcome> {
        let now = self.clock_seconds;
        let transition = match &mut job.phase {
            JobPhase::Materializing(materializer) => {
                match materializer.step(
                    &job.target.id,
                    &self.surface,
                    &mut self.source,
                    self.config.materialize,
                    &job.probe,
                ) {
                    MaterializeStep::Pending => PhaseTransition::Stay,
                    MaterializeStep::Found => {
                        trace!(token = %job.token, attempts = materializer.attempts(), "target materialized");
                        PhaseTransition::Enter(JobPhase::Settling(StabilityWaiter::new(now)))
                    }
                    MaterializeStep::NotFound { attempts } => {
                        PhaseTransition::Finish(NavigationOutcome::NotFound { attempts })
                    }
                    MaterializeStep::Failed(err) => PhaseTransition::Finish(NavigationOutcome::Failed {
                        reason: err.to_string(),
                    }),
                    MaterializeStep::Cancelled => {
                        PhaseTransition::Finish(NavigationOutcome::Superseded)
                    }
                }
            }
            JobPhase::Settling(waiter) => {
                match waiter.step(
                    &job.target.id,
                    &self.surface,
                    self.config.stability,
                    now,
                    &job.probe,
                ) {
                    SettleStep::Pending => PhaseTransition::Stay,
                    SettleStep::Settled { timed_out, .. } => {
                        if timed_out {
                            debug!(token = %job.token, "stability wait timed out; scrolling to best-known position");
                        }
                        PhaseTransition::Enter(JobPhase::Scrolling(ConvergentScroller::new(now)))
                    }
                    SettleStep::Cancelled { .. } => {
                        PhaseTransition::Finish(NavigationOutcome::Superseded)
                    }
                }
            }
            JobPhase::Scrolling(scroller) => {
                match scroller.step(
                    &job.target.id,
                    &mut self.surface,
                    self.config.convergence,
                    now,
                    &job.probe,
                ) {
                    ScrollStep::Pending { scroll_top } => {
                        trace!(token = %job.token, scroll_top, "navigation scroll step");
                        PhaseTransition::Stay
                    }
                    ScrollStep::Arrived { scroll_top, timed_out } => {
                        debug!(token = %job.token, scroll_top, timed_out, "navigation scroll settled");
                        PhaseTransition::Finish(NavigationOutcome::Completed)
                    }
                    ScrollStep::Lost => {
                        debug!(token = %job.token, "navigation target vanished while scrolling");
                        PhaseTransition::Finish(NavigationOutcome::Completed)
                    }
                    ScrollStep::Cancelled => PhaseTransition::Finish(NavigationOutcome::Superseded),
                }
            }
        };

        match transition {
            PhaseTransition::Stay => None,
            PhaseTransition::Enter(phase) => {
                job.phase = phase;
                None
            }
            PhaseTransition::Finish(outcome) => Some(outcome),
        }
    }

    /// Reconciles shared state for a finished job and releases its pause.
    ///
    /// Only the active token may touch `NavigationState` or the active item;
    /// a superseded job merely drops its guard.
    fn finish_job(&mut self, job: NavigationJob, outcome: NavigationOutcome) -> NavigationRecord {
        let NavigationJob {
            token,
            target,
            pause,
            ..
        } = job;

        match &outcome {
            NavigationOutcome::Completed => {
                debug!(token = %token, id = %target.id, "navigation completed");
            }
            NavigationOutcome::Superseded => {
                debug!(token = %token, id = %target.id, "navigation superseded");
            }
            NavigationOutcome::NotFound { attempts } => {
                warn!(
                    token = %token,
                    id = %target.id,
                    attempts,
                    "navigation target not found after paging"
                );
            }
            NavigationOutcome::Failed { reason } => {
                warn!(
                    token = %token,
                    id = %target.id,
                    reason = %reason,
                    "navigation aborted by page source failure"
                );
            }
        }

        if self.tokens.is_active(token) {
            if outcome.is_completed() {
                self.set_active_item(Some(target.id.clone()));
            }
            self.state.clear();
            self.suppression.end_navigation(self.frame);
            self.tokens.retire(token);
        }
        drop(pause);

        self.emit_event(NavigatorEvent::NavigationFinished {
            token,
            id: target.id.clone(),
            outcome: outcome.clone(),
        });

        NavigationRecord {
            token,
            id: target.id,
            outcome,
        }
    }
}
