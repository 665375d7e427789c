use tracing::{trace, warn};

use crate::extensions::NavigatorEvent;
use crate::source::{FetchPoll, PageSource, SourceStatus};
use crate::surface::ListSurface;

use super::ListNavigator;

impl<S: ListSurface, P: PageSource> ListNavigator<S, P> {
    #[must_use]
    pub fn source_status(&self) -> SourceStatus {
        self.source.status()
    }

    #[must_use]
    pub fn is_background_fetch_in_flight(&self) -> bool {
        self.background_fetch.is_some()
    }

    /// Polls the background page request and starts a new one when the
    /// viewport nears the end of the list. Returns `true` when a request
    /// was started this frame.
    ///
    /// Nothing new is requested while any navigation holds a pause. A failed
    /// request blocks further background requests until the next user scroll.
    pub(super) fn step_auto_fetch(&mut self) -> bool {
        if let Some(ticket) = self.background_fetch {
            match self.source.poll_fetch(ticket) {
                FetchPoll::Pending => return false,
                FetchPoll::Loaded => {
                    trace!(ticket = ticket.0, "background page landed");
                    self.background_fetch = None;
                    return false;
                }
                FetchPoll::Failed(reason) => {
                    warn!(ticket = ticket.0, reason = %reason, "background page request failed");
                    self.background_fetch = None;
                    self.auto_fetch_blocked = true;
                    return false;
                }
            }
        }

        if !self.config.auto_fetch.enabled
            || self.auto_fetch_blocked
            || self.pause.is_paused()
            || !self.source.has_more()
        {
            return false;
        }
        let metrics = self.surface.metrics();
        if metrics.distance_to_end() > self.config.auto_fetch.prefetch_distance_px {
            return false;
        }

        match self.source.fetch_next_page() {
            Ok(ticket) => {
                trace!(
                    ticket = ticket.0,
                    distance_to_end = metrics.distance_to_end(),
                    "background page requested"
                );
                self.background_fetch = Some(ticket);
                self.emit_event(NavigatorEvent::BackgroundFetchRequested);
                true
            }
            Err(err) => {
                warn!(error = %err, "background page request rejected");
                self.auto_fetch_blocked = true;
                false
            }
        }
    }
}
