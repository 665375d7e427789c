use tracing::trace;

use crate::core::ItemId;
use crate::error::NavigatorError;
use crate::interaction::CancellationProbe;
use crate::source::{FetchPoll, FetchTicket, PageSource};
use crate::surface::ListSurface;

use super::MaterializeConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MaterializeStage {
    Check,
    AwaitingPage(FetchTicket),
    /// A page landed; give the rendering layer one frame before re-checking.
    YieldFrame,
}

/// Result of one materializer frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaterializeStep {
    Pending,
    Found,
    NotFound { attempts: u32 },
    Failed(NavigatorError),
    Cancelled,
}

/// Brings one item into the materialized set by paging the source.
///
/// This is the only navigation component talking to the [`PageSource`]. It
/// requests at most `attempt_budget` pages and stops early when the source
/// runs dry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Materializer {
    attempts: u32,
    stage: MaterializeStage,
}

impl Default for Materializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Materializer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            attempts: 0,
            stage: MaterializeStage::Check,
        }
    }

    /// Pages requested and landed so far.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn awaiting_page(&self) -> Option<FetchTicket> {
        match self.stage {
            MaterializeStage::AwaitingPage(ticket) => Some(ticket),
            MaterializeStage::Check | MaterializeStage::YieldFrame => None,
        }
    }

    /// Advances by one frame.
    ///
    /// An already present item resolves as `Found` without touching the source.
    pub fn step<S, P>(
        &mut self,
        id: &ItemId,
        surface: &S,
        source: &mut P,
        config: MaterializeConfig,
        probe: &CancellationProbe,
    ) -> MaterializeStep
    where
        S: ListSurface + ?Sized,
        P: PageSource + ?Sized,
    {
        if probe.is_cancelled() {
            return MaterializeStep::Cancelled;
        }

        loop {
            match self.stage {
                MaterializeStage::Check => {
                    if surface.find(id).is_some() {
                        return MaterializeStep::Found;
                    }
                    if self.attempts >= config.attempt_budget || !source.has_more() {
                        return MaterializeStep::NotFound {
                            attempts: self.attempts,
                        };
                    }
                    match source.fetch_next_page() {
                        Ok(ticket) => {
                            trace!(id = %id, attempt = self.attempts + 1, "requesting page");
                            self.stage = MaterializeStage::AwaitingPage(ticket);
                            return MaterializeStep::Pending;
                        }
                        Err(err) => return MaterializeStep::Failed(err),
                    }
                }
                MaterializeStage::AwaitingPage(ticket) => match source.poll_fetch(ticket) {
                    FetchPoll::Pending => return MaterializeStep::Pending,
                    FetchPoll::Loaded => {
                        self.stage = MaterializeStage::YieldFrame;
                        return MaterializeStep::Pending;
                    }
                    FetchPoll::Failed(reason) => {
                        return MaterializeStep::Failed(NavigatorError::Source(reason));
                    }
                },
                MaterializeStage::YieldFrame => {
                    self.attempts = self.attempts.saturating_add(1);
                    self.stage = MaterializeStage::Check;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{MaterializeStep, Materializer};
    use crate::api::MaterializeConfig;
    use crate::core::ItemId;
    use crate::interaction::TokenSequence;
    use crate::source::{FailureMode, PagedSource};
    use crate::surface::{StackedItem, StackedSurface};

    #[test]
    fn present_item_is_found_without_fetching() {
        let surface = StackedSurface::uniform(400.0, "row", 5, 40.0);
        let mut source = PagedSource::endless(surface.items().clone(), "more", 5, 40.0);
        let mut tokens = TokenSequence::default();
        let token = tokens.mint();
        let probe = tokens.probe(token);

        let mut materializer = Materializer::new();
        let step = materializer.step(
            &ItemId::new("row-3"),
            &surface,
            &mut source,
            MaterializeConfig::default(),
            &probe,
        );
        assert_eq!(step, MaterializeStep::Found);
        assert_eq!(source.fetch_requests(), 0);
    }

    #[test]
    fn pages_until_item_appears() {
        let surface = StackedSurface::new(400.0);
        let pages = vec![
            vec![StackedItem::new("a", 40.0)],
            vec![StackedItem::new("b", 40.0)],
        ];
        let mut source = PagedSource::new(surface.items().clone(), pages);
        let mut tokens = TokenSequence::default();
        let token = tokens.mint();
        let probe = tokens.probe(token);
        let id = ItemId::new("b");
        let config = MaterializeConfig::default();

        let mut materializer = Materializer::new();
        let mut frames = 0;
        let step = loop {
            frames += 1;
            let step = materializer.step(&id, &surface, &mut source, config, &probe);
            if step != MaterializeStep::Pending {
                break step;
            }
            assert!(frames < 20);
        };
        assert_eq!(step, MaterializeStep::Found);
        assert_eq!(materializer.attempts(), 2);
        assert_eq!(source.fetch_requests(), 2);
    }

    #[test]
    fn exhausted_source_reports_not_found() {
        let surface = StackedSurface::new(400.0);
        let mut source = PagedSource::new(surface.items().clone(), Vec::new());
        let mut tokens = TokenSequence::default();
        let token = tokens.mint();
        let probe = tokens.probe(token);

        let step = Materializer::new().step(
            &ItemId::new("ghost"),
            &surface,
            &mut source,
            MaterializeConfig::default(),
            &probe,
        );
        assert_eq!(step, MaterializeStep::NotFound { attempts: 0 });
    }

    #[test]
    fn rejected_request_fails() {
        let surface = StackedSurface::new(400.0);
        let mut source = PagedSource::endless(surface.items().clone(), "more", 1, 40.0);
        source.fail_next_fetch(FailureMode::OnRequest);
        let mut tokens = TokenSequence::default();
        let token = tokens.mint();
        let probe = tokens.probe(token);

        let step = Materializer::new().step(
            &ItemId::new("ghost"),
            &surface,
            &mut source,
            MaterializeConfig::default(),
            &probe,
        );
        assert!(matches!(step, MaterializeStep::Failed(_)));
    }

    #[test]
    fn superseded_token_cancels_before_fetching() {
        let surface = StackedSurface::new(400.0);
        let mut source = PagedSource::endless(surface.items().clone(), "more", 1, 40.0);
        let mut tokens = TokenSequence::default();
        let token = tokens.mint();
        let probe = tokens.probe(token);
        let _newer = tokens.mint();

        let step = Materializer::new().step(
            &ItemId::new("ghost"),
            &surface,
            &mut source,
            MaterializeConfig::default(),
            &probe,
        );
        assert_eq!(step, MaterializeStep::Cancelled);
        assert_eq!(source.fetch_requests(), 0);
    }
}
