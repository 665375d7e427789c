use std::collections::VecDeque;

use indexmap::IndexMap;
use tracing::trace;

use crate::error::{NavigatorError, NavigatorResult};
use crate::surface::{SharedItems, StackedItem};

use super::{FetchPoll, FetchTicket, PageSource, SourceStatus};

/// Tickets kept for late pollers before the oldest is forgotten.
const RESOLVED_TICKET_HISTORY: usize = 64;

/// Where an injected failure surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    /// `fetch_next_page` returns an error.
    OnRequest,
    /// The request is accepted and its poll later reports `Failed`.
    OnPoll,
}

#[derive(Debug, Clone)]
struct InFlight {
    polls_remaining: u32,
    fails: bool,
}

#[derive(Debug, Clone)]
enum PageFeed {
    Finite(VecDeque<Vec<StackedItem>>),
    /// Generates `page_size` filler rows per page forever.
    Endless {
        prefix: String,
        page_size: usize,
        row_height: f64,
        generated: usize,
    },
}

/// In-memory page source feeding a [`SharedItems`] list.
///
/// Requests made while another is in flight join it and receive the same
/// ticket. A page lands after `latency_polls` polls of its ticket.
#[derive(Debug, Clone)]
pub struct PagedSource {
    items: SharedItems,
    feed: PageFeed,
    total_count: Option<usize>,
    latency_polls: u32,
    next_ticket: u64,
    in_flight: IndexMap<FetchTicket, InFlight>,
    resolved: IndexMap<FetchTicket, FetchPoll>,
    pending_failures: VecDeque<FailureMode>,
    fetch_requests: usize,
    last_error: Option<String>,
}

impl PagedSource {
    #[must_use]
    pub fn new(items: SharedItems, pages: Vec<Vec<StackedItem>>) -> Self {
        let total = items.len() + pages.iter().map(Vec::len).sum::<usize>();
        Self::with_feed(items, PageFeed::Finite(pages.into()), Some(total))
    }

    /// Source that always reports more pages.
    #[must_use]
    pub fn endless(items: SharedItems, prefix: &str, page_size: usize, row_height: f64) -> Self {
        Self::with_feed(
            items,
            PageFeed::Endless {
                prefix: prefix.to_owned(),
                page_size: page_size.max(1),
                row_height,
                generated: 0,
            },
            None,
        )
    }

    fn with_feed(items: SharedItems, feed: PageFeed, total_count: Option<usize>) -> Self {
        Self {
            items,
            feed,
            total_count,
            latency_polls: 0,
            next_ticket: 1,
            in_flight: IndexMap::new(),
            resolved: IndexMap::new(),
            pending_failures: VecDeque::new(),
            fetch_requests: 0,
            last_error: None,
        }
    }

    /// Number of polls a ticket stays `Pending` before its page lands.
    #[must_use]
    pub fn with_latency_polls(mut self, latency_polls: u32) -> Self {
        self.latency_polls = latency_polls;
        self
    }

    /// Makes the next request fail in the given way.
    pub fn fail_next_fetch(&mut self, mode: FailureMode) {
        self.pending_failures.push_back(mode);
    }

    /// Number of `fetch_next_page` calls that started a new request.
    #[must_use]
    pub fn fetch_requests(&self) -> usize {
        self.fetch_requests
    }

    #[must_use]
    pub fn remaining_pages(&self) -> Option<usize> {
        match &self.feed {
            PageFeed::Finite(pages) => Some(pages.len()),
            PageFeed::Endless { .. } => None,
        }
    }

    fn land_next_page(&mut self) {
        match &mut self.feed {
            PageFeed::Finite(pages) => {
                if let Some(page) = pages.pop_front() {
                    trace!(rows = page.len(), "page landed");
                    self.items.extend(page);
                }
            }
            PageFeed::Endless {
                prefix,
                page_size,
                row_height,
                generated,
            } => {
                let start = *generated;
                *generated += *page_size;
                self.items.extend(
                    (start..*generated)
                        .map(|index| StackedItem::new(format!("{prefix}-{index}"), *row_height)),
                );
            }
        }
    }

    fn resolve(&mut self, ticket: FetchTicket, poll: FetchPoll) {
        self.resolved.insert(ticket, poll);
        if self.resolved.len() > RESOLVED_TICKET_HISTORY {
            self.resolved.shift_remove_index(0);
        }
    }
}

impl PageSource for PagedSource {
    fn has_more(&self) -> bool {
        match &self.feed {
            PageFeed::Finite(pages) => !pages.is_empty(),
            PageFeed::Endless { .. } => true,
        }
    }

    fn fetch_next_page(&mut self) -> NavigatorResult<FetchTicket> {
        if let Some((ticket, _)) = self.in_flight.first() {
            return Ok(*ticket);
        }
        if self.pending_failures.front() == Some(&FailureMode::OnRequest) {
            self.pending_failures.pop_front();
            let reason = "page request rejected".to_owned();
            self.last_error = Some(reason.clone());
            return Err(NavigatorError::Source(reason));
        }

        let fails = self.pending_failures.front() == Some(&FailureMode::OnPoll);
        if fails {
            self.pending_failures.pop_front();
        }
        let ticket = FetchTicket(self.next_ticket);
        self.next_ticket += 1;
        self.fetch_requests += 1;
        self.in_flight.insert(
            ticket,
            InFlight {
                polls_remaining: self.latency_polls,
                fails,
            },
        );
        Ok(ticket)
    }

    fn poll_fetch(&mut self, ticket: FetchTicket) -> FetchPoll {
        if let Some(poll) = self.resolved.get(&ticket) {
            return poll.clone();
        }
        let Some(in_flight) = self.in_flight.get_mut(&ticket) else {
            return FetchPoll::Failed(format!("unknown fetch ticket {}", ticket.0));
        };
        if in_flight.polls_remaining > 0 {
            in_flight.polls_remaining -= 1;
            return FetchPoll::Pending;
        }

        let fails = in_flight.fails;
        self.in_flight.shift_remove(&ticket);
        let poll = if fails {
            let reason = "page request failed".to_owned();
            self.last_error = Some(reason.clone());
            FetchPoll::Failed(reason)
        } else {
            self.last_error = None;
            self.land_next_page();
            FetchPoll::Loaded
        };
        self.resolve(ticket, poll.clone());
        poll
    }

    fn status(&self) -> SourceStatus {
        SourceStatus {
            total_count: self.total_count,
            loaded_count: self.items.len(),
            is_loading: !self.in_flight.is_empty(),
            error: self.last_error.clone(),
        }
    }
}
