mod paged_source;

pub use paged_source::{FailureMode, PagedSource};

use serde::{Deserialize, Serialize};

use crate::error::NavigatorResult;

/// Handle for one in-flight page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FetchTicket(pub u64);

/// Progress of a page request, polled once per frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchPoll {
    Pending,
    /// The page landed and its items are visible to the surface.
    Loaded,
    Failed(String),
}

/// Loading feedback surfaced to the UI. Navigation logic never reads it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SourceStatus {
    pub total_count: Option<usize>,
    pub loaded_count: usize,
    pub is_loading: bool,
    pub error: Option<String>,
}

/// Contract implemented by the remote paginated data source.
///
/// Fetches are asynchronous from the navigator's point of view: a request
/// returns a ticket immediately and completion is observed through
/// [`PageSource::poll_fetch`]. Loaded pages mutate the list shown by the
/// [`crate::surface::ListSurface`] as a side effect. Tickets that nobody polls
/// anymore are simply abandoned.
pub trait PageSource {
    fn has_more(&self) -> bool;

    /// Starts loading the next page. An error here is a synchronous rejection.
    fn fetch_next_page(&mut self) -> NavigatorResult<FetchTicket>;

    fn poll_fetch(&mut self, ticket: FetchTicket) -> FetchPoll;

    fn status(&self) -> SourceStatus;
}
