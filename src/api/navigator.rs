use std::fmt;

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::core::{ItemId, ViewportAnchor};
use crate::extensions::NavigatorObserver;
use crate::interaction::{
    AutoFetchPause, NavigationState, NavigationTarget, NavigationToken, ScrollSuppression,
    TokenSequence,
};
use crate::source::{FetchTicket, PageSource};
use crate::surface::ListSurface;

use super::navigation_job::NavigationJob;
use super::{NavigationHandle, NavigationPhase, NavigationRecord, NavigatorConfig};

/// Main orchestration facade consumed by host applications.
///
/// `ListNavigator` owns the surface and page source collaborators, runs
/// `select` navigations, tracks the active item while the user scrolls and
/// keeps the view anchored across reflows. Hosts call
/// [`ListNavigator::advance_frame`] once per animation frame.
pub struct ListNavigator<S: ListSurface, P: PageSource> {
    pub(super) surface: S,
    pub(super) source: P,
    pub(super) config: NavigatorConfig,
    pub(super) tokens: TokenSequence,
    pub(super) state: NavigationState,
    pub(super) pause: AutoFetchPause,
    pub(super) jobs: IndexMap<NavigationToken, NavigationJob>,
    pub(super) finished: SmallVec<[NavigationRecord; 2]>,
    pub(super) active_item: Option<ItemId>,
    pub(super) suppression: ScrollSuppression,
    pub(super) passive_pending: bool,
    pub(super) pending_anchor: Option<ViewportAnchor>,
    pub(super) zoom_scale: f64,
    pub(super) background_fetch: Option<FetchTicket>,
    pub(super) auto_fetch_blocked: bool,
    pub(super) requests: NavigationHandle,
    pub(super) observers: Vec<Box<dyn NavigatorObserver>>,
    pub(super) clock_seconds: f64,
    pub(super) frame: u64,
}

impl<S: ListSurface, P: PageSource> ListNavigator<S, P> {
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access for hosts reacting to layout changes (resize, DOM
    /// updates). Prefer [`Self::zoom_to`] for scale changes.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn source(&self) -> &P {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut P {
        &mut self.source
    }

    #[must_use]
    pub fn config(&self) -> NavigatorConfig {
        self.config
    }

    #[must_use]
    pub fn active_item_id(&self) -> Option<&ItemId> {
        self.active_item.as_ref()
    }

    #[must_use]
    pub fn is_navigating(&self) -> bool {
        self.state.is_navigating()
    }

    #[must_use]
    pub fn navigation_target(&self) -> Option<&NavigationTarget> {
        self.state.target()
    }

    #[must_use]
    pub fn navigation_state(&self) -> &NavigationState {
        &self.state
    }

    #[must_use]
    pub fn active_token(&self) -> Option<NavigationToken> {
        self.tokens.active()
    }

    #[must_use]
    pub fn auto_fetch_pause_count(&self) -> u32 {
        self.pause.count()
    }

    #[must_use]
    pub fn is_auto_fetch_paused(&self) -> bool {
        self.pause.is_paused()
    }

    /// `true` while a navigation is in flight or an instant restore just ran;
    /// scroll events seen meanwhile are attributed to the navigator.
    #[must_use]
    pub fn is_programmatic_scroll(&self) -> bool {
        self.suppression.is_programmatic(self.frame)
    }

    /// Navigations still holding a token, superseded ones included.
    #[must_use]
    pub fn in_flight_navigations(&self) -> usize {
        self.jobs.len()
    }

    #[must_use]
    pub fn navigation_phases(&self) -> IndexMap<NavigationToken, NavigationPhase> {
        self.jobs
            .iter()
            .map(|(token, job)| (*token, job.phase.public_phase()))
            .collect()
    }

    /// `true` when no navigation is in flight and no background page is loading.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.jobs.is_empty() && self.background_fetch.is_none()
    }

    #[must_use]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    #[must_use]
    pub fn clock_seconds(&self) -> f64 {
        self.clock_seconds
    }

    #[must_use]
    pub fn into_parts(self) -> (S, P) {
        (self.surface, self.source)
    }
}

impl<S, P> fmt::Debug for ListNavigator<S, P>
where
    S: ListSurface + fmt::Debug,
    P: PageSource + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListNavigator")
            .field("surface", &self.surface)
            .field("source", &self.source)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("active_item", &self.active_item)
            .field("pause_count", &self.pause.count())
            .field("jobs", &self.jobs.len())
            .field("zoom_scale", &self.zoom_scale)
            .field("frame", &self.frame)
            .finish_non_exhaustive()
    }
}
