use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{ItemId, ScrollMetrics, ViewportAnchor};
use crate::interaction::{NavigationState, NavigationToken};
use crate::source::{PageSource, SourceStatus};
use crate::surface::ListSurface;

use super::{ListNavigator, NavigationPhase};

/// Serializable deterministic state snapshot used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigatorSnapshot {
    pub frame: u64,
    pub clock_seconds: f64,
    pub metrics: ScrollMetrics,
    pub active_item: Option<ItemId>,
    pub navigation: NavigationState,
    pub active_token: Option<NavigationToken>,
    pub auto_fetch_pause_count: u32,
    pub zoom_scale: f64,
    pub jobs: IndexMap<NavigationToken, NavigationPhase>,
    pub pending_anchor: Option<ViewportAnchor>,
    pub background_fetch_in_flight: bool,
    pub source: SourceStatus,
}

impl<S: ListSurface, P: PageSource> ListNavigator<S, P> {
    #[must_use]
    pub fn snapshot(&self) -> NavigatorSnapshot {
        NavigatorSnapshot {
            frame: self.frame,
            clock_seconds: self.clock_seconds,
            metrics: self.surface.metrics(),
            active_item: self.active_item.clone(),
            navigation: self.state.clone(),
            active_token: self.tokens.active(),
            auto_fetch_pause_count: self.pause.count(),
            zoom_scale: self.zoom_scale,
            jobs: self.navigation_phases(),
            pending_anchor: self.pending_anchor.clone(),
            background_fetch_in_flight: self.background_fetch.is_some(),
            source: self.source.status(),
        }
    }
}
