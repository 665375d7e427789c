use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::error::NavigatorResult;
use crate::interaction::{AutoFetchPause, NavigationState, ScrollSuppression, TokenSequence};
use crate::source::PageSource;
use crate::surface::ListSurface;

use super::validation::validate_navigator_config;
use super::{ListNavigator, NavigationHandle, NavigatorConfig};

impl<S: ListSurface, P: PageSource> ListNavigator<S, P> {
    /// Creates a navigator over the given collaborators.
    ///
    /// The surface content scale is reset to 1.0 so zoom state starts in sync.
    pub fn new(mut surface: S, source: P, config: NavigatorConfig) -> NavigatorResult<Self> {
        let config = validate_navigator_config(config)?;
        surface.set_content_scale(1.0);
        debug!(
            attempt_budget = config.materialize.attempt_budget,
            auto_fetch = config.auto_fetch.enabled,
            "list navigator initialized"
        );

        Ok(Self {
            surface,
            source,
            config,
            tokens: TokenSequence::default(),
            state: NavigationState::default(),
            pause: AutoFetchPause::default(),
            jobs: IndexMap::new(),
            finished: SmallVec::new(),
            active_item: None,
            suppression: ScrollSuppression::default(),
            passive_pending: false,
            pending_anchor: None,
            zoom_scale: 1.0,
            background_fetch: None,
            auto_fetch_blocked: false,
            requests: NavigationHandle::default(),
            observers: Vec::new(),
            clock_seconds: 0.0,
            frame: 0,
        })
    }

    /// Replaces the tuning. In-flight navigations pick it up on their next frame.
    pub fn set_config(&mut self, config: NavigatorConfig) -> NavigatorResult<()> {
        let config = validate_navigator_config(config)?;
        self.config = config;
        let clamped = config.zoom.clamp(self.zoom_scale);
        if clamped != self.zoom_scale {
            self.zoom_to(clamped)?;
        }
        Ok(())
    }
}
