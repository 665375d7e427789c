use serde::{Deserialize, Serialize};

use crate::core::{ItemId, ScrollMetrics};
use crate::interaction::NavigationToken;

/// How a navigation ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavigationOutcome {
    /// The target was materialized, settled and scrolled into place.
    Completed,
    /// A newer navigation took over before this one finished.
    Superseded,
    /// The page budget or the source ran out before the target appeared.
    NotFound { attempts: u32 },
    /// The page source rejected a request.
    Failed { reason: String },
}

impl NavigationOutcome {
    #[must_use]
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Read-only state snapshot passed to observer hooks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigatorContext {
    pub metrics: ScrollMetrics,
    pub active_item: Option<ItemId>,
    pub is_navigating: bool,
    pub auto_fetch_pause_count: u32,
    pub zoom_scale: f64,
    pub frame: u64,
}

/// Event stream exposed to observers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NavigatorEvent {
    NavigationStarted {
        token: NavigationToken,
        id: ItemId,
    },
    NavigationFinished {
        token: NavigationToken,
        id: ItemId,
        outcome: NavigationOutcome,
    },
    ActiveItemChanged {
        id: Option<ItemId>,
    },
    AnchorRestored {
        scroll_top: f64,
    },
    ZoomChanged {
        scale: f64,
    },
    BackgroundFetchRequested,
}

/// Extension hook for host-side reactions (highlighting, analytics, URL sync).
///
/// Observers see events and a context copy; they cannot mutate navigator state.
pub trait NavigatorObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &NavigatorEvent, context: &NavigatorContext);
}
