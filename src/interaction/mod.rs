mod pause;
mod token;

pub use pause::{AutoFetchPause, PauseGuard};
pub use token::{CancellationProbe, NavigationToken, TokenSequence};

use serde::{Deserialize, Serialize};

use crate::core::ItemId;

/// What a navigation is heading to, as shown by a "jumping to..." indicator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationTarget {
    pub id: ItemId,
    pub title: String,
}

impl NavigationTarget {
    #[must_use]
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Public navigation state read by the surrounding UI.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NavigationState {
    is_navigating: bool,
    target: Option<NavigationTarget>,
}

impl NavigationState {
    #[must_use]
    pub fn is_navigating(&self) -> bool {
        self.is_navigating
    }

    #[must_use]
    pub fn target(&self) -> Option<&NavigationTarget> {
        self.target.as_ref()
    }

    pub fn begin(&mut self, target: NavigationTarget) {
        self.is_navigating = true;
        self.target = Some(target);
    }

    pub fn clear(&mut self) {
        self.is_navigating = false;
        self.target = None;
    }
}

/// Tracks whether the scroll position is currently being driven by the
/// navigator rather than by the user.
///
/// Passive active-item tracking must ignore scroll events while a navigation
/// is in flight (paging, settling and scrolling alike) and after instant
/// anchor restoration. Restoration and the end of a navigation both keep the
/// flag raised through the following frame, so the scroll event they trigger
/// is not mistaken for user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScrollSuppression {
    navigating: bool,
    quiet_through_frame: Option<u64>,
}

impl ScrollSuppression {
    #[must_use]
    pub fn is_programmatic(self, frame: u64) -> bool {
        self.navigating || self.quiet_through_frame.is_some_and(|last| frame <= last)
    }

    pub fn begin_navigation(&mut self) {
        self.navigating = true;
    }

    pub fn end_navigation(&mut self, current_frame: u64) {
        if self.navigating {
            self.navigating = false;
            self.mark_instant_scroll(current_frame);
        }
    }

    /// Raises the flag through the frame following `current_frame`.
    pub fn mark_instant_scroll(&mut self, current_frame: u64) {
        let last = current_frame.saturating_add(1);
        self.quiet_through_frame = Some(
            self.quiet_through_frame
                .map_or(last, |previous| previous.max(last)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::{NavigationState, NavigationTarget, ScrollSuppression};

    #[test]
    fn navigation_state_begin_and_clear() {
        let mut state = NavigationState::default();
        state.begin(NavigationTarget::new("q-3", "Question 3"));
        assert!(state.is_navigating());
        assert_eq!(state.target().map(|t| t.title.as_str()), Some("Question 3"));

        state.clear();
        assert!(!state.is_navigating());
        assert!(state.target().is_none());
    }

    #[test]
    fn instant_scroll_suppresses_through_next_frame() {
        let mut suppression = ScrollSuppression::default();
        suppression.mark_instant_scroll(4);
        assert!(suppression.is_programmatic(4));
        assert!(suppression.is_programmatic(5));
        assert!(!suppression.is_programmatic(6));
    }

    #[test]
    fn navigation_claim_holds_until_ended() {
        let mut suppression = ScrollSuppression::default();
        suppression.begin_navigation();
        assert!(suppression.is_programmatic(100));
        suppression.end_navigation(100);
        assert!(suppression.is_programmatic(101));
        assert!(!suppression.is_programmatic(102));
    }
}
