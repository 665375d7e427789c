use std::cell::Cell;
use std::rc::Rc;

/// Reference-counted pause of background pagination.
///
/// Background fetching is paused while at least one [`PauseGuard`] is alive.
/// A counter rather than a flag lets overlapping navigations pause and release
/// independently.
#[derive(Debug, Clone, Default)]
pub struct AutoFetchPause {
    count: Rc<Cell<u32>>,
}

impl AutoFetchPause {
    pub fn acquire(&self) -> PauseGuard {
        self.count.set(self.count.get().saturating_add(1));
        PauseGuard {
            count: Rc::clone(&self.count),
        }
    }

    #[must_use]
    pub fn count(&self) -> u32 {
        self.count.get()
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.count.get() > 0
    }
}

/// Scoped hold on an [`AutoFetchPause`]; releases exactly once on drop.
#[derive(Debug)]
#[must_use = "dropping the guard releases the pause immediately"]
pub struct PauseGuard {
    count: Rc<Cell<u32>>,
}

impl Drop for PauseGuard {
    fn drop(&mut self) {
        self.count.set(self.count.get().saturating_sub(1));
    }
}
