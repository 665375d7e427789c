use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Monotonic identity of one `select` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavigationToken(u64);

impl NavigationToken {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NavigationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Mints tokens and owns the shared "current token" cell.
///
/// Tokens start at 1 and are never reused. Minting a token makes it the only
/// active one; every older token is superseded from that point on.
#[derive(Debug, Default)]
pub struct TokenSequence {
    last_minted: u64,
    active: Rc<Cell<Option<NavigationToken>>>,
}

impl TokenSequence {
    pub fn mint(&mut self) -> NavigationToken {
        self.last_minted = self.last_minted.saturating_add(1);
        let token = NavigationToken(self.last_minted);
        self.active.set(Some(token));
        token
    }

    #[must_use]
    pub fn active(&self) -> Option<NavigationToken> {
        self.active.get()
    }

    #[must_use]
    pub fn is_active(&self, token: NavigationToken) -> bool {
        self.active.get() == Some(token)
    }

    #[must_use]
    pub fn last_minted(&self) -> u64 {
        self.last_minted
    }

    /// Retires `token` if it is still the active one. Returns `true` when retired.
    pub fn retire(&mut self, token: NavigationToken) -> bool {
        if self.is_active(token) {
            self.active.set(None);
            return true;
        }
        false
    }

    #[must_use]
    pub fn probe(&self, token: NavigationToken) -> CancellationProbe {
        CancellationProbe {
            token,
            active: Rc::clone(&self.active),
        }
    }
}

/// Cooperative cancellation predicate closed over one token.
///
/// Long-running navigation phases poll this at every suspension point instead
/// of being killed.
#[derive(Debug, Clone)]
pub struct CancellationProbe {
    token: NavigationToken,
    active: Rc<Cell<Option<NavigationToken>>>,
}

impl CancellationProbe {
    #[must_use]
    pub fn token(&self) -> NavigationToken {
        self.token
    }

    /// `true` once a newer token was minted or this token was retired.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.active.get() != Some(self.token)
    }
}
