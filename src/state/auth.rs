#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::{Session, User};

/// Authentication state: the single source of truth for who is signed in.
///
/// INVARIANTS
/// ==========
/// - The user is derived from the session, so a user is present exactly
///   when a session is present.
/// - `loading` starts `true` and latches `false` on the first applied
///   update; nothing ever sets it back.
/// - Updates carry a sequence number and are applied only in increasing
///   order, so a slow initial fetch can never clobber a newer change event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthState {
    session: Option<Session>,
    loading: bool,
    last_seq: u64,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            session: None,
            loading: true,
            last_seq: 0,
        }
    }
}

impl AuthState {
    /// The current session, if authenticated.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// The current user, derived from the session.
    #[must_use]
    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    /// Whether the initial synchronization with the identity service is
    /// still in flight.
    #[must_use]
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Apply a session update tagged with its sequence number.
    ///
    /// Returns `false` (leaving the state untouched) when `seq` is not
    /// newer than the last applied update. The first applied update ends
    /// the loading window.
    pub fn apply(&mut self, seq: u64, session: Option<Session>) -> bool {
        if seq <= self.last_seq {
            return false;
        }
        self.last_seq = seq;
        self.session = session;
        self.loading = false;
        true
    }

    /// What the route guard should do for this state.
    #[must_use]
    pub fn guard_decision(&self) -> GuardDecision {
        if self.loading {
            GuardDecision::Checking
        } else if self.session.is_some() {
            GuardDecision::Allow
        } else {
            GuardDecision::RedirectToLogin
        }
    }
}

/// Outcome of evaluating [`AuthState`] at the edge of a protected region.
/// Exactly one outcome exists for every state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Initial synchronization still in flight; show a loading indicator.
    Checking,
    /// Settled and unauthenticated; leave for the login entry point.
    RedirectToLogin,
    /// Settled and authenticated; render the protected content.
    Allow,
}
