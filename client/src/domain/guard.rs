//! Access guard for protected views.
//!
//! The guard answers one question before a protected view activates: is
//! there a valid session? When there is not, it ends whatever is left of the
//! session (clearing stale slots and sending the user to login) and tells the
//! caller to redirect.

use std::sync::Arc;

use tracing::debug;

use crate::domain::session::LogoutReason;

/// Session operations the guard depends on.
#[cfg_attr(test, mockall::automock)]
pub trait SessionControl: Send + Sync {
    /// Whether a complete, unexpired credential is stored.
    fn has_valid_token(&self) -> bool;

    /// End the session for `reason`.
    fn end_session(&self, reason: LogoutReason);
}

/// Outcome of a guard check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// The protected view may activate.
    Allow,
    /// Activation is refused; the session has been ended.
    RedirectToLogin,
}

impl GuardDecision {
    /// Whether activation may proceed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// Activation guard for protected views.
#[derive(Clone)]
pub struct AccessGuard {
    session: Arc<dyn SessionControl>,
}

impl AccessGuard {
    /// Guard backed by `session`.
    pub fn new(session: Arc<dyn SessionControl>) -> Self {
        Self { session }
    }

    /// Decide whether a protected view may activate.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use catalogue_client::domain::{AccessGuard, GuardDecision, LogoutReason, SessionControl};
    ///
    /// struct SignedOut;
    /// impl SessionControl for SignedOut {
    ///     fn has_valid_token(&self) -> bool { false }
    ///     fn end_session(&self, _reason: LogoutReason) {}
    /// }
    ///
    /// let guard = AccessGuard::new(Arc::new(SignedOut));
    /// assert_eq!(guard.check(), GuardDecision::RedirectToLogin);
    /// ```
    #[must_use]
    pub fn check(&self) -> GuardDecision {
        if self.session.has_valid_token() {
            return GuardDecision::Allow;
        }
        debug!("guard refused activation without a valid token");
        self.session.end_session(LogoutReason::Guard);
        GuardDecision::RedirectToLogin
    }
}
