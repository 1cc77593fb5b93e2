//! Port through which data collaborators obtain the current session token.

use crate::domain::BearerToken;

/// Source of the token used for `Authorization` headers.
#[cfg_attr(test, mockall::automock)]
pub trait TokenProvider: Send + Sync {
    /// Current stored token, if any.
    fn bearer_token(&self) -> Option<BearerToken>;
}
