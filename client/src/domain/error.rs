//! Error type shared by the catalogue services.
//!
//! These errors are transport agnostic. The CLI (or any other inbound
//! adapter) maps them to user-visible messaging; the services never leak
//! collaborator detail beyond the [`ErrorCode`] classification and a short
//! message.

use serde::{Deserialize, Serialize};

/// Failure category, serialised as a stable snake-case string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Caller-supplied input failed validation.
    InvalidRequest,
    /// Login was rejected or the auth collaborator could not be reached.
    AuthFailure,
    /// No usable session token is available.
    SessionExpired,
    /// The session ended while a remote call was in flight.
    SessionEnded,
    /// A remote list or detail fetch failed.
    FetchFailure,
    /// Reading or writing a persisted slot failed.
    StorageFailure,
    /// An invariant broke inside the client, e.g. a poisoned lock.
    InternalError,
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` must be non-empty once trimmed of whitespace.
///
/// # Examples
/// ```
/// use catalogue_client::domain::{DomainError, ErrorCode};
///
/// let err = DomainError::new(ErrorCode::FetchFailure, "catalogue unavailable");
/// assert_eq!(err.code(), ErrorCode::FetchFailure);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
#[serde(try_from = "DomainErrorDto", into = "DomainErrorDto")]
pub struct DomainError {
    code: ErrorCode,
    message: String,
}

/// Raised by [`DomainError::try_new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainErrorValidationError {
    /// The message was blank once trimmed.
    #[error("error message must not be empty")]
    EmptyMessage,
}

impl DomainError {
    /// Create a new error, falling back to the code's default message when
    /// `message` is blank.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::try_new(code, message).unwrap_or_else(|_| Self {
            code,
            message: default_message(code).to_owned(),
        })
    }

    /// Create an error, rejecting a blank message.
    ///
    /// # Errors
    ///
    /// Returns [`DomainErrorValidationError::EmptyMessage`] for blank messages.
    pub fn try_new(
        code: ErrorCode,
        message: impl Into<String>,
    ) -> Result<Self, DomainErrorValidationError> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(DomainErrorValidationError::EmptyMessage);
        }
        Ok(Self { code, message })
    }

    /// Failure category.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.code
    }

    /// Short message safe to show the user.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Caller input failed validation.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Login failed.
    pub fn auth_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthFailure, message)
    }

    /// No usable token.
    pub fn session_expired(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SessionExpired, message)
    }

    /// The session ended mid-call.
    pub fn session_ended(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::SessionEnded, message)
    }

    /// A remote fetch failed.
    pub fn fetch_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::FetchFailure, message)
    }

    /// A persisted slot was unreadable or unwritable.
    pub fn storage_failure(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageFailure, message)
    }

    /// Internal invariant failure.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

const fn default_message(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::InvalidRequest => "invalid request",
        ErrorCode::AuthFailure => "login failed",
        ErrorCode::SessionExpired => "session expired",
        ErrorCode::SessionEnded => "session ended",
        ErrorCode::FetchFailure => "fetch failed",
        ErrorCode::StorageFailure => "storage failure",
        ErrorCode::InternalError => "internal error",
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for DomainError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DomainErrorDto {
    code: ErrorCode,
    message: String,
}

impl From<DomainError> for DomainErrorDto {
    fn from(value: DomainError) -> Self {
        Self {
            code: value.code,
            message: value.message,
        }
    }
}

impl TryFrom<DomainErrorDto> for DomainError {
    type Error = DomainErrorValidationError;

    fn try_from(value: DomainErrorDto) -> Result<Self, Self::Error> {
        Self::try_new(value.code, value.message)
    }
}

#[cfg(test)]
mod tests;
