//! Wire DTOs for the catalogue HTTP service.
//!
//! Responses decode into these first, then map into domain types in one
//! pass so a malformed field is reported as a decode error rather than a
//! half-built domain value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ports::AuthGrant;
use crate::domain::{BearerToken, LoginCredentials, parse_timestamp};

#[derive(Debug, Serialize)]
pub(super) struct LoginRequestDto<'a> {
    pub(super) username: &'a str,
    pub(super) password: &'a str,
}

impl<'a> From<&'a LoginCredentials> for LoginRequestDto<'a> {
    fn from(value: &'a LoginCredentials) -> Self {
        Self {
            username: value.username(),
            password: value.password(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct LoginResponseDto {
    #[serde(default)]
    pub(super) success: bool,
    #[serde(default)]
    pub(super) token: Option<String>,
    #[serde(default)]
    pub(super) token_expiry: Option<String>,
    #[serde(default)]
    pub(super) message: Option<String>,
}

/// Why a decoded login response could not become a grant.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum LoginResponseProblem {
    /// The service reported failure, with its message when it sent one.
    Unsuccessful(Option<String>),
    /// `success` was set but no usable token came with it.
    MissingToken,
    /// `tokenExpiry` was present but not an RFC 3339 timestamp.
    UnreadableExpiry(String),
}

impl LoginResponseDto {
    pub(super) fn into_grant(self) -> Result<AuthGrant, LoginResponseProblem> {
        if !self.success {
            return Err(LoginResponseProblem::Unsuccessful(self.message));
        }
        let token = self
            .token
            .and_then(BearerToken::new)
            .ok_or(LoginResponseProblem::MissingToken)?;
        let expires_at = self
            .token_expiry
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| parse_expiry(&raw))
            .transpose()?;
        Ok(AuthGrant { token, expires_at })
    }
}

fn parse_expiry(raw: &str) -> Result<DateTime<Utc>, LoginResponseProblem> {
    parse_timestamp(raw).ok_or_else(|| LoginResponseProblem::UnreadableExpiry(raw.to_owned()))
}
