//! Driven port for the remote authentication collaborator.
//!
//! The session manager calls this port to exchange a username and password
//! for a session token. Adapters own transport details; the domain only sees
//! a grant or a classified failure.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::define_port_error;
use crate::domain::{BearerToken, LoginCredentials};

/// Token issued by a successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthGrant {
    /// Session token.
    pub token: BearerToken,
    /// Expiry reported by the collaborator, when it sent one.
    pub expires_at: Option<DateTime<Utc>>,
}

define_port_error! {
    /// Errors surfaced by the auth gateway adapter.
    pub enum AuthGatewayError {
        /// The collaborator answered but did not report success.
        Rejected { message: String } => "authentication rejected: {message}",
        /// Network transport failed before a usable response arrived.
        Transport { message: String } => "auth transport failed: {message}",
        /// The collaborator did not answer in time.
        Timeout { message: String } => "auth request timed out: {message}",
        /// The response body could not be decoded.
        Decode { message: String } => "auth response decode failed: {message}",
    }
}

/// Port for exchanging credentials for a session token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Authenticate `credentials` and return the issued grant.
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthGrant, AuthGatewayError>;
}

/// Fixture token issued by [`FixtureAuthGateway`].
pub const FIXTURE_TOKEN: &str = "abc123";

/// In-memory authenticator for demos and tests.
///
/// `user` / `pass` authenticates successfully and produces [`FIXTURE_TOKEN`]
/// without an expiry, so the session's default lifetime applies.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAuthGateway;

#[async_trait]
impl AuthGateway for FixtureAuthGateway {
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthGrant, AuthGatewayError> {
        if credentials.username() == "user" && credentials.password() == "pass" {
            let token = BearerToken::new(FIXTURE_TOKEN)
                .ok_or_else(|| AuthGatewayError::decode("fixture token is blank"))?;
            Ok(AuthGrant {
                token,
                expires_at: None,
            })
        } else {
            Err(AuthGatewayError::rejected("invalid credentials"))
        }
    }
}
