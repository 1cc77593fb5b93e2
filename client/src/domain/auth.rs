//! Authentication primitives: login credentials, bearer tokens, and the
//! persisted credential pair.
//!
//! Keep input parsing outside the session manager by exposing constructors
//! that validate string inputs before anything talks to a port.

use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Password was blank.
    #[error("password must not be empty")]
    EmptyPassword,
}

/// Validated login credentials sent to the auth gateway.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use catalogue_client::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" user ", "pass").unwrap();
/// assert_eq!(creds.username(), "user");
/// assert_eq!(creds.password(), "pass");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    ///
    /// # Errors
    ///
    /// Returns [`LoginValidationError`] when either field is blank.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username sent to the auth gateway.
    #[must_use]
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Opaque session token used to build `Authorization: Bearer` headers.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wrap a raw token, rejecting blank values.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    /// Borrow the raw token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Header value for `Authorization`.
    #[must_use]
    pub fn authorization_value(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

impl AsRef<str> for BearerToken {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

/// Token and expiry issued by a successful login.
///
/// Both halves always exist together; a token without an expiry cannot be
/// represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    token: BearerToken,
    expires_at: DateTime<Utc>,
}

impl Credential {
    /// Pair a token with its expiry instant.
    #[must_use]
    pub const fn new(token: BearerToken, expires_at: DateTime<Utc>) -> Self {
        Self { token, expires_at }
    }

    /// Session token.
    #[must_use]
    pub const fn token(&self) -> &BearerToken {
        &self.token
    }

    /// Instant after which the token is no longer valid.
    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Whether the credential is still valid at `now`.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }

    /// Persisted slot representation of this credential.
    #[must_use]
    pub fn to_slots(&self) -> CredentialSlots {
        CredentialSlots {
            auth_token: Some(self.token.as_str().to_owned()),
            auth_token_expiry: Some(self.expires_at.to_rfc3339()),
        }
    }
}

/// Raw contents of the two persisted credential slots.
///
/// Slots are written together, but what is read back may still be partial
/// or malformed (hand-edited files, older formats), so each slot is optional
/// here and interpreted through [`CredentialSlots::interpret`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialSlots {
    /// Raw `auth_token` slot.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    /// Raw `auth_token_expiry` slot in RFC 3339 form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token_expiry: Option<String>,
}

/// Interpretation of persisted credential slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoredCredential {
    /// No token is stored.
    Absent,
    /// A token is stored but its expiry is missing or unreadable.
    Unbounded(BearerToken),
    /// A complete credential.
    Present(Credential),
}

impl CredentialSlots {
    /// Whether both slots are empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.auth_token.is_none() && self.auth_token_expiry.is_none()
    }

    /// Decode the raw slots into a [`StoredCredential`].
    #[must_use]
    pub fn interpret(&self) -> StoredCredential {
        let Some(token) = self.auth_token.clone().and_then(BearerToken::new) else {
            return StoredCredential::Absent;
        };
        let expiry = self
            .auth_token_expiry
            .as_deref()
            .and_then(parse_timestamp);
        match expiry {
            Some(expires_at) => StoredCredential::Present(Credential::new(token, expires_at)),
            None => StoredCredential::Unbounded(token),
        }
    }
}

impl StoredCredential {
    /// Stored token regardless of expiry.
    #[must_use]
    pub const fn token(&self) -> Option<&BearerToken> {
        match self {
            Self::Absent => None,
            Self::Unbounded(token) => Some(token),
            Self::Present(credential) => Some(credential.token()),
        }
    }

    /// Whether a complete, unexpired credential is stored.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        matches!(self, Self::Present(credential) if credential.is_valid_at(now))
    }
}

const OFFSETLESS_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parse an ISO-8601 timestamp.
///
/// RFC 3339 values keep their offset. A value without an offset, such as
/// `2026-03-01T13:00:00`, is read in the local time zone; during a DST
/// overlap the earlier instant is taken.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    DateTime::parse_from_rfc3339(trimmed)
        .map(|parsed| parsed.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, OFFSETLESS_TIMESTAMP_FORMAT)
                .ok()
                .and_then(|naive| Local.from_local_datetime(&naive).earliest())
                .map(|local| local.with_timezone(&Utc))
        })
}

#[cfg(test)]
mod tests {
    //! Credential validation and slot interpretation.
    use super::*;
    use chrono::{Duration, TimeZone};
    use rstest::{fixture, rstest};

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
            .single()
            .expect("valid time")
    }

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn debug_output_redacts_password() {
        let creds = LoginCredentials::try_from_parts("user", "hunter2").expect("valid");
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("user"));
    }

    #[rstest]
    fn blank_token_is_rejected() {
        assert!(BearerToken::new("  ").is_none());
    }

    #[rstest]
    fn authorization_value_uses_bearer_scheme() {
        let token = BearerToken::new("abc123").expect("token");
        assert_eq!(token.authorization_value(), "Bearer abc123");
    }

    #[rstest]
    fn credential_round_trips_through_slots(now: DateTime<Utc>) {
        let token = BearerToken::new("abc123").expect("token");
        let credential = Credential::new(token, now + Duration::hours(1));
        let slots = credential.to_slots();
        assert_eq!(slots.interpret(), StoredCredential::Present(credential));
    }

    #[rstest]
    #[case(CredentialSlots::default())]
    #[case(CredentialSlots { auth_token: None, auth_token_expiry: Some("2026-03-01T13:00:00Z".to_owned()) })]
    #[case(CredentialSlots { auth_token: Some(" ".to_owned()), auth_token_expiry: None })]
    fn missing_token_is_absent(#[case] slots: CredentialSlots) {
        assert_eq!(slots.interpret(), StoredCredential::Absent);
    }

    #[rstest]
    #[case(None)]
    #[case(Some("not a timestamp"))]
    fn token_without_readable_expiry_is_unbounded(
        #[case] expiry: Option<&str>,
        now: DateTime<Utc>,
    ) {
        let slots = CredentialSlots {
            auth_token: Some("abc123".to_owned()),
            auth_token_expiry: expiry.map(str::to_owned),
        };
        let stored = slots.interpret();
        assert!(matches!(stored, StoredCredential::Unbounded(_)));
        assert!(!stored.is_valid_at(now), "unbounded tokens count as expired");
        assert_eq!(stored.token().map(BearerToken::as_str), Some("abc123"));
    }

    #[rstest]
    #[case("2026-03-01T13:00:00Z", Utc.with_ymd_and_hms(2026, 3, 1, 13, 0, 0).single())]
    #[case("2026-03-01T14:00:00+01:00", Utc.with_ymd_and_hms(2026, 3, 1, 13, 0, 0).single())]
    #[case(" 2026-03-01T13:00:00Z ", Utc.with_ymd_and_hms(2026, 3, 1, 13, 0, 0).single())]
    #[case("2026-03-01", None)]
    #[case("tomorrow", None)]
    fn offset_timestamps_parse_to_the_same_instant(
        #[case] raw: &str,
        #[case] expected: Option<DateTime<Utc>>,
    ) {
        assert_eq!(parse_timestamp(raw), expected);
    }

    #[rstest]
    #[case("2026-03-01T13:00:00", 0)]
    #[case("2026-03-01T13:00:00.250", 250)]
    fn offsetless_timestamps_are_local_time(#[case] raw: &str, #[case] millis: i64) {
        let expected = Local
            .with_ymd_and_hms(2026, 3, 1, 13, 0, 0)
            .single()
            .expect("unambiguous local time")
            .with_timezone(&Utc)
            + Duration::milliseconds(millis);
        assert_eq!(parse_timestamp(raw), Some(expected));
    }

    #[rstest]
    fn offsetless_stored_expiry_is_a_complete_credential() {
        let slots = CredentialSlots {
            auth_token: Some("abc123".to_owned()),
            auth_token_expiry: Some("2099-03-01T13:00:00".to_owned()),
        };
        assert!(matches!(slots.interpret(), StoredCredential::Present(_)));
    }

    #[rstest]
    #[case(Duration::seconds(-1), false)]
    #[case(Duration::zero(), false)]
    #[case(Duration::seconds(1), true)]
    fn validity_requires_expiry_strictly_after_now(
        #[case] offset: Duration,
        #[case] expected: bool,
        now: DateTime<Utc>,
    ) {
        let token = BearerToken::new("abc123").expect("token");
        let credential = Credential::new(token, now + offset);
        assert_eq!(credential.is_valid_at(now), expected);
    }
}
