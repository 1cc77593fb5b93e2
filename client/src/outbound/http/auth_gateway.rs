//! Reqwest-backed auth gateway adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

use super::dto::{LoginRequestDto, LoginResponseDto, LoginResponseProblem};
use super::mapping::status_message;
use crate::domain::LoginCredentials;
use crate::domain::ports::{AuthGateway, AuthGatewayError, AuthGrant};

/// Auth gateway that posts JSON credentials to one endpoint.
pub struct HttpAuthGateway {
    client: Client,
    endpoint: Url,
}

impl HttpAuthGateway {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn authenticate(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<AuthGrant, AuthGatewayError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .json(&LoginRequestDto::from(credentials))
            .send()
            .await
            .map_err(|error| map_transport_error(&error))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| map_transport_error(&error))?;
        if !status.is_success() {
            return Err(AuthGatewayError::rejected(status_message(status, &body)));
        }
        debug!(status = status.as_u16(), "auth response received");
        parse_grant(&body)
    }
}

fn parse_grant(body: &[u8]) -> Result<AuthGrant, AuthGatewayError> {
    let decoded: LoginResponseDto = serde_json::from_slice(body).map_err(|error| {
        AuthGatewayError::decode(format!("invalid login JSON payload: {error}"))
    })?;
    decoded.into_grant().map_err(|problem| match problem {
        LoginResponseProblem::Unsuccessful(message) => AuthGatewayError::rejected(
            message.unwrap_or_else(|| "service reported failure".to_owned()),
        ),
        LoginResponseProblem::MissingToken => {
            AuthGatewayError::decode("success response carried no token")
        }
        LoginResponseProblem::UnreadableExpiry(raw) => {
            AuthGatewayError::decode(format!("unreadable tokenExpiry '{raw}'"))
        }
    })
}

fn map_transport_error(error: &reqwest::Error) -> AuthGatewayError {
    if error.is_timeout() {
        AuthGatewayError::timeout(error.to_string())
    } else {
        AuthGatewayError::transport(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network login decoding.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn success_body_becomes_grant() {
        let grant = parse_grant(br#"{"success":true,"token":"abc123"}"#).expect("grant");
        assert_eq!(grant.token.as_str(), "abc123");
    }

    #[rstest]
    #[case(br#"{"success":false}"#.as_slice(), "Rejected")]
    #[case(br#"{"success":true}"#.as_slice(), "Decode")]
    #[case(b"<html>".as_slice(), "Decode")]
    fn unusable_bodies_map_to_port_errors(#[case] body: &[u8], #[case] expected: &str) {
        let error = parse_grant(body).expect_err("unusable body");
        match expected {
            "Rejected" => assert!(matches!(error, AuthGatewayError::Rejected { .. })),
            "Decode" => assert!(matches!(error, AuthGatewayError::Decode { .. })),
            _ => panic!("unsupported test expectation: {expected}"),
        }
    }
}
