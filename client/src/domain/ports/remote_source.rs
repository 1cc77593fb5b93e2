//! Driven ports for the remote catalogue data collaborator.
//!
//! Both the collection list and the per-product alert query share one error
//! vocabulary so the HTTP adapter can map statuses in a single place.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{AlertPage, AlertQuery, BearerToken};

define_port_error! {
    /// Errors surfaced while calling the remote data collaborator.
    pub enum RemoteSourceError {
        /// The collaborator refused the bearer token.
        Unauthorized { message: String } => "remote source rejected token: {message}",
        /// Network transport failed before receiving a response.
        Transport { message: String } => "remote source transport failed: {message}",
        /// The call exceeded its timeout.
        Timeout { message: String } => "remote source timeout: {message}",
        /// The response could not be decoded.
        Decode { message: String } => "remote source decode failed: {message}",
        /// The collaborator rejected the request itself.
        InvalidRequest { message: String } => "remote source rejected request: {message}",
    }
}

/// Port for fetching a whole collection of `E`.
#[async_trait]
pub trait CollectionSource<E>: Send + Sync {
    /// Fetch the authoritative, ordered collection.
    async fn fetch_all(&self, token: &BearerToken) -> Result<Vec<E>, RemoteSourceError>;
}

/// Port for the paged alert sub-resource of a product.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertSource: Send + Sync {
    /// Fetch one page of alerts.
    async fn fetch_alerts(
        &self,
        token: &BearerToken,
        query: &AlertQuery,
    ) -> Result<AlertPage, RemoteSourceError>;
}
