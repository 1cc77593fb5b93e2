//! Reqwest-backed product list and alert source adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::CatalogueEndpoints;
use super::mapping::{map_status_error, map_transport_error};
use crate::domain::ports::{AlertSource, CollectionSource, RemoteSourceError};
use crate::domain::{AlertPage, AlertQuery, BearerToken, Product};

/// Data source for the product list and its alert sub-resource.
pub struct HttpCatalogueSource {
    client: Client,
    endpoints: CatalogueEndpoints,
}

impl HttpCatalogueSource {
    /// Build an adapter using a reqwest client with an explicit request
    /// timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoints: CatalogueEndpoints, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoints })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        token: &BearerToken,
        what: &str,
    ) -> Result<T, RemoteSourceError> {
        let response = request
            .header(reqwest::header::AUTHORIZATION, token.authorization_value())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|error| map_transport_error(&error))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| map_transport_error(&error))?;
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }
        debug!(status = status.as_u16(), bytes = body.len(), what, "response received");
        decode(&body, what)
    }
}

#[async_trait]
impl CollectionSource<Product> for HttpCatalogueSource {
    async fn fetch_all(&self, token: &BearerToken) -> Result<Vec<Product>, RemoteSourceError> {
        let request = self.client.get(self.endpoints.product_list.clone());
        self.get_json(request, token, "product list").await
    }
}

#[async_trait]
impl AlertSource for HttpCatalogueSource {
    async fn fetch_alerts(
        &self,
        token: &BearerToken,
        query: &AlertQuery,
    ) -> Result<AlertPage, RemoteSourceError> {
        let request = self
            .client
            .get(self.endpoints.product_alerts.clone())
            .query(&query.query_pairs());
        self.get_json(request, token, "product alerts").await
    }
}

fn decode<T: DeserializeOwned>(body: &[u8], what: &str) -> Result<T, RemoteSourceError> {
    serde_json::from_slice(body)
        .map_err(|error| RemoteSourceError::decode(format!("invalid {what} JSON payload: {error}")))
}
