//! Reqwest-backed adapters for the catalogue HTTP service.
//!
//! These adapters own transport details only: request serialisation, bearer
//! headers, timeout and status mapping, and JSON decoding.

mod auth_gateway;
mod catalogue_source;
mod dto;
mod mapping;

pub use auth_gateway::HttpAuthGateway;
pub use catalogue_source::HttpCatalogueSource;

use url::Url;

/// Resolved endpoints under one API base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogueEndpoints {
    /// `POST` target for logins.
    pub auth: Url,
    /// `GET` target for the full product list.
    pub product_list: Url,
    /// `GET` target for paged product alerts.
    pub product_alerts: Url,
}

impl CatalogueEndpoints {
    /// Resolve every endpoint against `base`.
    ///
    /// A base without a trailing slash is treated as a directory, so
    /// `https://host/api` and `https://host/api/` resolve identically.
    ///
    /// ```
    /// use catalogue_client::outbound::http::CatalogueEndpoints;
    /// use url::Url;
    ///
    /// let base = Url::parse("https://shop.example/api").unwrap();
    /// let endpoints = CatalogueEndpoints::from_base(&base).unwrap();
    /// assert_eq!(endpoints.product_list.as_str(), "https://shop.example/api/data/productList");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] when `base` cannot carry relative paths.
    pub fn from_base(base: &Url) -> Result<Self, url::ParseError> {
        let mut root = base.clone();
        if !root.path().ends_with('/') {
            let path = format!("{}/", root.path());
            root.set_path(&path);
        }
        Ok(Self {
            auth: root.join("auth")?,
            product_list: root.join("data/productList")?,
            product_alerts: root.join("data/productAlerts")?,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Endpoint resolution coverage.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("http://localhost:8080/api/")]
    #[case("http://localhost:8080/api")]
    fn endpoints_resolve_under_the_api_root(#[case] base: &str) {
        let base = Url::parse(base).expect("valid base");
        let endpoints = CatalogueEndpoints::from_base(&base).expect("endpoints");
        assert_eq!(endpoints.auth.as_str(), "http://localhost:8080/api/auth");
        assert_eq!(
            endpoints.product_alerts.as_str(),
            "http://localhost:8080/api/data/productAlerts"
        );
    }
}
