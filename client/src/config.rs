//! Client configuration loaded via OrthoConfig.
//!
//! Every field is optional; accessors apply the defaults so an empty
//! environment still yields a usable client.

use std::num::NonZeroUsize;
use std::time::Duration;

use camino::Utf8PathBuf;
use chrono::TimeDelta;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

/// Default API root of the catalogue service.
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/";
const DEFAULT_STATE_DIR: &str = ".catalogue";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_TOKEN_TTL_SECS: u64 = 3600;

/// Errors raised while interpreting configured values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// `api_base_url` is not an absolute URL.
    #[error("invalid api_base_url '{value}': {message}")]
    InvalidBaseUrl {
        /// Configured value.
        value: String,
        /// Parser diagnostic.
        message: String,
    },
    /// A numeric setting must be positive.
    #[error("{field} must be greater than zero")]
    NonPositive {
        /// Offending setting.
        field: &'static str,
    },
}

/// Configuration values for the catalogue client.
#[derive(Debug, Clone, Default, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CATALOGUE")]
pub struct ClientSettings {
    /// API root, e.g. `https://shop.example/api/`.
    pub api_base_url: Option<String>,
    /// Directory holding `credential.json` and `products.json`.
    pub state_dir: Option<String>,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Session lifetime when the auth service omits an expiry.
    pub token_ttl_secs: Option<u64>,
    /// Rows per page in list views.
    pub page_size: Option<usize>,
}

impl ClientSettings {
    /// Configured API root, falling back to [`DEFAULT_API_BASE_URL`].
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::InvalidBaseUrl`] when the value does not
    /// parse.
    pub fn api_base_url(&self) -> Result<Url, SettingsError> {
        let raw = self
            .api_base_url
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE_URL);
        Url::parse(raw).map_err(|err| SettingsError::InvalidBaseUrl {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Configured state directory, falling back to `.catalogue`.
    #[must_use]
    pub fn state_dir(&self) -> Utf8PathBuf {
        Utf8PathBuf::from(self.state_dir.as_deref().unwrap_or(DEFAULT_STATE_DIR))
    }

    /// Configured request timeout, falling back to 30 seconds.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NonPositive`] for a zero timeout.
    pub fn request_timeout(&self) -> Result<Duration, SettingsError> {
        match self.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS) {
            0 => Err(SettingsError::NonPositive {
                field: "request_timeout_secs",
            }),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    /// Configured default session lifetime, falling back to one hour.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NonPositive`] for a zero lifetime.
    pub fn token_ttl(&self) -> Result<TimeDelta, SettingsError> {
        let secs = self.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        let non_positive = SettingsError::NonPositive {
            field: "token_ttl_secs",
        };
        if secs == 0 {
            return Err(non_positive);
        }
        i64::try_from(secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .ok_or(non_positive)
    }

    /// Configured page size, falling back to five rows.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NonPositive`] for a zero page size.
    pub fn page_size(&self) -> Result<NonZeroUsize, SettingsError> {
        let size = self.page_size.unwrap_or(pagination::DEFAULT_PAGE_SIZE);
        NonZeroUsize::new(size).ok_or(SettingsError::NonPositive { field: "page_size" })
    }
}
