//! Composition root: builds the production client from settings.

use std::num::NonZeroUsize;
use std::sync::Arc;

use mockable::DefaultClock;
use thiserror::Error;

use crate::config::{ClientSettings, SettingsError};
use crate::domain::ports::{CollectionSource, Navigator, TokenProvider};
use crate::domain::{
    AccessGuard, Product, ProductAlertsService, ProductRepository, SessionControl, SessionManager,
    SessionPolicy, SessionPorts, SessionRuntime,
};
use crate::outbound::http::{CatalogueEndpoints, HttpAuthGateway, HttpCatalogueSource};
use crate::outbound::storage::{
    CREDENTIAL_FILE, FileCredentialStore, FileSnapshotStore, PRODUCTS_FILE, StateDir,
};
use crate::outbound::timer::TokioTimerSource;

/// Failures while assembling the client.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A configured value was unusable.
    #[error(transparent)]
    Settings(#[from] SettingsError),
    /// An endpoint could not be derived from the base URL.
    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
    /// The state directory could not be opened.
    #[error("failed to open state directory '{path}': {source}")]
    StateDir {
        /// Directory that failed to open.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Fully wired client: session, guard, product repository, and alerts.
pub struct CatalogueClient {
    /// Session lifecycle owner.
    pub session: SessionManager,
    /// Guard for protected views.
    pub guard: AccessGuard,
    /// Cache-first product repository.
    pub products: ProductRepository,
    /// Paged alert lookups.
    pub alerts: ProductAlertsService,
    /// Rows per page in list views.
    pub page_size: NonZeroUsize,
}

impl CatalogueClient {
    /// Build the production client from `settings`.
    ///
    /// Must be called inside a Tokio runtime; the auto-expiry timer spawns
    /// onto it.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] when a setting is unusable, the state
    /// directory cannot be opened, or the HTTP client cannot be built.
    pub fn from_settings(
        settings: &ClientSettings,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, BuildError> {
        let endpoints = CatalogueEndpoints::from_base(&settings.api_base_url()?)?;
        let timeout = settings.request_timeout()?;
        let state_path = settings.state_dir();
        let state = StateDir::open_or_create(&state_path).map_err(|source| BuildError::StateDir {
            path: state_path.to_string(),
            source,
        })?;

        let session = SessionManager::new(
            SessionPorts::new(
                Arc::new(HttpAuthGateway::new(endpoints.auth.clone(), timeout)?),
                Arc::new(FileCredentialStore::new(state.clone(), CREDENTIAL_FILE)),
                navigator,
            ),
            SessionRuntime {
                clock: Arc::new(DefaultClock),
                timer: Arc::new(TokioTimerSource::current()),
            },
            SessionPolicy {
                default_ttl: settings.token_ttl()?,
            },
        );

        let source = Arc::new(HttpCatalogueSource::new(endpoints, timeout)?);
        let tokens: Arc<dyn TokenProvider> = Arc::new(session.clone());
        let page_size = settings.page_size()?;
        let products = ProductRepository::new(
            "products",
            Arc::new(FileSnapshotStore::new(state, PRODUCTS_FILE)),
            Arc::clone(&source) as Arc<dyn CollectionSource<Product>>,
            Arc::clone(&tokens),
        );
        let alerts =
            ProductAlertsService::new(source, tokens, Arc::new(DefaultClock), page_size);
        let guard = AccessGuard::new(Arc::new(session.clone()) as Arc<dyn SessionControl>);

        Ok(Self {
            session,
            guard,
            products,
            alerts,
            page_size,
        })
    }
}
