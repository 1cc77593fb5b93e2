//! Paged alert lookups for a single product.
//!
//! Alerts are always fetched live; nothing here touches the snapshot cache.

use std::num::NonZeroUsize;
use std::sync::Arc;

use mockable::Clock;
use pagination::PageDescriptor;
use tracing::{debug, info, warn};

use crate::domain::ports::{AlertSource, TokenProvider};
use crate::domain::{AlertPage, AlertQuery, DateRange, DomainError, EntityId};

/// Service answering alert queries with the current session token.
pub struct ProductAlertsService {
    source: Arc<dyn AlertSource>,
    tokens: Arc<dyn TokenProvider>,
    clock: Arc<dyn Clock>,
    page_size: NonZeroUsize,
}

impl ProductAlertsService {
    /// Build the service; `page_size` seeds [`Self::default_query`].
    pub fn new(
        source: Arc<dyn AlertSource>,
        tokens: Arc<dyn TokenProvider>,
        clock: Arc<dyn Clock>,
        page_size: NonZeroUsize,
    ) -> Self {
        Self {
            source,
            tokens,
            clock,
            page_size,
        }
    }

    /// First page of alerts raised between yesterday and today, in the
    /// local calendar.
    #[must_use]
    pub fn default_query(&self, product_id: EntityId) -> AlertQuery {
        let today = self.clock.local().date_naive();
        AlertQuery {
            product_id,
            page: PageDescriptor::first(self.page_size),
            range: DateRange::trailing_day(today),
        }
    }

    /// Fetch one page of alerts.
    ///
    /// # Errors
    ///
    /// - [`crate::domain::ErrorCode::SessionExpired`] with no stored token.
    /// - [`crate::domain::ErrorCode::FetchFailure`] when the source fails.
    /// - [`crate::domain::ErrorCode::SessionEnded`] when the token changed
    ///   while the request was in flight.
    pub async fn fetch(&self, query: &AlertQuery) -> Result<AlertPage, DomainError> {
        let token = self
            .tokens
            .bearer_token()
            .ok_or_else(|| DomainError::session_expired("sign in to view alerts"))?;
        debug!(
            product_id = %query.product_id,
            page_index = query.page.index(),
            page_size = query.page.size(),
            "fetching product alerts"
        );

        let page = self
            .source
            .fetch_alerts(&token, query)
            .await
            .map_err(|err| {
                warn!(product_id = %query.product_id, error = %err, "alert fetch failed");
                DomainError::fetch_failure("failed to fetch product alerts")
            })?;

        if self.tokens.bearer_token().as_ref() != Some(&token) {
            info!(product_id = %query.product_id, "alert page discarded after the session changed");
            return Err(DomainError::session_ended(
                "session ended while alerts were loading",
            ));
        }
        Ok(page)
    }
}
