//! Product alert rows and the paged, date-bounded query that selects them.

use chrono::{Days, NaiveDate};
use pagination::PageDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::entity::EntityId;

/// Calendar date format used on the wire.
pub const ALERT_DATE_FORMAT: &str = "%Y-%m-%d";

/// One alert row reported for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Alert label.
    pub alert_name: String,
    /// Reported value; the service does not fix its type.
    #[serde(default)]
    pub alert_value: Value,
    /// Date the alert was raised, as reported.
    pub alert_date: String,
}

/// One page of alerts plus the total row count across all pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlertPage {
    /// Rows on the requested page.
    #[serde(default)]
    pub data: Vec<Alert>,
    /// Total rows matching the query.
    #[serde(default)]
    pub total: u64,
}

/// Validation failures for date windows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateRangeError {
    /// Start date falls after the end date.
    #[error("start date {start} is after end date {end}")]
    Inverted {
        /// Requested start.
        start: NaiveDate,
        /// Requested end.
        end: NaiveDate,
    },
    /// Input was not a `YYYY-MM-DD` date.
    #[error("invalid date '{value}': expected YYYY-MM-DD")]
    Unparseable {
        /// Raw input.
        value: String,
    },
}

/// Inclusive calendar-date window.
///
/// ## Invariants
/// - `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Build a window, rejecting inverted bounds.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError::Inverted`] when `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::Inverted { start, end });
        }
        Ok(Self { start, end })
    }

    /// Yesterday through `today`.
    #[must_use]
    pub fn trailing_day(today: NaiveDate) -> Self {
        let start = today.checked_sub_days(Days::new(1)).unwrap_or(today);
        Self { start, end: today }
    }

    /// Parse a date in `YYYY-MM-DD` form.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError::Unparseable`] for any other shape.
    pub fn parse_date(raw: &str) -> Result<NaiveDate, DateRangeError> {
        NaiveDate::parse_from_str(raw.trim(), ALERT_DATE_FORMAT).map_err(|_| {
            DateRangeError::Unparseable {
                value: raw.to_owned(),
            }
        })
    }

    /// First day of the window.
    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the window.
    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }
}

/// Paged alert query for one product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertQuery {
    /// Product whose alerts are requested.
    pub product_id: EntityId,
    /// Requested page.
    pub page: PageDescriptor,
    /// Date window.
    pub range: DateRange,
}

impl AlertQuery {
    /// Query parameters in wire order: `productId`, `pageIndex`, `pageSize`,
    /// `startDate`, `endDate`.
    ///
    /// ```
    /// use catalogue_client::domain::{AlertQuery, DateRange, EntityId};
    /// use pagination::PageDescriptor;
    ///
    /// let query = AlertQuery {
    ///     product_id: EntityId::new("7").unwrap(),
    ///     page: PageDescriptor::new(1, 5).unwrap(),
    ///     range: DateRange::new(
    ///         DateRange::parse_date("2026-03-01").unwrap(),
    ///         DateRange::parse_date("2026-03-02").unwrap(),
    ///     )
    ///     .unwrap(),
    /// };
    /// let pairs = query.query_pairs();
    /// assert_eq!(pairs[3], ("startDate", "2026-03-01".to_owned()));
    /// ```
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("productId", self.product_id.to_string()),
            ("pageIndex", self.page.index().to_string()),
            ("pageSize", self.page.size().to_string()),
            ("startDate", format_date(self.range.start())),
            ("endDate", format_date(self.range.end())),
        ]
    }
}

/// Zero-padded `YYYY-MM-DD` rendering of a calendar date.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(ALERT_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for date windows and query encoding.
    use super::*;
    use rstest::rstest;

    fn date(raw: &str) -> NaiveDate {
        DateRange::parse_date(raw).expect("valid date")
    }

    #[rstest]
    fn trailing_day_spans_yesterday_to_today() {
        let range = DateRange::trailing_day(date("2026-03-01"));
        assert_eq!(range.start(), date("2026-02-28"));
        assert_eq!(range.end(), date("2026-03-01"));
    }

    #[rstest]
    fn inverted_range_is_rejected() {
        let err = DateRange::new(date("2026-03-02"), date("2026-03-01")).expect_err("inverted");
        assert!(matches!(err, DateRangeError::Inverted { .. }));
    }

    #[rstest]
    #[case("2026-13-01")]
    #[case("01/03/2026")]
    #[case("")]
    fn non_iso_dates_are_rejected(#[case] raw: &str) {
        assert!(DateRange::parse_date(raw).is_err());
    }

    #[rstest]
    fn dates_are_zero_padded() {
        let day = NaiveDate::from_ymd_opt(2026, 1, 5).expect("valid date");
        assert_eq!(format_date(day), "2026-01-05");
    }

    #[rstest]
    fn query_pairs_carry_every_parameter() {
        let query = AlertQuery {
            product_id: EntityId::new("p-1").expect("valid id"),
            page: PageDescriptor::new(2, 5).expect("valid page"),
            range: DateRange::new(date("2026-02-28"), date("2026-03-01")).expect("valid range"),
        };
        assert_eq!(
            query.query_pairs(),
            vec![
                ("productId", "p-1".to_owned()),
                ("pageIndex", "2".to_owned()),
                ("pageSize", "5".to_owned()),
                ("startDate", "2026-02-28".to_owned()),
                ("endDate", "2026-03-01".to_owned()),
            ]
        );
    }

    #[rstest]
    fn alert_page_tolerates_missing_fields() {
        let page: AlertPage = serde_json::from_str("{}").expect("decode empty page");
        assert!(page.data.is_empty());
        assert_eq!(page.total, 0);
    }
}
