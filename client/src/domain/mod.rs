//! Domain primitives, services, and ports.
//!
//! Purpose: keep session lifecycle, cache policy, and access decisions free
//! of transport and storage detail. Adapters under `crate::outbound` plug in
//! through the traits in [`ports`].
//!
//! Public surface:
//! - `DomainError` / `ErrorCode`: the single error type returned by services.
//! - `SessionManager`: login, logout, validity, and auto-expiry.
//! - `AccessGuard`: allow-or-redirect decision for protected views.
//! - `CachedRepository`: cache-first list and optimistic local writes.
//! - `ProductAlertsService`: paged alert lookups.

pub mod alerts;
pub mod auth;
pub mod catalogue;
pub mod entity;
pub mod error;
pub mod guard;
pub mod ports;
pub mod product;
pub mod product_alerts;
pub mod session;

pub use self::alerts::{
    ALERT_DATE_FORMAT, Alert, AlertPage, AlertQuery, DateRange, DateRangeError, format_date,
};
pub use self::auth::{
    BearerToken, Credential, CredentialSlots, LoginCredentials, LoginValidationError,
    StoredCredential, parse_timestamp,
};
pub use self::catalogue::{CachedRepository, MutationOutcome};
pub use self::entity::{Entity, EntityId, EntityIdValidationError};
pub use self::error::{DomainError, DomainErrorValidationError, ErrorCode};
pub use self::guard::{AccessGuard, GuardDecision, SessionControl};
pub use self::product::{Product, ProductDraft, ProductPatch, ProductValidationError};
pub use self::product_alerts::ProductAlertsService;
pub use self::session::{
    LogoutReason, SessionManager, SessionPolicy, SessionPorts, SessionRuntime,
};

/// Repository over the product catalogue.
pub type ProductRepository = CachedRepository<Product>;
