//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports are implemented by adapters under `crate::outbound` and by
//! the in-memory doubles defined alongside each trait.

mod macros;
pub(crate) use macros::define_port_error;

mod auth_gateway;
mod credential_store;
mod navigator;
mod remote_source;
mod snapshot_store;
mod timer;
mod token_provider;

#[cfg(test)]
pub use auth_gateway::MockAuthGateway;
pub use auth_gateway::{
    AuthGateway, AuthGatewayError, AuthGrant, FIXTURE_TOKEN, FixtureAuthGateway,
};
#[cfg(test)]
pub use credential_store::MockCredentialStore;
pub use credential_store::{CredentialStore, CredentialStoreError, InMemoryCredentialStore};
#[cfg(test)]
pub use navigator::MockNavigator;
pub use navigator::Navigator;
#[cfg(test)]
pub use remote_source::MockAlertSource;
pub use remote_source::{AlertSource, CollectionSource, RemoteSourceError};
pub use snapshot_store::{InMemorySnapshotStore, SnapshotStore, SnapshotStoreError};
pub use timer::{TimerHandle, TimerSource, TimerTask};
#[cfg(test)]
pub use token_provider::MockTokenProvider;
pub use token_provider::TokenProvider;
