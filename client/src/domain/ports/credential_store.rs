//! Driven port for the persisted credential slots.
//!
//! The store reads and writes the `auth_token` / `auth_token_expiry` pair as
//! one record so readers can never observe a half-written credential. Calls
//! are synchronous; they never wait on remote collaborators.

use std::sync::RwLock;

use super::define_port_error;
use crate::domain::CredentialSlots;

define_port_error! {
    /// Errors surfaced by credential store adapters.
    pub enum CredentialStoreError {
        /// The backing medium could not be read or written.
        Io { message: String } => "credential store io failed: {message}",
        /// The stored record could not be decoded.
        Corrupt { message: String } => "credential store record corrupt: {message}",
    }
}

/// Durable pair of credential slots.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialStore: Send + Sync {
    /// Read both slots.
    fn load(&self) -> Result<CredentialSlots, CredentialStoreError>;

    /// Replace both slots in one committed write.
    fn save(&self, slots: &CredentialSlots) -> Result<(), CredentialStoreError>;

    /// Remove both slots.
    fn clear(&self) -> Result<(), CredentialStoreError>;
}

/// Process-local credential store.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    slots: RwLock<CredentialSlots>,
}

impl InMemoryCredentialStore {
    /// Store pre-populated with `slots`.
    #[must_use]
    pub const fn with_slots(slots: CredentialSlots) -> Self {
        Self {
            slots: RwLock::new(slots),
        }
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn load(&self) -> Result<CredentialSlots, CredentialStoreError> {
        self.slots
            .read()
            .map(|slots| slots.clone())
            .map_err(|_| CredentialStoreError::io("credential slots lock poisoned"))
    }

    fn save(&self, slots: &CredentialSlots) -> Result<(), CredentialStoreError> {
        let mut guard = self
            .slots
            .write()
            .map_err(|_| CredentialStoreError::io("credential slots lock poisoned"))?;
        *guard = slots.clone();
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialStoreError> {
        self.save(&CredentialSlots::default())
    }
}
