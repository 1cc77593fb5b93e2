//! Credential slots persisted as one JSON record.

use tracing::debug;

use super::StateDir;
use super::atomic_io::{read_if_present, remove_if_present, write_atomic};
use crate::domain::CredentialSlots;
use crate::domain::ports::{CredentialStore, CredentialStoreError};

/// Credential store writing `auth_token` and `auth_token_expiry` together.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    state: StateDir,
    file_name: String,
}

impl FileCredentialStore {
    /// Store backed by `file_name` inside `state`.
    pub fn new(state: StateDir, file_name: impl Into<String>) -> Self {
        Self {
            state,
            file_name: file_name.into(),
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<CredentialSlots, CredentialStoreError> {
        let Some(bytes) = read_if_present(self.state.dir(), &self.file_name)
            .map_err(|err| CredentialStoreError::io(err.to_string()))?
        else {
            return Ok(CredentialSlots::default());
        };
        serde_json::from_slice(&bytes).map_err(|err| {
            CredentialStoreError::corrupt(format!("{}: {err}", self.file_name))
        })
    }

    fn save(&self, slots: &CredentialSlots) -> Result<(), CredentialStoreError> {
        let bytes = serde_json::to_vec_pretty(slots)
            .map_err(|err| CredentialStoreError::io(err.to_string()))?;
        write_atomic(self.state.dir(), &self.file_name, &bytes)
            .map_err(|err| CredentialStoreError::io(err.to_string()))?;
        debug!(file = %self.file_name, "credential slots written");
        Ok(())
    }

    fn clear(&self) -> Result<(), CredentialStoreError> {
        remove_if_present(self.state.dir(), &self.file_name)
            .map_err(|err| CredentialStoreError::io(err.to_string()))
    }
}
