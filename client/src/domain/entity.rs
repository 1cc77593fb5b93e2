//! Entity identity and the contract the cached repository relies on.
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier of a record within a collection snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    /// Construct an id after validating that it is non-empty and trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`EntityIdValidationError`] for blank or padded input.
    pub fn new(value: impl Into<String>) -> Result<Self, EntityIdValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(EntityIdValidationError::Empty);
        }
        if raw.trim() != raw {
            return Err(EntityIdValidationError::ContainsWhitespace);
        }
        Ok(Self(raw))
    }

    /// Fresh random 128-bit identifier for locally created records.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Borrow the underlying id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<String> for EntityId {
    type Error = EntityIdValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntityId> for String {
    fn from(value: EntityId) -> Self {
        value.0
    }
}

/// Validation errors returned when constructing [`EntityId`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityIdValidationError {
    /// Id is empty after trimming whitespace.
    #[error("entity id must not be empty")]
    Empty,
    /// Id contains leading or trailing whitespace.
    #[error("entity id must not contain surrounding whitespace")]
    ContainsWhitespace,
}

/// A record the cached repository can hold in a snapshot.
///
/// Identity is the [`EntityId`]; every other field is mutable through
/// [`Entity::apply_patch`].
pub trait Entity: Clone + Send + Sync + 'static {
    /// Validated payload used to create a record.
    type Draft: Send;
    /// Validated partial update merged into an existing record.
    type Patch: Send;

    /// Identity of the record.
    fn id(&self) -> &EntityId;

    /// Build a new record from a draft and a freshly assigned id.
    fn from_draft(id: EntityId, draft: Self::Draft) -> Self;

    /// Merge the patch into this record, leaving absent fields untouched.
    fn apply_patch(&mut self, patch: Self::Patch);
}
