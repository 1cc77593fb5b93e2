//! Catalogue product records and their validated create/update payloads.

use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId};

/// Validation failures for product fields.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductValidationError {
    /// Product name was blank once trimmed.
    #[error("product name must not be empty")]
    EmptyName,
    /// URL was blank.
    #[error("product url must not be empty")]
    EmptyUrl,
    /// URL does not start with `http://` or `https://` followed by content.
    #[error("product url must start with http:// or https://")]
    UnsupportedUrl,
}

/// Catalogue product as held in the collection snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Identity within the catalogue.
    pub id: EntityId,
    /// Display name.
    pub product_name: String,
    /// Product landing page.
    pub url: String,
}

/// Validated fields for a new product.
///
/// # Examples
/// ```
/// use catalogue_client::domain::ProductDraft;
///
/// let draft = ProductDraft::try_new(" Widget ", "https://example.com/widget").unwrap();
/// assert_eq!(draft.product_name(), "Widget");
/// assert!(ProductDraft::try_new("Widget", "ftp://example.com").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    product_name: String,
    url: String,
}

impl ProductDraft {
    /// Validate a name and URL pair.
    ///
    /// # Errors
    ///
    /// Returns [`ProductValidationError`] when either field is unusable.
    pub fn try_new(product_name: &str, url: &str) -> Result<Self, ProductValidationError> {
        Ok(Self {
            product_name: validate_name(product_name)?,
            url: validate_url(url)?,
        })
    }

    /// Trimmed product name.
    #[must_use]
    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    /// Validated URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Partial update for an existing product; absent fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    product_name: Option<String>,
    url: Option<String>,
}

impl ProductPatch {
    /// Patch that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the product name.
    ///
    /// # Errors
    ///
    /// Returns [`ProductValidationError::EmptyName`] for a blank name.
    pub fn with_product_name(mut self, product_name: &str) -> Result<Self, ProductValidationError> {
        self.product_name = Some(validate_name(product_name)?);
        Ok(self)
    }

    /// Replace the URL.
    ///
    /// # Errors
    ///
    /// Returns [`ProductValidationError`] when the URL is blank or not HTTP(S).
    pub fn with_url(mut self, url: &str) -> Result<Self, ProductValidationError> {
        self.url = Some(validate_url(url)?);
        Ok(self)
    }

    /// Whether applying the patch would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.product_name.is_none() && self.url.is_none()
    }
}

impl Entity for Product {
    type Draft = ProductDraft;
    type Patch = ProductPatch;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn from_draft(id: EntityId, draft: ProductDraft) -> Self {
        Self {
            id,
            product_name: draft.product_name,
            url: draft.url,
        }
    }

    fn apply_patch(&mut self, patch: ProductPatch) {
        if let Some(product_name) = patch.product_name {
            self.product_name = product_name;
        }
        if let Some(url) = patch.url {
            self.url = url;
        }
    }
}

fn validate_name(raw: &str) -> Result<String, ProductValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ProductValidationError::EmptyName);
    }
    Ok(trimmed.to_owned())
}

fn validate_url(raw: &str) -> Result<String, ProductValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ProductValidationError::EmptyUrl);
    }
    let rest = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .ok_or(ProductValidationError::UnsupportedUrl)?;
    if rest.is_empty() {
        return Err(ProductValidationError::UnsupportedUrl);
    }
    Ok(trimmed.to_owned())
}
