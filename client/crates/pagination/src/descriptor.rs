//! Page descriptor value type and slice-range arithmetic.

use std::num::NonZeroUsize;
use std::ops::Range;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Page size used when a caller does not choose one.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Validation errors returned when constructing a [`PageDescriptor`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageDescriptorError {
    /// A page must hold at least one row.
    #[error("page size must be greater than zero")]
    ZeroSize,
}

/// Zero-based page index paired with a positive page size.
///
/// ## Invariants
/// - `size` is never zero.
///
/// The serialised form uses the remote query parameter names `pageIndex` and
/// `pageSize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PageDescriptorDto", into = "PageDescriptorDto")]
pub struct PageDescriptor {
    index: usize,
    size: NonZeroUsize,
}

impl PageDescriptor {
    /// Build a descriptor, rejecting a zero page size.
    ///
    /// # Errors
    ///
    /// Returns [`PageDescriptorError::ZeroSize`] when `size` is zero.
    pub fn new(index: usize, size: usize) -> Result<Self, PageDescriptorError> {
        let size = NonZeroUsize::new(size).ok_or(PageDescriptorError::ZeroSize)?;
        Ok(Self { index, size })
    }

    /// First page for the given non-zero size.
    #[must_use]
    pub const fn first(size: NonZeroUsize) -> Self {
        Self { index: 0, size }
    }

    /// Zero-based page index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of rows per page.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size.get()
    }

    /// Same page size, different index.
    #[must_use]
    pub const fn with_index(self, index: usize) -> Self {
        Self {
            index,
            size: self.size,
        }
    }

    /// Offset of the first row on this page.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.index.saturating_mul(self.size.get())
    }

    /// Row range selected by this page within a collection of `len` rows.
    ///
    /// The range is clamped to the collection and is empty when the page
    /// starts at or beyond `len`.
    ///
    /// ```
    /// use pagination::PageDescriptor;
    ///
    /// let page = PageDescriptor::new(2, 2).expect("valid descriptor");
    /// assert_eq!(page.range_within(5), 4..5);
    /// assert!(page.range_within(4).is_empty());
    /// ```
    #[must_use]
    pub fn range_within(&self, len: usize) -> Range<usize> {
        let start = self.offset().min(len);
        let end = start.saturating_add(self.size.get()).min(len);
        start..end
    }

    /// Index of the page holding the last row of a `len`-row collection.
    ///
    /// Returns zero for an empty collection.
    #[must_use]
    pub fn last_index_for(&self, len: usize) -> usize {
        len.saturating_sub(1)
            .checked_div(self.size.get())
            .unwrap_or_default()
    }

    /// Number of pages needed for `len` rows.
    #[must_use]
    pub fn page_count_for(&self, len: usize) -> usize {
        len.div_ceil(self.size.get())
    }
}

impl Default for PageDescriptor {
    fn default() -> Self {
        Self {
            index: 0,
            size: NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageDescriptorDto {
    page_index: usize,
    page_size: usize,
}

impl From<PageDescriptor> for PageDescriptorDto {
    fn from(value: PageDescriptor) -> Self {
        Self {
            page_index: value.index,
            page_size: value.size.get(),
        }
    }
}

impl TryFrom<PageDescriptorDto> for PageDescriptor {
    type Error = PageDescriptorError;

    fn try_from(value: PageDescriptorDto) -> Result<Self, Self::Error> {
        Self::new(value.page_index, value.page_size)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for descriptor arithmetic.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn zero_size_is_rejected() {
        let err = PageDescriptor::new(0, 0).expect_err("zero size rejected");
        assert_eq!(err, PageDescriptorError::ZeroSize);
    }

    #[rstest]
    #[case(0, 2, 5, 0..2)]
    #[case(1, 2, 5, 2..4)]
    #[case(2, 2, 5, 4..5)]
    #[case(3, 2, 5, 5..5)]
    #[case(0, 5, 0, 0..0)]
    #[case(usize::MAX, 3, 10, 10..10)]
    fn range_is_clamped_to_collection(
        #[case] index: usize,
        #[case] size: usize,
        #[case] len: usize,
        #[case] expected: Range<usize>,
    ) {
        let page = PageDescriptor::new(index, size).expect("valid descriptor");
        assert_eq!(page.range_within(len), expected);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 0)]
    #[case(2, 0)]
    #[case(3, 1)]
    #[case(6, 2)]
    fn last_index_points_at_final_row(#[case] len: usize, #[case] expected: usize) {
        let page = PageDescriptor::new(0, 2).expect("valid descriptor");
        assert_eq!(page.last_index_for(len), expected);
    }

    #[rstest]
    fn default_uses_catalogue_page_size() {
        let page = PageDescriptor::default();
        assert_eq!(page.index(), 0);
        assert_eq!(page.size(), DEFAULT_PAGE_SIZE);
    }

    #[rstest]
    fn serialises_with_query_parameter_names() {
        let page = PageDescriptor::new(3, 10).expect("valid descriptor");
        let json = serde_json::to_value(page).expect("serialise descriptor");
        assert_eq!(json, serde_json::json!({ "pageIndex": 3, "pageSize": 10 }));
    }

    #[rstest]
    fn deserialising_zero_size_fails() {
        let result: Result<PageDescriptor, _> =
            serde_json::from_str(r#"{ "pageIndex": 0, "pageSize": 0 }"#);
        assert!(result.is_err(), "zero page size must not deserialise");
    }
}
