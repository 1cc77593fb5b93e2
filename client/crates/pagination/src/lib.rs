//! Page descriptors and page-slice view models for catalogue list views.
//!
//! This crate has no knowledge of where a collection comes from. Callers hand
//! it the latest snapshot and it recomputes the visible rows from scratch on
//! every change, so the displayed slice can never drift from the snapshot.
//!
//! # Example
//!
//! ```
//! use pagination::{PageDescriptor, PaginatedView};
//!
//! let page = PageDescriptor::new(0, 2).expect("valid descriptor");
//! let mut view = PaginatedView::new(page);
//! view.on_collection_changed(vec!["a", "b", "c", "d", "e"], false);
//! assert_eq!(view.visible(), ["a", "b"]);
//!
//! view.on_collection_changed(vec!["a", "b", "c", "d", "e", "f"], true);
//! assert_eq!(view.page().index(), 2);
//! assert_eq!(view.visible(), ["e", "f"]);
//! ```

mod descriptor;
mod view;

pub use descriptor::{DEFAULT_PAGE_SIZE, PageDescriptor, PageDescriptorError};
pub use view::PaginatedView;
