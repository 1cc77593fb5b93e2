//! Paginated view model over a collection snapshot.

use crate::PageDescriptor;

/// Visible page of a collection, recomputed whenever the page or the
/// collection changes.
///
/// The view keeps its own copy of the latest snapshot and never patches the
/// visible slice in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginatedView<T> {
    page: PageDescriptor,
    snapshot: Vec<T>,
    visible: Vec<T>,
}

impl<T: Clone> PaginatedView<T> {
    /// Empty view positioned at `page`.
    #[must_use]
    pub const fn new(page: PageDescriptor) -> Self {
        Self {
            page,
            snapshot: Vec::new(),
            visible: Vec::new(),
        }
    }

    /// Record a new page descriptor and recompute the visible slice.
    pub fn set_page(&mut self, page: PageDescriptor) {
        self.page = page;
        self.recompute();
    }

    /// Replace the snapshot after the collection changed.
    ///
    /// With `jump_to_last_page` the page index moves to the page holding the
    /// final row (zero when empty). Otherwise the index is kept as is, even
    /// when it now lies past the end, and the slice is simply empty.
    pub fn on_collection_changed(&mut self, snapshot: Vec<T>, jump_to_last_page: bool) {
        if jump_to_last_page {
            let last = self.page.last_index_for(snapshot.len());
            self.page = self.page.with_index(last);
        }
        self.snapshot = snapshot;
        self.recompute();
    }

    /// Rows on the current page.
    #[must_use]
    pub fn visible(&self) -> &[T] {
        &self.visible
    }

    /// Current page descriptor.
    #[must_use]
    pub const fn page(&self) -> PageDescriptor {
        self.page
    }

    /// Total rows in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    /// Whether the snapshot holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    /// Number of pages the snapshot spans at the current page size.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.page.page_count_for(self.snapshot.len())
    }

    fn recompute(&mut self) {
        let range = self.page.range_within(self.snapshot.len());
        self.visible = self.snapshot.get(range).map(<[T]>::to_vec).unwrap_or_default();
    }
}

impl<T: Clone> Default for PaginatedView<T> {
    fn default() -> Self {
        Self::new(PageDescriptor::default())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for slice recomputation.
    use super::*;
    use rstest::{fixture, rstest};

    fn page(index: usize, size: usize) -> PageDescriptor {
        PageDescriptor::new(index, size).expect("valid descriptor")
    }

    #[fixture]
    fn letters() -> Vec<char> {
        vec!['a', 'b', 'c', 'd', 'e']
    }

    #[rstest]
    fn set_page_moves_the_window(letters: Vec<char>) {
        let mut view = PaginatedView::new(page(0, 2));
        view.on_collection_changed(letters, false);
        view.set_page(page(1, 2));
        assert_eq!(view.visible(), ['c', 'd']);
        view.set_page(page(0, 3));
        assert_eq!(view.visible(), ['a', 'b', 'c']);
    }

    #[rstest]
    fn index_past_the_end_is_kept_and_shows_nothing(letters: Vec<char>) {
        let mut view = PaginatedView::new(page(2, 2));
        view.on_collection_changed(letters, false);
        assert_eq!(view.visible(), ['e']);

        view.on_collection_changed(vec!['a', 'b'], false);
        assert_eq!(view.page().index(), 2, "index must not auto-correct");
        assert!(view.visible().is_empty());
    }

    #[rstest]
    fn jump_to_last_page_on_empty_snapshot_lands_on_zero() {
        let mut view: PaginatedView<char> = PaginatedView::new(page(4, 2));
        view.on_collection_changed(Vec::new(), true);
        assert_eq!(view.page().index(), 0);
        assert!(view.visible().is_empty());
        assert!(view.is_empty());
    }

    #[rstest]
    fn page_count_tracks_snapshot(letters: Vec<char>) {
        let mut view = PaginatedView::new(page(0, 2));
        view.on_collection_changed(letters, false);
        assert_eq!(view.page_count(), 3);
        assert_eq!(view.len(), 5);
    }
}
