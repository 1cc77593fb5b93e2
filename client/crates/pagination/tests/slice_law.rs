//! Exhaustive check of the page slice law over small collections.

use pagination::{PageDescriptor, PaginatedView};
use rstest::rstest;

#[rstest]
fn visible_slice_matches_the_clamped_range(
    #[values(0, 1, 2, 5, 7)] len: usize,
    #[values(1, 2, 3)] size: usize,
    #[values(0, 1, 2, 3, 8)] index: usize,
) {
    let snapshot: Vec<usize> = (0..len).collect();
    let mut view = PaginatedView::new(PageDescriptor::new(index, size).expect("valid descriptor"));
    view.on_collection_changed(snapshot.clone(), false);

    let start = index * size;
    let expected: &[usize] = if start >= len {
        &[]
    } else {
        &snapshot[start..((index + 1) * size).min(len)]
    };
    assert_eq!(view.visible(), expected);
}
