//! Behaviour tests for the paginated view model.
//!
//! These scenarios pin the create-then-jump flow used after adding a product
//! and the "no auto-correction" rule applied when the collection shrinks.

use pagination::{PageDescriptor, PaginatedView};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::{ScenarioState, given, scenario, then, when};

const PRODUCTS: [&str; 5] = ["A", "B", "C", "D", "E"];

#[derive(Default, ScenarioState)]
struct ViewWorld {
    view: Slot<PaginatedView<String>>,
}

impl ViewWorld {
    fn view(&self) -> PaginatedView<String> {
        self.view.get().expect("view should be initialised")
    }
}

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_owned()).collect()
}

#[fixture]
fn world() -> ViewWorld {
    ViewWorld::default()
}

#[given("a view of five products with two rows per page")]
fn a_view_of_five_products(world: &ViewWorld) {
    let page = PageDescriptor::new(0, 2).expect("valid descriptor");
    let mut view = PaginatedView::new(page);
    view.on_collection_changed(owned(&PRODUCTS), false);
    world.view.set(view);
}

#[given("the view shows page {index}")]
fn the_view_shows_page(world: &ViewWorld, index: usize) {
    let mut view = world.view();
    let page = view.page().with_index(index);
    view.set_page(page);
    world.view.set(view);
}

#[when("a sixth product is appended and the view jumps to the last page")]
fn a_sixth_product_is_appended(world: &ViewWorld) {
    let mut view = world.view();
    let mut snapshot = owned(&PRODUCTS);
    snapshot.push("F".to_owned());
    view.on_collection_changed(snapshot, true);
    world.view.set(view);
}

#[when("the collection shrinks to two products without jumping")]
fn the_collection_shrinks(world: &ViewWorld) {
    let mut view = world.view();
    view.on_collection_changed(owned(&["A", "B"]), false);
    world.view.set(view);
}

#[then("the page index is {index}")]
fn the_page_index_is(world: &ViewWorld, index: usize) {
    assert_eq!(world.view().page().index(), index);
}

#[then("only the new product is visible")]
fn only_the_new_product_is_visible(world: &ViewWorld) {
    assert_eq!(world.view().visible(), ["F".to_owned()]);
}

#[then("no products are visible")]
fn no_products_are_visible(world: &ViewWorld) {
    assert!(world.view().visible().is_empty());
}

#[scenario(
    path = "tests/features/paginated_view.feature",
    name = "Creating an item jumps to the page holding it"
)]
fn creating_an_item_jumps_to_its_page(world: ViewWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/paginated_view.feature",
    name = "Shrinking the collection leaves the page index in place"
)]
fn shrinking_keeps_page_index(world: ViewWorld) {
    let _ = world;
}
