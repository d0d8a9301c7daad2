//! Integration tests for the search, filter, sort and page pipeline.

use horizon_datagrid::grid::{
    AggregateState, ColumnDescriptor, ColumnFilterSet, ColumnFilterState, FilterOption, PageState,
    Paginator, Record, RecordId, SearchFilter, SelectionTracker, SortDirection, SortState, Sorter,
    ViewStatus,
};
use horizon_datagrid::{DataGrid, GridOptions};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::sync::Arc;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("name").with_header("Name").with_accessor("name").sortable(),
        ColumnDescriptor::new("status")
            .with_header("Status")
            .with_accessor("status")
            .sortable()
            .filterable()
            .with_filter_options(vec![
                FilterOption::new("ACTIVE", "Active"),
                FilterOption::new("DRAFT", "Draft"),
            ]),
        ColumnDescriptor::new("category")
            .with_accessor("category.name")
            .filterable(),
        ColumnDescriptor::new("actions").with_render(|_| "Edit".into()),
    ]
}

fn item(id: i64, name: &str, status: &str, category: Value, tier: i64) -> Value {
    json!({"id": id, "name": name, "status": status, "category": category, "tier": tier})
}

fn inventory() -> Vec<Value> {
    vec![
        item(1, "Laptop", "ACTIVE", json!({"name": "Hardware"}), 1),
        item(2, "Mouse", "DRAFT", json!({"name": "Hardware"}), 2),
        item(3, "Antivirus", "ACTIVE", json!({"name": "Software"}), 1),
        item(4, "Monitor", "ACTIVE", json!({"name": "Hardware"}), 2),
        item(5, "Editor", "DRAFT", json!({"name": "Software"}), 1),
        json!({"id": 6, "name": "Keyboard", "status": "ACTIVE", "category": null, "tier": 2}),
        json!({"id": 7, "name": "Dock", "status": "DRAFT", "tier": 1}),
    ]
}

fn records(values: Vec<Value>) -> Vec<Record> {
    values.into_iter().map(|v| Record::from_value(v).unwrap()).collect()
}

fn ids(records: &[&Record]) -> Vec<RecordId> {
    records.iter().map(|r| r.id().clone()).collect()
}

fn int_ids(values: &[i64]) -> Vec<RecordId> {
    values.iter().map(|&v| RecordId::Int(v)).collect()
}

fn numbered(count: i64) -> Vec<Value> {
    (1..=count)
        .map(|id| {
            json!({
                "id": id,
                "name": format!("Row {id:02}"),
                "status": if id % 5 == 0 { "DRAFT" } else { "ACTIVE" },
            })
        })
        .collect()
}

// ============================================================================
// Stage properties
// ============================================================================

#[test]
fn sort_toggle_keeps_ties_in_input_order() {
    let data = records(inventory());
    let refs: Vec<&Record> = data.iter().collect();
    let columns = columns();

    let mut sort = SortState::default();
    sort.toggle("status");
    let first = ids(&Sorter::apply(&refs, &sort, &columns));
    assert_eq!(first, int_ids(&[1, 3, 4, 6, 2, 5, 7]));

    sort.toggle("status");
    let descending = ids(&Sorter::apply(&refs, &sort, &columns));
    assert_eq!(descending, int_ids(&[2, 5, 7, 1, 3, 4, 6]));

    sort.toggle("status");
    assert_eq!(ids(&Sorter::apply(&refs, &sort, &columns)), first);
}

#[test]
fn search_and_filters_commute() {
    let data = records(inventory());
    let refs: Vec<&Record> = data.iter().collect();
    let columns = columns();

    let terms = ["", "o", "ARE", "hardware", "zz", "  "];
    let filter_sets = [
        ColumnFilterState::new(),
        ColumnFilterState::new().with("status", "ACTIVE"),
        ColumnFilterState::new().with("status", "DRAFT").with("tier", 1),
        ColumnFilterState::new().with("status", "all").with("tier", 2),
        ColumnFilterState::new().with("tier", "1"),
    ];

    for term in terms {
        for filters in &filter_sets {
            let searched = SearchFilter::apply(&refs, term, &columns);
            let search_first = ColumnFilterSet::apply(&searched, filters, &columns);

            let filtered = ColumnFilterSet::apply(&refs, filters, &columns);
            let filter_first = SearchFilter::apply(&filtered, term, &columns);

            assert_eq!(
                ids(&search_first),
                ids(&filter_first),
                "term {term:?}, filters {filters:?}"
            );
        }
    }
}

#[test]
fn search_reads_nested_accessors_and_skips_missing() {
    let data = records(inventory());
    let refs: Vec<&Record> = data.iter().collect();

    let matched = SearchFilter::apply(&refs, "SOFTWARE", &columns());
    assert_eq!(ids(&matched), int_ids(&[3, 5]));

    // Render-only columns do not take part in search.
    assert!(SearchFilter::apply(&refs, "edit", &columns())
        .iter()
        .all(|r| r.id() == &RecordId::Int(5)));
}

#[test]
fn filters_use_strict_equality() {
    let data = records(inventory());
    let refs: Vec<&Record> = data.iter().collect();

    let numeric = ColumnFilterSet::apply(&refs, &ColumnFilterState::new().with("tier", 1), &[]);
    assert_eq!(ids(&numeric), int_ids(&[1, 3, 5, 7]));

    let text = ColumnFilterSet::apply(&refs, &ColumnFilterState::new().with("tier", "1"), &[]);
    assert!(text.is_empty());
}

#[test]
fn pages_cover_the_sequence_exactly() {
    let data = records(numbered(23));
    let refs: Vec<&Record> = data.iter().collect();
    let sorted = Sorter::apply(&refs, &SortState::by("name", SortDirection::Desc), &columns());

    for per_page in [1, 4, 5, 10, 23, 50] {
        let first = Paginator::apply(&sorted, &PageState::first(per_page).unwrap());
        let mut concatenated = Vec::new();
        for page in 1..=first.total_pages {
            let state = PageState::new(page, per_page).unwrap();
            let slice = Paginator::apply(&sorted, &state);
            assert!(!slice.bounds_clamped);
            concatenated.extend(slice.items);
        }
        assert_eq!(ids(&concatenated), ids(&sorted), "items per page {per_page}");
    }
}

#[test]
fn selection_tri_state() {
    let visible = int_ids(&[1, 2, 3]);
    let mut selection = SelectionTracker::new();

    selection.select_all_visible(&visible);
    assert_eq!(selection.aggregate_state(&visible), AggregateState::All);

    selection.toggle(&RecordId::Int(2));
    assert_eq!(selection.aggregate_state(&visible), AggregateState::Some);

    selection.toggle(&RecordId::Int(2));
    assert_eq!(selection.aggregate_state(&visible), AggregateState::All);
}

// ============================================================================
// Controller scenarios
// ============================================================================

#[test]
fn search_clamps_stale_page() {
    init_logging();
    let mut grid = DataGrid::from_values(numbered(25), columns(), GridOptions::default()).unwrap();
    grid.set_page(3).unwrap();
    assert_eq!(grid.total_pages(), 3);
    assert_eq!(grid.view().rows.len(), 5);

    let clamped = Arc::new(Mutex::new(Vec::new()));
    let clamped_clone = clamped.clone();
    grid.page_clamped.connect(move |&change| clamped_clone.lock().push(change));

    grid.set_search_term("draft");
    assert_eq!(grid.filtered_count(), 5);

    let page = grid.page();
    assert_eq!(page.total_pages, 1);
    assert_eq!(page.effective_page, 1);
    assert_eq!(grid.state().page.current_page(), 1);
    assert_eq!(*clamped.lock(), vec![(3, 1)]);
}

#[test]
fn paginator_reports_clamp_for_five_survivors() {
    let data = records(numbered(25));
    let refs: Vec<&Record> = data.iter().collect();
    let state = PageState::new(3, 10).unwrap();
    assert!(!Paginator::apply(&refs, &state).bounds_clamped);

    let survivors = SearchFilter::apply(&refs, "draft", &columns());
    let page = Paginator::apply(&survivors, &state);
    assert_eq!(page.total_pages, 1);
    assert!(page.bounds_clamped);
    assert_eq!(page.effective_page, 1);
    assert_eq!(page.items.len(), 5);
}

#[test]
fn end_to_end_search_sort_and_page() {
    init_logging();
    let values = ["A", "B", "C", "D", "E"]
        .iter()
        .zip(1..)
        .map(|(name, id)| {
            json!({
                "id": id,
                "name": name,
                "status": if id % 2 == 1 { "ACTIVE" } else { "DRAFT" },
            })
        })
        .collect();
    let options = GridOptions::default().with_items_per_page(2);
    let mut grid = DataGrid::from_values(values, columns(), options).unwrap();

    // Both status values contain an "a", so every record matches.
    grid.set_search_term("a");
    grid.set_sort("name", SortDirection::Desc);
    assert_eq!(grid.filtered_count(), 5);

    let view = grid.view();
    assert_eq!(view.total_pages, 3);
    assert_eq!(view.visible_ids(), int_ids(&[5, 4]));
    assert_eq!(view.range, Some((1, 2, 5)));

    assert!(grid.next_page());
    assert_eq!(grid.visible_ids(), int_ids(&[3, 2]));
    assert!(grid.next_page());
    assert_eq!(grid.visible_ids(), int_ids(&[1]));
    assert!(!grid.next_page());

    // Narrowing to drafts leaves one page; the stale page is persisted.
    grid.set_filter("status", "DRAFT");
    let view = grid.view();
    assert_eq!(view.current_page, 1);
    assert_eq!(view.visible_ids(), int_ids(&[4, 2]));
}

#[test]
fn selection_survives_paging_and_search() {
    init_logging();
    let options = GridOptions::default().with_items_per_page(5);
    let mut grid = DataGrid::from_values(numbered(12), columns(), options).unwrap();

    let changes = Arc::new(Mutex::new(0usize));
    let changes_clone = changes.clone();
    grid.selection()
        .selection_changed
        .connect(move |_| *changes_clone.lock() += 1);

    grid.toggle_all_visible();
    assert_eq!(grid.view().selection, AggregateState::All);
    assert_eq!(grid.selection().len(), 5);

    grid.next_page();
    let view = grid.view();
    assert_eq!(view.selection, AggregateState::None);
    assert_eq!(view.selected_count, 5);
    assert!(view.has_selection());

    grid.toggle_selection(&RecordId::Int(6));
    assert_eq!(grid.selection_state(), AggregateState::Some);

    grid.set_search_term("row 0");
    grid.set_page(1).unwrap();
    assert_eq!(grid.visible_ids(), int_ids(&[1, 2, 3, 4, 5]));
    assert_eq!(grid.selection_state(), AggregateState::All);

    grid.toggle_all_visible();
    assert_eq!(grid.selection().selected_ids(), int_ids(&[6]).as_slice());
    assert_eq!(*changes.lock(), 3);
}

#[test]
fn selection_survives_data_refresh() {
    init_logging();
    let mut grid = DataGrid::from_values(numbered(4), columns(), GridOptions::default()).unwrap();
    assert!(grid.toggle_selection(&RecordId::Int(1)));
    assert!(grid.toggle_selection(&RecordId::Int(3)));

    // A refresh that drops a selected id keeps it selected.
    grid.set_records(records(vec![json!({"id": 2}), json!({"id": 3})])).unwrap();
    assert_eq!(grid.selection().selected_ids(), int_ids(&[1, 3]).as_slice());
    assert_eq!(grid.view().selection, AggregateState::Some);

    // Replacing data and columns together behaves the same.
    grid.set_data(records(numbered(2)), columns()).unwrap();
    assert_eq!(grid.selection().selected_ids(), int_ids(&[1, 3]).as_slice());
    assert_eq!(grid.visible_ids(), int_ids(&[1, 2]));
    assert_eq!(grid.selection_state(), AggregateState::Some);

    // Ids missing from the current data cannot be toggled, but stay selected.
    assert!(!grid.toggle_selection(&RecordId::Int(3)));
    assert!(grid.selection().is_selected(&RecordId::Int(3)));

    grid.set_records(Vec::new()).unwrap();
    assert_eq!(grid.selection().len(), 2);
    assert_eq!(grid.view().selection, AggregateState::None);
}

#[test]
fn empty_grid_reports_one_page() {
    let grid = DataGrid::new(Vec::new(), columns(), GridOptions::default()).unwrap();
    let view = grid.view();
    assert_eq!(view.status, ViewStatus::Empty);
    assert_eq!(view.total_pages, 1);
    assert_eq!(view.current_page, 1);
    assert!(view.rows.is_empty());
    assert_eq!(view.selection, AggregateState::None);
}

#[test]
fn options_from_toml_drive_the_grid() {
    let options = GridOptions::from_toml(
        r#"
        pagination = false
        sortable = false
        "#,
    )
    .unwrap();
    let mut grid = DataGrid::from_values(numbered(30), columns(), options).unwrap();
    grid.set_sort("name", SortDirection::Desc);

    let view = grid.view();
    assert_eq!(view.rows.len(), 30);
    assert_eq!(view.total_pages, 1);
    assert_eq!(view.rows[0].id(), &RecordId::Int(1));
}
