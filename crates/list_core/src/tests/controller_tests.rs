use super::*;
use crate::row::{FieldValue, Record};

fn advanced(controller: &mut ListController) {
    controller.load_more();
    controller.load_more();
    assert_eq!(controller.page(), 3);
}

#[test]
fn starts_from_defaults() {
    let controller: ListController = ListController::default();
    assert_eq!(controller.page(), 1);
    assert_eq!(controller.page_size(), DEFAULT_PAGE_SIZE);
    assert_eq!(controller.sort_key(), None);
    assert_eq!(controller.sort_dir(), SortDirection::Asc);
    assert_eq!(controller.filter_text(), "");
    assert_eq!(controller.total_visible(), 10);
}

#[test]
fn initial_page_size_is_clamped() {
    let controller: ListController = ListController::new(ListStateOptions::default().with_page_size(0));
    assert_eq!(controller.page_size(), 1);
}

#[test]
fn load_more_only_advances_the_page() {
    let mut controller = ListController::new(
        ListStateOptions::default()
            .with_sort("score".to_string(), SortDirection::Desc)
            .with_page_size(20),
    );
    controller.set_filter_text("edge");
    controller.load_more();

    assert_eq!(controller.page(), 2);
    assert_eq!(controller.page_size(), 20);
    assert_eq!(controller.sort_key().map(String::as_str), Some("score"));
    assert_eq!(controller.sort_dir(), SortDirection::Desc);
    assert_eq!(controller.filter_text(), "edge");
    assert_eq!(controller.total_visible(), 40);
}

fn assert_rewinds(label: &str, transition: impl FnOnce(&mut ListController)) {
    let mut controller: ListController = ListController::default();
    advanced(&mut controller);
    transition(&mut controller);
    assert_eq!(controller.page(), 1, "{label} should rewind pagination");
}

#[test]
fn every_other_transition_rewinds_to_page_one() {
    assert_rewinds("filter", |c| c.set_filter_text("x"));
    assert_rewinds("sort key", |c| c.set_sort_key(Some("name".to_string())));
    assert_rewinds("sort dir", |c| c.set_sort_dir(SortDirection::Desc));
    assert_rewinds("toggle", |c| c.toggle_sort_dir());
    assert_rewinds("page size", |c| c.set_page_size(50));
    assert_rewinds("reset", |c| c.reset());
}

#[test]
fn setting_the_same_value_still_rewinds() {
    let mut controller: ListController = ListController::default();
    advanced(&mut controller);
    controller.set_sort_dir(SortDirection::Asc);
    assert_eq!(controller.page(), 1);
}

#[test]
fn filter_text_is_stored_verbatim() {
    let mut controller: ListController = ListController::default();
    controller.set_filter_text("  New York ");
    assert_eq!(controller.filter_text(), "  New York ");
}

#[test]
fn set_sort_key_keeps_direction() {
    let mut controller: ListController = ListController::default();
    controller.set_sort_dir(SortDirection::Desc);
    controller.set_sort_key(Some("name".to_string()));
    assert_eq!(controller.sort_dir(), SortDirection::Desc);
    controller.set_sort_key(None);
    assert_eq!(controller.sort_key(), None);
}

#[test]
fn toggle_flips_direction_both_ways() {
    let mut controller: ListController = ListController::default();
    controller.toggle_sort_dir();
    assert_eq!(controller.sort_dir(), SortDirection::Desc);
    controller.toggle_sort_dir();
    assert_eq!(controller.sort_dir(), SortDirection::Asc);
}

#[test]
fn page_size_is_clamped_on_write() {
    let mut controller: ListController = ListController::default();
    controller.set_page_size(0);
    assert_eq!(controller.page_size(), 1);
    assert_eq!(controller.total_visible(), 1);
}

#[test]
fn reset_restores_construction_options() {
    let options = ListStateOptions::default()
        .with_sort("updatedAt".to_string(), SortDirection::Desc)
        .with_page_size(20);
    let mut controller = ListController::new(options.clone());

    controller.set_filter_text("berlin");
    controller.set_sort_key(Some("score".to_string()));
    controller.toggle_sort_dir();
    controller.set_page_size(50);
    controller.load_more();
    controller.reset();

    assert_eq!(controller.state(), &ListState::new(&options));
    assert_eq!(controller.options(), &options);
}

#[test]
fn selecting_sort_keys_switches_then_toggles() {
    let mut controller: ListController = ListController::default();
    controller.select_sort_key("name".to_string());
    assert_eq!(controller.sort_key().map(String::as_str), Some("name"));
    assert_eq!(controller.sort_dir(), SortDirection::Asc);

    controller.select_sort_key("name".to_string());
    assert_eq!(controller.sort_dir(), SortDirection::Desc);

    controller.select_sort_key("score".to_string());
    assert_eq!(controller.sort_key().map(String::as_str), Some("score"));
    assert_eq!(controller.sort_dir(), SortDirection::Desc);
}

#[test]
fn load_more_is_the_only_non_resetting_action() {
    let actions: Vec<ListAction<String>> = vec![
        ListAction::SetFilterText(String::new()),
        ListAction::SetSortKey(None),
        ListAction::SetSortDir(SortDirection::Asc),
        ListAction::ToggleSortDir,
        ListAction::SetPageSize(1),
        ListAction::LoadMore,
        ListAction::Reset,
    ];
    let exempt: Vec<&str> = actions
        .iter()
        .filter(|action| !action.resets_page())
        .map(ListAction::name)
        .collect();
    assert_eq!(exempt, vec!["load_more"]);
}

#[test]
fn processes_rows_through_the_current_state() {
    let rows: Vec<Record> = (1..=5)
        .map(|id| {
            Record::new()
                .with("id", id)
                .with("name", format!("Edge Node {id}"))
                .with("score", 100 - id)
        })
        .collect();

    let mut controller = ListController::new(
        ListStateOptions::default()
            .with_sort("score".to_string(), SortDirection::Asc)
            .with_page_size(2),
    );
    let first = controller.process(&rows);
    assert_eq!(first.total, 5);
    assert_eq!(first.len(), 2);
    assert!(first.can_load_more());
    assert_eq!(first.rows[0].get("id"), Some(&FieldValue::Number(5.0)));

    controller.load_more();
    controller.load_more();
    let all = controller.process(&rows);
    assert_eq!(all.len(), 5);
    assert!(!all.can_load_more());

    controller.set_filter_text("node 3");
    let narrowed = controller.process(&rows);
    assert_eq!(narrowed.total, 1);
    assert_eq!(controller.page(), 1);
}
