//! Bulk-edit selection behavior through the public API, including the
//! family aliasing cases: two different rows with the same family key share
//! one selection entry.

use pretty_assertions::assert_eq;
use tasksel::model::LegacyPolicy;
use tasksel::ops::classify::classify_all;
use tasksel::{EditReason, FamilyKey, Item, ItemRow, SelectionManager};

fn toggled(items: &[Item]) -> SelectionManager {
    let mut manager = SelectionManager::new();
    for item in items {
        manager.toggle_select(item);
    }
    manager
}

// ============================================================================
// Aliasing
// ============================================================================

#[test]
fn second_task_under_same_project_deselects() {
    let manager = toggled(&[Item::task(1u64, 100u64), Item::task(2u64, 100u64)]);
    assert_eq!(manager.selection_count(), 0);
    assert_eq!(manager.selection_analysis().reason, EditReason::NoneSelected);
}

#[test]
fn second_subtask_under_same_task_deselects() {
    let manager = toggled(&[Item::subtask(9u64, 1u64), Item::subtask(10u64, 1u64)]);
    assert_eq!(manager.selection_count(), 0);
}

#[test]
fn second_child_subtask_under_same_subtask_deselects() {
    let manager = toggled(&[
        Item::child_subtask(30u64, 1u64, 9u64),
        Item::child_subtask(31u64, 1u64, 9u64),
    ]);
    assert_eq!(manager.selection_count(), 0);
}

#[test]
fn any_family_member_reads_as_selected() {
    let manager = toggled(&[Item::task(1u64, 100u64)]);
    for id in [1u64, 2, 3] {
        assert!(manager.is_selected(&Item::task(id, 100u64)));
    }
}

// ============================================================================
// Edit eligibility
// ============================================================================

#[test]
fn single_project_is_editable() {
    let analysis = toggled(&[Item::project(5u64)]).selection_analysis();
    assert!(analysis.can_edit);
    assert_eq!(analysis.reason, EditReason::SingleItem);
    assert_eq!(analysis.family, Some(FamilyKey::of(&Item::project(5u64))));
}

#[test]
fn task_and_subtask_are_mixed() {
    let analysis = toggled(&[Item::task(1u64, 100u64), Item::subtask(9u64, 1u64)])
        .selection_analysis();
    assert!(!analysis.can_edit);
    assert_eq!(analysis.reason, EditReason::MixedFamilies);
}

#[test]
fn tasks_from_different_projects_are_mixed() {
    let analysis = toggled(&[Item::task(1u64, 100u64), Item::task(7u64, 200u64)])
        .selection_analysis();
    assert!(!analysis.can_edit);
}

#[test]
fn clear_resets_everything() {
    let mut manager = toggled(&[
        Item::project(5u64),
        Item::task(1u64, 100u64),
        Item::subtask(9u64, 1u64),
    ]);
    assert_eq!(manager.selected_items().all.len(), manager.selection_count());

    manager.clear_selection();
    assert_eq!(manager.selection_count(), 0);
    assert!(manager.selected_items().all.is_empty());
    let analysis = manager.selection_analysis();
    assert!(!analysis.can_edit);
    assert_eq!(analysis.reason.to_string(), "No items selected");
}

// ============================================================================
// Legacy rows
// ============================================================================

#[test]
fn legacy_rows_join_tagged_families() {
    let rows: Vec<ItemRow> = serde_json::from_str(
        r#"[
            {"kind": "task", "id": 1, "projectId": 100},
            {"id": 2, "projectId": 100}
        ]"#,
    )
    .unwrap();
    let items = classify_all(&rows, LegacyPolicy::Allow).unwrap();
    assert!(items[1].inferred);

    let mut manager = SelectionManager::new();
    manager.toggle_select(&items[0].item);
    assert!(manager.is_selected(&items[1].item));
    manager.toggle_select(&items[1].item);
    assert_eq!(manager.selection_count(), 0);
}
