use tracing::{debug, warn};

use crate::model::config::LegacyPolicy;
use crate::model::item::{Item, ItemId, ItemKind, ItemRow};

/// Error type for row classification
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ItemError {
    #[error("{kind} {id} is missing {field}")]
    MissingField {
        kind: ItemKind,
        id: ItemId,
        field: &'static str,
    },
    #[error("row {id} has no kind tag and legacy inference is disabled")]
    Untagged { id: ItemId },
}

/// A row turned into a typed item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub item: Item,
    /// True when the kind came from structural inference, not a tag
    pub inferred: bool,
}

/// Classify a single row.
///
/// Tagged rows are converted directly. Untagged rows go through
/// [`infer_kind`] unless `policy` is [`LegacyPolicy::Reject`].
pub fn classify(row: &ItemRow, policy: LegacyPolicy) -> Result<Classified, ItemError> {
    if let Some(kind) = row.kind {
        return Ok(Classified {
            item: build_item(row, kind)?,
            inferred: false,
        });
    }

    if policy == LegacyPolicy::Reject {
        return Err(ItemError::Untagged { id: row.id.clone() });
    }

    let kind = infer_kind(row);
    let malformed = row.project_id.is_none() && row.task_id.is_none();
    match policy {
        LegacyPolicy::Warn if malformed => warn!(
            id = %row.id,
            "untagged row has no parent references; treating it as a project"
        ),
        LegacyPolicy::Warn => warn!(
            id = %row.id,
            inferred = %kind,
            ignored_parent_subtask = row.parent_subtask_id.is_some(),
            "untagged row classified by inference"
        ),
        _ => debug!(id = %row.id, inferred = %kind, "untagged row classified by inference"),
    }

    Ok(Classified {
        item: build_item(row, kind)?,
        inferred: true,
    })
}

/// Classify every row, stopping at the first failure
pub fn classify_all(rows: &[ItemRow], policy: LegacyPolicy) -> Result<Vec<Classified>, ItemError> {
    rows.iter().map(|row| classify(row, policy)).collect()
}

/// Structural kind inference for rows without a tag:
/// `projectId` → task, else `taskId` → subtask, else project.
///
/// `parentSubtaskId` alone never makes a child-subtask; those must be tagged.
pub fn infer_kind(row: &ItemRow) -> ItemKind {
    if row.project_id.is_some() {
        ItemKind::Task
    } else if row.task_id.is_some() {
        ItemKind::Subtask
    } else {
        ItemKind::Project
    }
}

fn build_item(row: &ItemRow, kind: ItemKind) -> Result<Item, ItemError> {
    let require = |value: &Option<ItemId>, field: &'static str| {
        value.clone().ok_or_else(|| ItemError::MissingField {
            kind,
            id: row.id.clone(),
            field,
        })
    };

    let id = row.id.clone();
    Ok(match kind {
        ItemKind::Project => Item::Project { id },
        ItemKind::Task => Item::Task {
            id,
            project_id: require(&row.project_id, "projectId")?,
        },
        ItemKind::Subtask => Item::Subtask {
            id,
            task_id: require(&row.task_id, "taskId")?,
        },
        ItemKind::ChildSubtask => Item::ChildSubtask {
            id,
            task_id: require(&row.task_id, "taskId")?,
            parent_subtask_id: require(&row.parent_subtask_id, "parentSubtaskId")?,
        },
    })
}
