use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::item::{Item, ItemKind};

/// Error parsing a family key from its text form
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FamilyKeyError {
    #[error("unknown family prefix in {0:?}")]
    UnknownPrefix(String),
    #[error("family key {0:?} is missing an identifier")]
    MissingSegment(String),
}

/// Groups items that sit at the same editable level under the same parent.
///
/// Text form (`Display` / `FromStr`):
/// - `project:<id>`: every project is its own family
/// - `task:<projectId>`: tasks under one project
/// - `subtask:<taskId>`: subtasks under one task
/// - `childSubtask:<taskId>:<parentSubtaskId>`: child-subtasks under one subtask
///
/// Identity is the text form. Ids are opaque and may contain `:`, so two
/// different parent pairs that render to the same text are one family.
#[derive(Debug, Clone)]
pub struct FamilyKey {
    kind: ItemKind,
    text: String,
}

impl FamilyKey {
    /// Derive the family key of an item
    pub fn of(item: &Item) -> FamilyKey {
        let text = match item {
            Item::Project { id } => format!("project:{}", id),
            Item::Task { project_id, .. } => format!("task:{}", project_id),
            Item::Subtask { task_id, .. } => format!("subtask:{}", task_id),
            Item::ChildSubtask {
                task_id,
                parent_subtask_id,
                ..
            } => format!("childSubtask:{}:{}", task_id, parent_subtask_id),
        };
        FamilyKey {
            kind: item.kind(),
            text,
        }
    }

    /// The hierarchy level this family lives at (the key's prefix)
    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

// The prefix fixes the kind, so comparing text alone is enough.
impl PartialEq for FamilyKey {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for FamilyKey {}

impl Hash for FamilyKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Display for FamilyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for FamilyKey {
    type Err = FamilyKeyError;

    /// Only the prefix is interpreted; everything after it is kept verbatim.
    /// Prefix spellings accepted by [`ItemKind::parse_kind`] are normalized.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix, rest) = s
            .split_once(':')
            .ok_or_else(|| FamilyKeyError::UnknownPrefix(s.to_string()))?;
        let kind =
            ItemKind::parse_kind(prefix).ok_or_else(|| FamilyKeyError::UnknownPrefix(s.to_string()))?;

        // A child-subtask key always carries two ids
        if rest.is_empty() || (kind == ItemKind::ChildSubtask && !rest.contains(':')) {
            return Err(FamilyKeyError::MissingSegment(s.to_string()));
        }

        Ok(FamilyKey {
            kind,
            text: format!("{}:{}", kind.as_str(), rest),
        })
    }
}

impl Serialize for FamilyKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.text)
    }
}
