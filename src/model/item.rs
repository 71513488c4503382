use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Hierarchy level of a table row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemKind {
    Project,
    Task,
    Subtask,
    #[serde(alias = "child-subtask", alias = "child_subtask")]
    ChildSubtask,
}

impl ItemKind {
    /// The tag used in rows, family keys and item refs
    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Project => "project",
            ItemKind::Task => "task",
            ItemKind::Subtask => "subtask",
            ItemKind::ChildSubtask => "childSubtask",
        }
    }

    /// Parse a kind tag. Accepts `child-subtask` / `child_subtask` as well,
    /// the same spellings items files may use.
    pub fn parse_kind(s: &str) -> Option<ItemKind> {
        match s {
            "project" => Some(ItemKind::Project),
            "task" => Some(ItemKind::Task),
            "subtask" => Some(ItemKind::Subtask),
            "childSubtask" | "child-subtask" | "child_subtask" => Some(ItemKind::ChildSubtask),
            _ => None,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque identifier. Rows may carry ids as JSON strings or numbers;
/// both are normalized to their decimal/string form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        ItemId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        ItemId(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        ItemId(s)
    }
}

impl From<u64> for ItemId {
    fn from(n: u64) -> Self {
        ItemId(n.to_string())
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Int(i64),
            Uint(u64),
            Str(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Int(n) => ItemId(n.to_string()),
            RawId::Uint(n) => ItemId(n.to_string()),
            RawId::Str(s) => ItemId(s),
        })
    }
}

/// A classified table row. Each variant carries exactly the parent
/// references its level needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Item {
    Project {
        id: ItemId,
    },
    Task {
        id: ItemId,
        project_id: ItemId,
    },
    Subtask {
        id: ItemId,
        task_id: ItemId,
    },
    ChildSubtask {
        id: ItemId,
        task_id: ItemId,
        parent_subtask_id: ItemId,
    },
}

impl Item {
    pub fn project(id: impl Into<ItemId>) -> Self {
        Item::Project { id: id.into() }
    }

    pub fn task(id: impl Into<ItemId>, project_id: impl Into<ItemId>) -> Self {
        Item::Task {
            id: id.into(),
            project_id: project_id.into(),
        }
    }

    pub fn subtask(id: impl Into<ItemId>, task_id: impl Into<ItemId>) -> Self {
        Item::Subtask {
            id: id.into(),
            task_id: task_id.into(),
        }
    }

    pub fn child_subtask(
        id: impl Into<ItemId>,
        task_id: impl Into<ItemId>,
        parent_subtask_id: impl Into<ItemId>,
    ) -> Self {
        Item::ChildSubtask {
            id: id.into(),
            task_id: task_id.into(),
            parent_subtask_id: parent_subtask_id.into(),
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Project { .. } => ItemKind::Project,
            Item::Task { .. } => ItemKind::Task,
            Item::Subtask { .. } => ItemKind::Subtask,
            Item::ChildSubtask { .. } => ItemKind::ChildSubtask,
        }
    }

    pub fn id(&self) -> &ItemId {
        match self {
            Item::Project { id }
            | Item::Task { id, .. }
            | Item::Subtask { id, .. }
            | Item::ChildSubtask { id, .. } => id,
        }
    }

    /// `<kind>/<id>`, the form used to refer to a row on the command line
    pub fn item_ref(&self) -> String {
        format!("{}/{}", self.kind(), self.id())
    }
}

/// A row as delivered by the table / REST API, before classification.
/// `kind` is optional for rows produced by older endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ItemKind>,
    pub id: ItemId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<ItemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<ItemId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_subtask_id: Option<ItemId>,
}

impl ItemRow {
    pub fn new(id: impl Into<ItemId>) -> Self {
        ItemRow {
            id: id.into(),
            ..Default::default()
        }
    }
}

impl From<&Item> for ItemRow {
    fn from(item: &Item) -> Self {
        let mut row = ItemRow::new(item.id().clone());
        row.kind = Some(item.kind());
        match item {
            Item::Project { .. } => {}
            Item::Task { project_id, .. } => row.project_id = Some(project_id.clone()),
            Item::Subtask { task_id, .. } => row.task_id = Some(task_id.clone()),
            Item::ChildSubtask {
                task_id,
                parent_subtask_id,
                ..
            } => {
                row.task_id = Some(task_id.clone());
                row.parent_subtask_id = Some(parent_subtask_id.clone());
            }
        }
        row
    }
}
