use std::fmt;

use indexmap::{IndexMap, IndexSet};
use serde::{Serialize, Serializer};
use tracing::trace;

use crate::model::family::FamilyKey;
use crate::model::item::{Item, ItemKind};

/// Tracks selected rows of a hierarchical table, keyed by family.
///
/// One manager is created per table/session by its owner. The map holds at
/// most one entry per family key: toggling a second item that shares a
/// family with a selected one deselects that family rather than adding a
/// second entry.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    selected: IndexMap<FamilyKey, Item>,
}

/// Selected entries partitioned by hierarchy level, each in selection order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedItems {
    pub projects: Vec<Item>,
    pub tasks: Vec<Item>,
    pub subtasks: Vec<Item>,
    pub child_subtasks: Vec<Item>,
    pub all: Vec<Item>,
}

/// Why a selection can or cannot be bulk edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditReason {
    NoneSelected,
    SingleItem,
    SameFamily(FamilyKey),
    MixedFamilies,
}

impl fmt::Display for EditReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditReason::NoneSelected => write!(f, "No items selected"),
            EditReason::SingleItem => write!(f, "Single item selected"),
            EditReason::SameFamily(key) => write!(f, "All items belong to the same family {}", key),
            EditReason::MixedFamilies => write!(
                f,
                "Mixed families selected; edit requires items from the same level/parent"
            ),
        }
    }
}

impl Serialize for EditReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Bulk edit eligibility of the current selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionAnalysis {
    pub can_edit: bool,
    pub reason: EditReason,
    /// The single family being edited, when `can_edit`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<FamilyKey>,
}

impl SelectionManager {
    pub fn new() -> Self {
        SelectionManager::default()
    }

    /// Select the item's family if it is not selected, otherwise deselect it.
    /// Returns whether the family is selected afterwards.
    pub fn toggle_select(&mut self, item: &Item) -> bool {
        let key = FamilyKey::of(item);
        if self.selected.shift_remove(&key).is_some() {
            trace!(family = %key, item = %item.item_ref(), "deselected");
            false
        } else {
            trace!(family = %key, item = %item.item_ref(), "selected");
            self.selected.insert(key, item.clone());
            true
        }
    }

    /// True when the item's family is selected, whichever member selected it
    pub fn is_selected(&self, item: &Item) -> bool {
        self.selected.contains_key(&FamilyKey::of(item))
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Number of selected family entries
    pub fn selection_count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selected family keys in selection order
    pub fn family_keys(&self) -> impl Iterator<Item = &FamilyKey> {
        self.selected.keys()
    }

    /// Selected entries in selection order, with their family keys
    pub fn entries(&self) -> impl Iterator<Item = (&FamilyKey, &Item)> {
        self.selected.iter()
    }

    /// Partition the selection by family level
    pub fn selected_items(&self) -> SelectedItems {
        let mut items = SelectedItems::default();
        for (key, item) in &self.selected {
            let bucket = match key.kind() {
                ItemKind::Project => &mut items.projects,
                ItemKind::Task => &mut items.tasks,
                ItemKind::Subtask => &mut items.subtasks,
                ItemKind::ChildSubtask => &mut items.child_subtasks,
            };
            bucket.push(item.clone());
            items.all.push(item.clone());
        }
        items
    }

    /// Decide whether the current selection permits a bulk edit
    pub fn selection_analysis(&self) -> SelectionAnalysis {
        match self.selected.len() {
            0 => SelectionAnalysis {
                can_edit: false,
                reason: EditReason::NoneSelected,
                family: None,
            },
            1 => SelectionAnalysis {
                can_edit: true,
                reason: EditReason::SingleItem,
                family: self.selected.keys().next().cloned(),
            },
            _ => {
                // Entries are unique per family, so this only ever finds
                // one family per entry.
                let mut families: IndexSet<&FamilyKey> = self.selected.keys().collect();
                if families.len() == 1
                    && let Some(key) = families.pop()
                {
                    SelectionAnalysis {
                        can_edit: true,
                        reason: EditReason::SameFamily(key.clone()),
                        family: Some(key.clone()),
                    }
                } else {
                    SelectionAnalysis {
                        can_edit: false,
                        reason: EditReason::MixedFamilies,
                        family: None,
                    }
                }
            }
        }
    }
}
