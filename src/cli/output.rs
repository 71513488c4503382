use serde::Serialize;

use crate::model::family::FamilyKey;
use crate::model::item::{Item, ItemKind};
use crate::ops::classify::Classified;
use crate::ops::selection::{SelectedItems, SelectionAnalysis, SelectionManager};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct FamilyJson {
    #[serde(flatten)]
    pub item: Item,
    pub family: FamilyKey,
    pub inferred: bool,
}

#[derive(Serialize)]
pub struct ToggleJson {
    pub item: String,
    pub selected: bool,
}

#[derive(Serialize)]
pub struct SelectJson {
    pub toggles: Vec<ToggleJson>,
    pub count: usize,
    pub selection: SelectedItems,
    pub analysis: SelectionAnalysis,
}

#[derive(Serialize)]
pub struct CheckJson {
    pub rows: usize,
    pub inferred: Vec<String>,
    pub errors: Vec<String>,
}

pub fn family_json(classified: &Classified) -> FamilyJson {
    FamilyJson {
        item: classified.item.clone(),
        family: FamilyKey::of(&classified.item),
        inferred: classified.inferred,
    }
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// One line per row: `<kind>/<id>  <family>`, refs padded to a column
pub fn render_families(rows: &[Classified]) -> String {
    let width = rows
        .iter()
        .map(|c| c.item.item_ref().len())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for row in rows {
        let item_ref = row.item.item_ref();
        out.push_str(&format!(
            "{:<width$}  {}",
            item_ref,
            FamilyKey::of(&row.item),
            width = width
        ));
        if row.inferred {
            out.push_str(" (inferred)");
        }
        out.push('\n');
    }
    out
}

/// Selected families grouped by level, then the count and edit verdict
pub fn render_selection(manager: &SelectionManager) -> String {
    let mut out = String::new();
    let groups = [
        ("projects", ItemKind::Project),
        ("tasks", ItemKind::Task),
        ("subtasks", ItemKind::Subtask),
        ("child subtasks", ItemKind::ChildSubtask),
    ];
    for (label, kind) in groups {
        let entries: Vec<_> = manager
            .entries()
            .filter(|(key, _)| key.kind() == kind)
            .collect();
        if entries.is_empty() {
            continue;
        }
        out.push_str(label);
        out.push('\n');
        for (key, item) in entries {
            out.push_str(&format!("  {} ({})\n", key, item.item_ref()));
        }
    }

    out.push_str(&format!("{} selected\n", manager.selection_count()));
    out.push_str(&render_analysis(&manager.selection_analysis()));
    out
}

pub fn render_analysis(analysis: &SelectionAnalysis) -> String {
    format!(
        "edit: {} ({})\n",
        if analysis.can_edit { "yes" } else { "no" },
        analysis.reason
    )
}
