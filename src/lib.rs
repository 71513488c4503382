//! Family-keyed selection for hierarchical project/task tables.
//!
//! A [`SelectionManager`](ops::selection::SelectionManager) tracks which
//! rows of a projects → tasks → subtasks → child-subtasks table are selected
//! and decides whether the selection can be bulk edited.

pub mod cli;
pub mod io;
pub mod model;
pub mod ops;

pub use model::{FamilyKey, Item, ItemKind, ItemRow};
pub use ops::selection::{EditReason, SelectedItems, SelectionAnalysis, SelectionManager};
pub use ops::shared::SharedSelection;
