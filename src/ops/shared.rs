use std::sync::{Arc, Mutex, MutexGuard};

use crate::model::item::Item;
use crate::ops::selection::{SelectedItems, SelectionAnalysis, SelectionManager};

/// Cloneable handle to a [`SelectionManager`] shared between threads.
///
/// Every call takes the lock once, so mutations and reads never interleave
/// and a read always sees the latest completed mutation.
#[derive(Debug, Clone, Default)]
pub struct SharedSelection {
    inner: Arc<Mutex<SelectionManager>>,
}

/// Partition and analysis taken under the same lock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSnapshot {
    pub items: SelectedItems,
    pub analysis: SelectionAnalysis,
}

impl SharedSelection {
    pub fn new(manager: SelectionManager) -> Self {
        SharedSelection {
            inner: Arc::new(Mutex::new(manager)),
        }
    }

    pub fn toggle_select(&self, item: &Item) -> bool {
        self.lock().toggle_select(item)
    }

    pub fn is_selected(&self, item: &Item) -> bool {
        self.lock().is_selected(item)
    }

    pub fn clear_selection(&self) {
        self.lock().clear_selection();
    }

    pub fn selection_count(&self) -> usize {
        self.lock().selection_count()
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        let manager = self.lock();
        SelectionSnapshot {
            items: manager.selected_items(),
            analysis: manager.selection_analysis(),
        }
    }

    // The map is never left half-updated by a panicking caller, so a
    // poisoned lock still guards a consistent selection.
    fn lock(&self) -> MutexGuard<'_, SelectionManager> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}
