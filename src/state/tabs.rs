// Tab manager for open editor tabs.
// Keeps tabs in open order and tracks which one the editor pane shows.

use serde::{Deserialize, Serialize};

use super::ids::{NodeId, TabId};

/// An open editor tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub id: TabId,
    /// Weak link to a file node.
    pub file_id: NodeId,
    /// File name captured when the tab was opened. Never refreshed.
    pub file_name: String,
}

/// Ordered tabs plus the active tab pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabManager {
    #[serde(default)]
    tabs: Vec<Tab>,
    #[serde(default)]
    active_tab_id: Option<TabId>,
}

impl TabManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn active_tab_id(&self) -> Option<TabId> {
        self.active_tab_id
    }

    /// The active tab, or `None` when nothing is active or the id dangles.
    pub fn active_tab(&self) -> Option<&Tab> {
        let active = self.active_tab_id?;
        self.tabs.iter().find(|tab| tab.id == active)
    }

    /// Position of the active tab in open order.
    pub fn active_index(&self) -> Option<usize> {
        let active = self.active_tab_id?;
        self.tabs.iter().position(|tab| tab.id == active)
    }

    pub fn find_by_file(&self, file_id: NodeId) -> Option<&Tab> {
        self.tabs.iter().find(|tab| tab.file_id == file_id)
    }

    /// Activate the tab for `file_id`, opening a new one at the end if
    /// the file has none yet.
    pub fn open_tab(&mut self, file_id: NodeId, file_name: impl Into<String>) -> TabId {
        if let Some(existing) = self.find_by_file(file_id) {
            let id = existing.id;
            self.active_tab_id = Some(id);
            return id;
        }

        let id = TabId::new();
        self.tabs.push(Tab {
            id,
            file_id,
            file_name: file_name.into(),
        });
        self.active_tab_id = Some(id);
        id
    }

    /// Close a tab. If it was active, the last remaining tab becomes
    /// active (not its neighbor). Returns false for unknown ids.
    pub fn close_tab(&mut self, tab_id: TabId) -> bool {
        let Some(position) = self.tabs.iter().position(|tab| tab.id == tab_id) else {
            return false;
        };
        self.tabs.remove(position);

        if self.active_tab_id == Some(tab_id) {
            self.active_tab_id = self.tabs.last().map(|tab| tab.id);
        }
        true
    }

    /// Set the active tab without checking that `tab_id` is open.
    pub fn set_active_tab(&mut self, tab_id: TabId) -> bool {
        let changed = self.active_tab_id != Some(tab_id);
        self.active_tab_id = Some(tab_id);
        changed
    }
}
