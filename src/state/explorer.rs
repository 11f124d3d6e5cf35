// Explorer pane state.
// Tracks the selected row of the flattened tree with keyboard navigation.

use ratatui::widgets::ListState;

use super::ids::NodeId;
use super::tree::{TreeStore, VisibleRow};

/// Selection over [`TreeStore::visible_rows`].
#[derive(Debug, Clone, Default)]
pub struct ExplorerState {
    pub list_state: ListState,
    /// Row projection as of the last `sync`.
    rows: Vec<VisibleRow>,
}

impl ExplorerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[VisibleRow] {
        &self.rows
    }

    /// Recompute rows after a state change, keeping the selected node
    /// selected when it is still visible.
    pub fn sync(&mut self, tree: &TreeStore) {
        let selected = self.selected_id();
        self.rows = tree.visible_rows();

        let index = selected
            .and_then(|id| self.rows.iter().position(|row| row.id == id))
            .or_else(|| self.clamped(self.list_state.selected()));
        self.list_state.select(index);
    }

    fn clamped(&self, index: Option<usize>) -> Option<usize> {
        if self.rows.is_empty() {
            return None;
        }
        Some(index.unwrap_or(0).min(self.rows.len() - 1))
    }

    pub fn selected_id(&self) -> Option<NodeId> {
        let index = self.list_state.selected()?;
        self.rows.get(index).map(|row| row.id)
    }

    /// Select a node if it is visible. Returns false otherwise.
    pub fn select_id(&mut self, id: NodeId) -> bool {
        match self.rows.iter().position(|row| row.id == id) {
            Some(index) => {
                self.list_state.select(Some(index));
                true
            }
            None => false,
        }
    }

    /// Select the next row, staying at the end.
    pub fn select_next(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < self.rows.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Select the previous row, staying at the start.
    pub fn select_prev(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }
}
