// Session state and its transition function.
// Every change to nodes or tabs goes through a `Command`; the `Store` owns
// the single live instance and notifies subscribers after each change.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::ids::{NodeId, TabId};
use super::tabs::{Tab, TabManager};
use super::tree::{Node, TreeStore};

/// Everything that survives a restart: the tree plus the tab session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub nodes: TreeStore,
    #[serde(flatten)]
    pub tabs: TabManager,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &[Node] {
        self.nodes.nodes()
    }

    pub fn children(&self, parent_id: Option<NodeId>) -> Vec<&Node> {
        self.nodes.children(parent_id).collect()
    }

    pub fn tabs(&self) -> &[Tab] {
        self.tabs.tabs()
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.tabs.active_tab()
    }

    /// The file shown in the editor pane, if the active tab resolves to one.
    pub fn active_file(&self) -> Option<&Node> {
        let tab = self.active_tab()?;
        match self.nodes.get(tab.file_id)? {
            node @ Node::File { .. } => Some(node),
            Node::Folder { .. } => None,
        }
    }

    /// Apply a command in place.
    pub fn apply(&mut self, command: Command) -> DispatchResult {
        match command {
            Command::CreateFile { name, parent_id } => {
                let id = self.nodes.create_file(&name, parent_id);
                DispatchResult::created(id)
            }
            Command::CreateFolder { name, parent_id } => {
                let id = self.nodes.create_folder(name, parent_id);
                DispatchResult::created(id)
            }
            Command::ToggleFolder(id) => DispatchResult::changed(self.nodes.toggle_folder(id)),
            Command::UpdateFileContent { file_id, content } => {
                DispatchResult::changed(self.nodes.update_file_content(file_id, content))
            }
            Command::OpenTab { file_id, file_name } => {
                let before = (self.tabs.len(), self.tabs.active_tab_id());
                self.tabs.open_tab(file_id, file_name);
                let after = (self.tabs.len(), self.tabs.active_tab_id());
                DispatchResult::changed(before != after)
            }
            Command::CloseTab(id) => DispatchResult::changed(self.tabs.close_tab(id)),
            Command::SetActiveTab(id) => DispatchResult::changed(self.tabs.set_active_tab(id)),
        }
    }
}

/// A state transition requested by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    CreateFile {
        name: String,
        parent_id: Option<NodeId>,
    },
    CreateFolder {
        name: String,
        parent_id: Option<NodeId>,
    },
    ToggleFolder(NodeId),
    UpdateFileContent {
        file_id: NodeId,
        content: String,
    },
    OpenTab {
        file_id: NodeId,
        file_name: String,
    },
    CloseTab(TabId),
    SetActiveTab(TabId),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::CreateFile { .. } => "create_file",
            Command::CreateFolder { .. } => "create_folder",
            Command::ToggleFolder(_) => "toggle_folder",
            Command::UpdateFileContent { .. } => "update_file_content",
            Command::OpenTab { .. } => "open_tab",
            Command::CloseTab(_) => "close_tab",
            Command::SetActiveTab(_) => "set_active_tab",
        }
    }
}

/// Outcome of applying one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchResult {
    pub state_changed: bool,
    /// Id of the node a create command appended.
    pub created: Option<NodeId>,
}

impl DispatchResult {
    fn changed(state_changed: bool) -> Self {
        Self {
            state_changed,
            created: None,
        }
    }

    fn created(id: NodeId) -> Self {
        Self {
            state_changed: true,
            created: Some(id),
        }
    }
}

/// Pure transition: `(state, command) -> state`.
pub fn reduce(mut state: SessionState, command: Command) -> SessionState {
    state.apply(command);
    state
}

/// Callback run after every state-changing dispatch.
pub type Subscriber = Box<dyn FnMut(&SessionState)>;

/// Owns the live session and fans changes out to subscribers.
pub struct Store {
    state: SessionState,
    subscribers: Vec<Subscriber>,
}

impl Store {
    pub fn new(state: SessionState) -> Self {
        Self {
            state,
            subscribers: Vec::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&SessionState) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    pub fn dispatch(&mut self, command: Command) -> DispatchResult {
        let name = command.name();
        let result = self.state.apply(command);

        if result.state_changed {
            debug!(
                command = name,
                nodes = self.state.nodes.len(),
                tabs = self.state.tabs.len(),
                "state changed"
            );
            self.notify();
        } else {
            trace!(command = name, "no-op");
        }
        result
    }

    /// Swap in a whole new state (rehydration) and notify subscribers.
    pub fn replace(&mut self, state: SessionState) {
        self.state = state;
        self.notify();
    }

    fn notify(&mut self) {
        for subscriber in &mut self.subscribers {
            subscriber(&self.state);
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(SessionState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn create_file(state: &mut SessionState, name: &str, parent_id: Option<NodeId>) -> NodeId {
        state
            .apply(Command::CreateFile {
                name: name.to_string(),
                parent_id,
            })
            .created
            .unwrap()
    }

    #[test]
    fn test_reduce_is_pure_over_input() {
        let state = SessionState::new();
        let next = reduce(
            state.clone(),
            Command::CreateFolder {
                name: "docs".to_string(),
                parent_id: None,
            },
        );

        assert!(state.nodes().is_empty());
        assert_eq!(next.nodes().len(), 1);
        assert_eq!(next.nodes()[0].name(), "docs");
    }

    #[test]
    fn test_open_via_command_is_idempotent() {
        let mut state = SessionState::new();
        let file = create_file(&mut state, "notes", None);
        let open = Command::OpenTab {
            file_id: file,
            file_name: "notes.txt".to_string(),
        };

        assert!(state.apply(open.clone()).state_changed);
        let tab = state.active_tab().unwrap().id;
        assert!(!state.apply(open).state_changed);
        assert_eq!(state.tabs().len(), 1);
        assert_eq!(state.tabs.active_tab_id(), Some(tab));
    }

    #[test]
    fn test_active_file_resolves_through_tab() {
        let mut state = SessionState::new();
        assert!(state.active_file().is_none());

        let file = create_file(&mut state, "notes", None);
        state.apply(Command::UpdateFileContent {
            file_id: file,
            content: "hi".to_string(),
        });
        state.apply(Command::OpenTab {
            file_id: file,
            file_name: "notes.txt".to_string(),
        });
        assert_eq!(state.active_file().unwrap().content(), Some("hi"));

        // Tab pointing at a node that does not exist.
        state.apply(Command::OpenTab {
            file_id: NodeId::new(),
            file_name: "ghost.txt".to_string(),
        });
        assert!(state.active_tab().is_some());
        assert!(state.active_file().is_none());
    }

    #[test]
    fn test_update_unknown_file_leaves_nodes_equal() {
        let mut state = SessionState::new();
        create_file(&mut state, "a", None);
        let before = state.nodes.clone();

        let result = state.apply(Command::UpdateFileContent {
            file_id: NodeId::new(),
            content: "x".to_string(),
        });
        assert!(!result.state_changed);
        assert_eq!(state.nodes, before);
    }

    #[test]
    fn test_children_query() {
        let mut state = SessionState::new();
        let docs = state
            .apply(Command::CreateFolder {
                name: "docs".to_string(),
                parent_id: None,
            })
            .created
            .unwrap();
        create_file(&mut state, "a", Some(docs));
        create_file(&mut state, "b", None);

        assert_eq!(state.children(Some(docs)).len(), 1);
        assert_eq!(state.children(None).len(), 2);
    }

    #[test]
    fn test_serialized_layout() {
        let mut state = SessionState::new();
        let file = create_file(&mut state, "a", None);
        state.apply(Command::OpenTab {
            file_id: file,
            file_name: "a.txt".to_string(),
        });

        let json = serde_json::to_value(&state).unwrap();
        assert!(json["nodes"].is_array());
        assert!(json["tabs"].is_array());
        assert_eq!(
            json["active_tab_id"],
            serde_json::to_value(state.tabs.active_tab_id()).unwrap()
        );

        let back: SessionState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_store_notifies_only_on_change() {
        let mut store = Store::default();
        let calls = Rc::new(Cell::new(0));
        let seen = Rc::clone(&calls);
        store.subscribe(move |_| seen.set(seen.get() + 1));

        let folder = store
            .dispatch(Command::CreateFolder {
                name: "docs".to_string(),
                parent_id: None,
            })
            .created
            .unwrap();
        assert_eq!(calls.get(), 1);

        store.dispatch(Command::ToggleFolder(NodeId::new()));
        store.dispatch(Command::CloseTab(TabId::new()));
        assert_eq!(calls.get(), 1);

        store.dispatch(Command::ToggleFolder(folder));
        assert_eq!(calls.get(), 2);

        store.replace(SessionState::new());
        assert_eq!(calls.get(), 3);
        assert!(store.state().nodes().is_empty());
    }
}
