// State management module.
// The session core (tree store, tab manager, reducer) plus per-pane UI state.

pub mod editor;
pub mod explorer;
pub mod ids;
pub mod session;
pub mod tabs;
pub mod tree;

pub use editor::EditorState;
pub use explorer::ExplorerState;
pub use ids::{NodeId, TabId};
pub use session::{Command, DispatchResult, SessionState, Store, Subscriber, reduce};
pub use tabs::{Tab, TabManager};
pub use tree::{FILE_EXTENSION, Node, NodeKind, TreeStore, VisibleRow, normalize_file_name};
