// Tree store for files and folders.
// Nodes live in one flat ordered collection; parent links are weak ids and
// child lookups go through a derived index kept in step with the collection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::ids::NodeId;

/// Suffix every file name is normalized to end with.
pub const FILE_EXTENSION: &str = ".txt";

/// Discriminant for the two node variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    File,
    Folder,
}

impl NodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::File => "file",
            NodeKind::Folder => "folder",
        }
    }
}

/// A file or folder entry in the explorer tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    File {
        id: NodeId,
        name: String,
        content: String,
        parent_id: Option<NodeId>,
    },
    Folder {
        id: NodeId,
        name: String,
        is_expanded: bool,
        parent_id: Option<NodeId>,
    },
}

impl Node {
    pub fn id(&self) -> NodeId {
        match self {
            Node::File { id, .. } | Node::Folder { id, .. } => *id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Node::File { name, .. } | Node::Folder { name, .. } => name,
        }
    }

    pub fn parent_id(&self) -> Option<NodeId> {
        match self {
            Node::File { parent_id, .. } | Node::Folder { parent_id, .. } => *parent_id,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::File { .. } => NodeKind::File,
            Node::Folder { .. } => NodeKind::Folder,
        }
    }

    /// File content, or `None` for folders.
    pub fn content(&self) -> Option<&str> {
        match self {
            Node::File { content, .. } => Some(content),
            Node::Folder { .. } => None,
        }
    }

    /// Expansion flag, or `None` for files.
    pub fn is_expanded(&self) -> Option<bool> {
        match self {
            Node::File { .. } => None,
            Node::Folder { is_expanded, .. } => Some(*is_expanded),
        }
    }
}

/// Append [`FILE_EXTENSION`] unless the name already ends with it.
pub fn normalize_file_name(name: &str) -> String {
    if name.ends_with(FILE_EXTENSION) {
        name.to_string()
    } else {
        format!("{}{}", name, FILE_EXTENSION)
    }
}

/// A row of the flattened explorer view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRow {
    pub id: NodeId,
    /// Zero for roots.
    pub depth: usize,
}

/// Owns every node. Serializes as a plain list of nodes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Node>", into = "Vec<Node>")]
pub struct TreeStore {
    nodes: Vec<Node>,
    /// Node id to its position in `nodes`.
    positions: HashMap<NodeId, usize>,
    /// Parent id (None for roots) to child ids in insertion order.
    children: HashMap<Option<NodeId>, Vec<NodeId>>,
}

impl TreeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from an existing node list, rebuilding the indexes.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        let mut store = Self {
            nodes,
            positions: HashMap::new(),
            children: HashMap::new(),
        };
        for position in 0..store.nodes.len() {
            store.index(position);
        }
        store
    }

    fn index(&mut self, position: usize) {
        let node = &self.nodes[position];
        let id = node.id();
        // First occurrence wins for duplicated ids in restored data.
        if self.positions.contains_key(&id) {
            return;
        }
        self.positions.insert(id, position);
        self.children.entry(node.parent_id()).or_default().push(id);
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.positions.get(&id).map(|&position| &self.nodes[position])
    }

    fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let position = *self.positions.get(&id)?;
        self.nodes.get_mut(position)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Children of `parent_id` (roots for `None`), in creation order.
    pub fn children(&self, parent_id: Option<NodeId>) -> impl Iterator<Item = &Node> + '_ {
        self.children
            .get(&parent_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.get(*id))
    }

    /// Append a new expanded folder. Names are not checked for uniqueness.
    pub fn create_folder(&mut self, name: impl Into<String>, parent_id: Option<NodeId>) -> NodeId {
        let id = NodeId::new();
        self.push(Node::Folder {
            id,
            name: name.into(),
            is_expanded: true,
            parent_id,
        });
        id
    }

    /// Append a new empty file, normalizing its name to end with `.txt`.
    pub fn create_file(&mut self, name: &str, parent_id: Option<NodeId>) -> NodeId {
        let id = NodeId::new();
        self.push(Node::File {
            id,
            name: normalize_file_name(name),
            content: String::new(),
            parent_id,
        });
        id
    }

    fn push(&mut self, node: Node) {
        self.nodes.push(node);
        self.index(self.nodes.len() - 1);
    }

    /// Flip expansion of a folder. Returns false when `id` is not a folder.
    pub fn toggle_folder(&mut self, id: NodeId) -> bool {
        match self.get_mut(id) {
            Some(Node::Folder { is_expanded, .. }) => {
                *is_expanded = !*is_expanded;
                true
            }
            Some(Node::File { .. }) | None => false,
        }
    }

    /// Replace a file's content. Returns true only if the content changed.
    pub fn update_file_content(&mut self, id: NodeId, new_content: impl Into<String>) -> bool {
        match self.get_mut(id) {
            Some(Node::File { content, .. }) => {
                let new_content = new_content.into();
                if *content == new_content {
                    return false;
                }
                *content = new_content;
                true
            }
            Some(Node::Folder { .. }) | None => false,
        }
    }

    /// Depth-first projection of the tree as the explorer shows it.
    /// Children of collapsed folders are skipped; nodes whose parent does
    /// not resolve are unreachable and never listed.
    pub fn visible_rows(&self) -> Vec<VisibleRow> {
        let mut rows = Vec::new();
        self.collect_rows(None, 0, &mut rows);
        rows
    }

    fn collect_rows(&self, parent_id: Option<NodeId>, depth: usize, rows: &mut Vec<VisibleRow>) {
        for node in self.children(parent_id) {
            rows.push(VisibleRow {
                id: node.id(),
                depth,
            });
            match node {
                Node::Folder {
                    is_expanded: true,
                    id,
                    ..
                } => self.collect_rows(Some(*id), depth + 1, rows),
                Node::Folder { .. } | Node::File { .. } => {}
            }
        }
    }
}

impl PartialEq for TreeStore {
    fn eq(&self, other: &Self) -> bool {
        self.nodes == other.nodes
    }
}

impl Eq for TreeStore {}

impl From<Vec<Node>> for TreeStore {
    fn from(nodes: Vec<Node>) -> Self {
        Self::from_nodes(nodes)
    }
}

impl From<TreeStore> for Vec<Node> {
    fn from(store: TreeStore) -> Self {
        store.nodes
    }
}
