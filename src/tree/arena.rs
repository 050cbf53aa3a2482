use compact_str::CompactString;

use super::category::Category;

/// Index into the arena `Vec<FileNode>`. Uses u32 to save memory (supports up to ~4 billion nodes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Auxiliary display fields carried by leaves. Never interpreted by layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeMeta {
    pub modified: Option<String>,
    pub file_count: Option<u64>,
    pub safe_to_clean: Option<bool>,
    /// Sample member paths of a duplicate group
    pub files: Vec<String>,
}

impl NodeMeta {
    pub fn is_empty(&self) -> bool {
        self.modified.is_none()
            && self.file_count.is_none()
            && self.safe_to_clean.is_none()
            && self.files.is_empty()
    }
}

/// A single node in the hierarchy, stored in a flat arena.
#[derive(Debug, Clone)]
pub struct FileNode {
    /// Display label (directory, file basename, or synthetic group label)
    pub name: CompactString,
    /// Size in bytes. For leaves: the record size. For interior nodes: sum of children.
    pub size: u64,
    /// Full source path, only on leaves backed by a real filesystem object
    pub path: Option<String>,
    /// Top-level grouping, stamped on every node below the synthetic root
    pub category: Option<Category>,
    pub meta: Option<NodeMeta>,
    /// Parent node index (None for root)
    pub parent: Option<NodeId>,
    /// Children in insertion order; layout sorts a copy by size
    pub children: Vec<NodeId>,
    /// Depth in the tree (root = 0)
    pub depth: u16,
}

impl FileNode {
    /// An interior (aggregation) node with no size yet.
    pub fn group(name: &str) -> Self {
        Self {
            name: CompactString::new(name),
            size: 0,
            path: None,
            category: None,
            meta: None,
            parent: None,
            children: Vec::new(),
            depth: 0,
        }
    }

    pub fn leaf(name: &str, size: u64, path: Option<String>, meta: Option<NodeMeta>) -> Self {
        Self {
            size,
            path,
            meta,
            ..Self::group(name)
        }
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// The hierarchy stored as a flat arena of nodes.
///
/// Parents are always pushed before their children, so iterating the arena in
/// reverse visits every child before its parent.
#[derive(Debug, Clone)]
pub struct FileTree {
    /// All nodes in contiguous memory
    pub nodes: Vec<FileNode>,
    /// Root node index
    pub root: NodeId,
}

impl FileTree {
    /// Create an empty tree with a root node.
    pub fn new(root_name: &str) -> Self {
        FileTree {
            nodes: vec![FileNode::group(root_name)],
            root: NodeId(0),
        }
    }

    /// Add a child node under the given parent. Returns the new node's ID.
    pub fn add_child(&mut self, parent: NodeId, mut node: FileNode) -> NodeId {
        let new_id = NodeId(self.nodes.len() as u32);
        node.parent = Some(parent);
        node.depth = self.nodes[parent.index()].depth + 1;
        self.nodes[parent.index()].children.push(new_id);
        self.nodes.push(node);
        new_id
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> &FileNode {
        &self.nodes[id.index()]
    }

    /// Get a node by ID, or `None` if the ID does not belong to this tree.
    pub fn try_get(&self, id: NodeId) -> Option<&FileNode> {
        self.nodes.get(id.index())
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> &mut FileNode {
        &mut self.nodes[id.index()]
    }

    /// Total number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty (only root).
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Iterate over children of a node.
    pub fn children(&self, parent: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[parent.index()].children.iter().copied()
    }

    /// Find a direct child by display name.
    pub fn child_named(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent).find(|&id| self.get(id).name.as_str() == name)
    }

    /// Resolve a slash-delimited chain of child names starting at the root.
    pub fn find(&self, names: &str) -> Option<NodeId> {
        names
            .split('/')
            .filter(|part| !part.is_empty())
            .try_fold(self.root, |node, part| self.child_named(node, part))
    }

    /// Ancestors from the root down to (excluding) `id`.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = Vec::new();
        let mut current = self.get(id).parent;
        while let Some(parent) = current {
            chain.push(parent);
            current = self.get(parent).parent;
        }
        chain.reverse();
        chain
    }

    /// Copy another tree under `parent`, preserving its structure. Returns the
    /// new ID of `other`'s root.
    pub fn graft(&mut self, parent: NodeId, other: FileTree) -> NodeId {
        let offset = self.nodes.len() as u32;
        let base_depth = self.get(parent).depth + 1;
        let remap = |id: NodeId| NodeId(id.0 + offset);
        let grafted_root = remap(other.root);

        for mut node in other.nodes {
            node.parent = match node.parent {
                Some(p) => Some(remap(p)),
                None => Some(parent),
            };
            node.depth += base_depth;
            for child in node.children.iter_mut() {
                *child = remap(*child);
            }
            self.nodes.push(node);
        }

        self.nodes[parent.index()].children.push(grafted_root);
        grafted_root
    }
}
