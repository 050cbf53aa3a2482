use crate::error::NavError;
use crate::tree::arena::{FileNode, FileTree, NodeId};

/// Navigation state: tracks the node being laid out and the chain of
/// previously viewed nodes. Never touches the tree itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    /// Stack of view roots (for back navigation)
    history: Vec<NodeId>,
    /// Current view root
    current: NodeId,
}

impl NavigationState {
    pub fn new(root: NodeId) -> Self {
        Self {
            history: Vec::new(),
            current: root,
        }
    }

    pub fn current(&self) -> NodeId {
        self.current
    }

    pub fn is_at_root(&self) -> bool {
        self.history.is_empty()
    }

    /// Current depth in navigation history.
    pub fn depth(&self) -> usize {
        self.history.len()
    }

    /// Drill down into a node that has children.
    /// Leaves and IDs from another tree are rejected.
    pub fn drill_down(&mut self, node: NodeId, tree: &FileTree) -> Result<(), NavError> {
        if !tree.try_get(node).is_some_and(FileNode::has_children) {
            return Err(NavError::NotDrillable(node));
        }
        self.history.push(self.current);
        self.current = node;
        Ok(())
    }

    /// Navigate up one level. Returns the new current node.
    pub fn drill_up(&mut self) -> Result<NodeId, NavError> {
        let prev = self.history.pop().ok_or(NavError::AtRoot)?;
        self.current = prev;
        Ok(prev)
    }

    /// Pop history down to `index`, making that breadcrumb entry current.
    /// `index == depth()` names the current node and changes nothing.
    pub fn jump_to(&mut self, index: usize) -> Result<NodeId, NavError> {
        let depth = self.history.len();
        if index > depth {
            return Err(NavError::InvalidIndex { index, depth });
        }
        while self.history.len() > index {
            self.drill_up()?;
        }
        Ok(self.current)
    }

    /// Start over at `root`, e.g. when another category is selected.
    pub fn reset(&mut self, root: NodeId) {
        self.history.clear();
        self.current = root;
    }

    /// History followed by the current node.
    pub fn breadcrumb(&self) -> Vec<NodeId> {
        let mut trail = self.history.clone();
        trail.push(self.current);
        trail
    }

    /// Breadcrumb labels, e.g. for a "All Categories / Files by Directory / volume1" bar.
    pub fn breadcrumb_names(&self, tree: &FileTree) -> Vec<String> {
        self.breadcrumb()
            .into_iter()
            .map(|id| tree.get(id).name.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree() -> FileTree {
        let mut tree = FileTree::new("root");
        let a = tree.add_child(tree.root, FileNode::group("a"));
        let b = tree.add_child(a, FileNode::group("b"));
        tree.add_child(b, FileNode::leaf("f", 1, Some("/a/b/f".into()), None));
        tree
    }

    #[test]
    fn drill_down_then_up_restores_previous_node() {
        let tree = tree();
        let a = tree.find("a").unwrap();
        let mut nav = NavigationState::new(tree.root);

        nav.drill_down(a, &tree).unwrap();
        assert_eq!(nav.current(), a);
        assert_eq!(nav.depth(), 1);

        assert_eq!(nav.drill_up(), Ok(tree.root));
        assert_eq!(nav.current(), tree.root);
        assert!(nav.is_at_root());
    }

    #[test]
    fn childless_node_is_rejected_without_state_change() {
        let tree = tree();
        let leaf = tree.find("a/b/f").unwrap();
        let mut nav = NavigationState::new(tree.root);
        let before = nav.clone();

        assert_eq!(nav.drill_down(leaf, &tree), Err(NavError::NotDrillable(leaf)));
        assert_eq!(nav, before);
    }

    #[test]
    fn node_from_another_tree_is_rejected() {
        let tree = tree();
        let mut nav = NavigationState::new(tree.root);
        let stray = NodeId(tree.len() as u32 + 10);

        assert_eq!(nav.drill_down(stray, &tree), Err(NavError::NotDrillable(stray)));
        assert!(nav.is_at_root());
    }

    #[test]
    fn drill_up_at_root_is_rejected() {
        let tree = tree();
        let mut nav = NavigationState::new(tree.root);
        assert_eq!(nav.drill_up(), Err(NavError::AtRoot));
        assert_eq!(nav.current(), tree.root);
    }

    #[test]
    fn jump_to_pops_to_breadcrumb_entry() {
        let tree = tree();
        let a = tree.find("a").unwrap();
        let b = tree.find("a/b").unwrap();
        let mut nav = NavigationState::new(tree.root);
        nav.drill_down(a, &tree).unwrap();
        nav.drill_down(b, &tree).unwrap();
        assert_eq!(nav.breadcrumb(), vec![tree.root, a, b]);
        assert_eq!(nav.breadcrumb_names(&tree), vec!["root", "a", "b"]);

        assert_eq!(nav.jump_to(2), Ok(b));
        assert_eq!(
            nav.jump_to(5),
            Err(NavError::InvalidIndex { index: 5, depth: 2 })
        );

        assert_eq!(nav.jump_to(1), Ok(a));
        assert_eq!(nav.breadcrumb(), vec![tree.root, a]);
        assert_eq!(nav.jump_to(0), Ok(tree.root));
        assert!(nav.is_at_root());
    }

    #[test]
    fn reset_clears_history() {
        let tree = tree();
        let a = tree.find("a").unwrap();
        let b = tree.find("a/b").unwrap();
        let mut nav = NavigationState::new(tree.root);
        nav.drill_down(a, &tree).unwrap();

        nav.reset(b);
        assert_eq!(nav.current(), b);
        assert!(nav.is_at_root());
    }
}
