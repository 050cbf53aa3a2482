use super::arena::{FileTree, NodeId};

/// First interior node whose size differs from the sum of its children, if any.
/// A child sum that does not fit in a `u64` counts as a mismatch.
pub fn find_size_mismatch(tree: &FileTree) -> Option<NodeId> {
    tree.nodes.iter().enumerate().find_map(|(i, node)| {
        if node.children.is_empty() {
            return None;
        }
        let total = node
            .children
            .iter()
            .try_fold(0u64, |sum, &c| sum.checked_add(tree.get(c).size));
        (total != Some(node.size)).then_some(NodeId(i as u32))
    })
}

/// Children of `parent` ordered by size, largest first. Ties keep insertion order.
pub fn children_by_size(tree: &FileTree, parent: NodeId) -> Vec<NodeId> {
    let mut children: Vec<NodeId> = tree.children(parent).collect();
    children.sort_by_key(|&id| std::cmp::Reverse(tree.get(id).size));
    children
}
