use crate::tree::arena::{FileTree, NodeId};

/// Information to display in the tooltip when hovering over a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipInfo {
    pub name: String,
    pub size_display: String,
    /// Source path, empty for synthetic nodes
    pub path: String,
    /// Metadata fields joined with " | "
    pub meta: String,
}

/// Build tooltip info for a node.
pub fn build_tooltip(tree: &FileTree, node_id: NodeId) -> TooltipInfo {
    let node = tree.get(node_id);
    let mut meta = Vec::new();

    if let Some(m) = &node.meta {
        if let Some(modified) = m.modified.as_deref().filter(|s| !s.is_empty()) {
            meta.push(format!("Modified: {modified}"));
        }
        if let Some(count) = m.file_count.filter(|&c| c > 0) {
            meta.push(format!("Files: {count}"));
        }
        match m.safe_to_clean {
            Some(true) => meta.push("✓ Safe to clean".to_string()),
            Some(false) => meta.push("⚠ Review before cleaning".to_string()),
            None => {}
        }
    }
    if node.has_children() {
        meta.push(format!("{} items", node.children.len()));
    }

    TooltipInfo {
        name: node.name.to_string(),
        size_display: format_size(node.size),
        path: node.path.clone().unwrap_or_default(),
        meta: meta.join(" | "),
    }
}

/// Format bytes into human-readable size string.
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * KB;
    const GB: u64 = 1024 * MB;
    const TB: u64 = 1024 * GB;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
