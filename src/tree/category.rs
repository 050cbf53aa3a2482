use serde::{Deserialize, Serialize};

use super::arena::FileTree;
use crate::scanner::types::ScanReport;

/// Name of the synthetic root that holds every category subtree.
pub const ALL_CATEGORIES: &str = "All Categories";

/// Top-level grouping of the analysed data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Files,
    Recycle,
    Logs,
    Duplicates,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Files,
        Category::Recycle,
        Category::Logs,
        Category::Duplicates,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Files => "files",
            Category::Recycle => "recycle",
            Category::Logs => "logs",
            Category::Duplicates => "duplicates",
        }
    }

    /// Display name of the category's subtree root.
    pub fn label(self) -> &'static str {
        match self {
            Category::Files => "Files by Directory",
            Category::Recycle => "Recycle Bins",
            Category::Logs => "Log Files",
            Category::Duplicates => "Duplicate Files (wasted)",
        }
    }
}

/// Graft each category hierarchy under a synthetic root and tag every node
/// of a subtree with its category.
///
/// Subtrees with no size are skipped. The root's size is the sum of the
/// surviving subtree roots; the root itself carries no category.
pub fn assemble(subtrees: Vec<(Category, FileTree)>) -> FileTree {
    let mut unified = FileTree::new(ALL_CATEGORIES);

    for (category, mut subtree) in subtrees {
        let sub_root = subtree.root;
        if subtree.get(sub_root).size == 0 {
            tracing::debug!("Skipping empty category '{}'", category.as_str());
            continue;
        }
        let root = unified.root;
        let Some(total) = unified.get(root).size.checked_add(subtree.get(sub_root).size) else {
            tracing::warn!("Skipping category '{}': total size would overflow", category.as_str());
            continue;
        };
        subtree.get_mut(sub_root).name = category.label().into();

        let first = unified.len();
        unified.graft(root, subtree);
        for node in &mut unified.nodes[first..] {
            node.category = Some(category);
        }
        unified.get_mut(root).size = total;
    }

    tracing::info!(
        "Assembled {} categories into '{}' ({} nodes)",
        unified.get(unified.root).children.len(),
        ALL_CATEGORIES,
        unified.len()
    );
    unified
}

/// Build every category present in a scan report and assemble them.
pub fn build_categories(report: &ScanReport) -> FileTree {
    let mut subtrees = Vec::new();
    if let Some(files) = &report.large_files {
        subtrees.push((Category::Files, super::build_directory_tree(files)));
    }
    if let Some(bins) = &report.recycle_bins {
        subtrees.push((Category::Recycle, super::build_recycle_tree(bins)));
    }
    if let Some(logs) = &report.logs {
        subtrees.push((Category::Logs, super::build_log_tree(logs)));
    }
    if let Some(groups) = &report.duplicates {
        subtrees.push((Category::Duplicates, super::build_duplicate_tree(groups)));
    }
    assemble(subtrees)
}
