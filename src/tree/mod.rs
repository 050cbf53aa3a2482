pub mod aggregate;
pub mod arena;
pub mod category;
pub mod extensions;

use std::collections::HashMap;

use self::arena::{FileNode, FileTree, NodeId, NodeMeta};
use crate::scanner::types::{DuplicateGroup, FileRecord, LogEntry, RecycleBin};
use crate::ui::tooltip::format_size;

/// Number of member paths kept on a duplicate-group node.
const DUPLICATE_SAMPLE_FILES: usize = 5;

/// Split a slash-delimited path into its non-empty components.
fn path_components(path: &str) -> Vec<&str> {
    path.split('/').filter(|part| !part.is_empty()).collect()
}

/// Build a directory hierarchy from a flat list of file records.
///
/// Every path component except the last becomes a directory node, and each
/// record's size is added to all of its ancestors as it is inserted. Records
/// with zero size or an empty path are dropped. A later record with the same
/// normalized path replaces the earlier one instead of being counted twice.
pub fn build_directory_tree(records: &[FileRecord]) -> FileTree {
    let mut tree = FileTree::new("/");
    // Normalized path ("a/b/f") → node
    let mut path_map: HashMap<String, NodeId> = HashMap::new();
    let mut dropped = 0usize;

    for record in records {
        let parts = path_components(&record.path);
        if record.size == 0 || parts.is_empty() {
            dropped += 1;
            continue;
        }

        let meta = NodeMeta {
            modified: record.modified.clone(),
            ..NodeMeta::default()
        };
        let leaf_key = parts.join("/");

        if let Some(&existing) = path_map.get(&leaf_key) {
            if tree.get(existing).path.is_none() {
                tracing::debug!("Dropping '{}': path names an existing directory", record.path);
                dropped += 1;
                continue;
            }
            if !replace_leaf(&mut tree, existing, record.size, Some(record.path.clone()), meta) {
                tracing::debug!("Dropping '{}': total size would overflow", record.path);
                dropped += 1;
            }
            continue;
        }

        // Directory prefixes must not already be leaves
        let dir_count = parts.len() - 1;
        let blocked = (1..=dir_count).any(|n| {
            path_map
                .get(&parts[..n].join("/"))
                .is_some_and(|&id| tree.get(id).path.is_some())
        });
        if blocked {
            tracing::debug!("Dropping '{}': a parent component is a file", record.path);
            dropped += 1;
            continue;
        }

        // Every directory is at most as large as the root, so only the root can overflow
        let root = tree.root;
        let Some(total) = tree.get(root).size.checked_add(record.size) else {
            tracing::debug!("Dropping '{}': total size would overflow", record.path);
            dropped += 1;
            continue;
        };
        tree.get_mut(root).size = total;

        let mut parent = root;
        for n in 1..=dir_count {
            let key = parts[..n].join("/");
            let dir = match path_map.get(&key) {
                Some(&id) => id,
                None => {
                    let id = tree.add_child(parent, FileNode::group(parts[n - 1]));
                    path_map.insert(key, id);
                    id
                }
            };
            tree.get_mut(dir).size += record.size;
            parent = dir;
        }

        let leaf = FileNode::leaf(
            parts[dir_count],
            record.size,
            Some(record.path.clone()),
            Some(meta),
        );
        let id = tree.add_child(parent, leaf);
        path_map.insert(leaf_key, id);
    }

    tracing::info!(
        "Directory tree built: {} nodes, {} total, {} records dropped",
        tree.len(),
        format_size(tree.get(tree.root).size),
        dropped
    );
    tree
}

/// Overwrite a leaf's size and metadata, moving the size delta through its ancestors.
/// Returns false, leaving the tree untouched, if the root total would overflow.
fn replace_leaf(
    tree: &mut FileTree,
    leaf: NodeId,
    size: u64,
    path: Option<String>,
    meta: NodeMeta,
) -> bool {
    let old = tree.get(leaf).size;
    if (tree.get(tree.root).size - old).checked_add(size).is_none() {
        return false;
    }
    for ancestor in tree.ancestors(leaf) {
        let node = tree.get_mut(ancestor);
        node.size = node.size - old + size;
    }
    let node = tree.get_mut(leaf);
    node.size = size;
    node.path = path;
    node.meta = (!meta.is_empty()).then_some(meta);
    true
}

/// One-level grouping keyed by a natural identity (share name, log path,
/// duplicate group). Same last-write-wins policy as the directory builder.
struct GroupBuilder {
    tree: FileTree,
    by_key: HashMap<String, NodeId>,
    dropped: usize,
}

impl GroupBuilder {
    fn new(root_name: &str) -> Self {
        Self {
            tree: FileTree::new(root_name),
            by_key: HashMap::new(),
            dropped: 0,
        }
    }

    fn insert(&mut self, key: String, node: FileNode) {
        if node.size == 0 || key.is_empty() {
            self.dropped += 1;
            return;
        }

        if let Some(&existing) = self.by_key.get(&key) {
            let meta = node.meta.unwrap_or_default();
            if replace_leaf(&mut self.tree, existing, node.size, node.path, meta) {
                self.tree.get_mut(existing).name = node.name;
            } else {
                tracing::debug!("Dropping '{}': total size would overflow", key);
                self.dropped += 1;
            }
            return;
        }

        let root = self.tree.root;
        let Some(total) = self.tree.get(root).size.checked_add(node.size) else {
            tracing::debug!("Dropping '{}': total size would overflow", key);
            self.dropped += 1;
            return;
        };
        self.tree.get_mut(root).size = total;
        let id = self.tree.add_child(root, node);
        self.by_key.insert(key, id);
    }

    fn finish(self) -> FileTree {
        tracing::info!(
            "Group '{}' built: {} entries, {} total, {} records dropped",
            self.tree.get(self.tree.root).name,
            self.tree.len() - 1,
            format_size(self.tree.get(self.tree.root).size),
            self.dropped
        );
        self.tree
    }
}

/// Recycle bins, one leaf per share.
pub fn build_recycle_tree(bins: &[RecycleBin]) -> FileTree {
    let mut builder = GroupBuilder::new("Recycle Bins");
    for bin in bins {
        let name = format!("{}/#recycle", bin.share);
        let meta = NodeMeta {
            file_count: Some(bin.file_count),
            ..NodeMeta::default()
        };
        builder.insert(
            bin.share.clone(),
            FileNode::leaf(&name, bin.size_bytes, None, Some(meta)),
        );
    }
    builder.finish()
}

/// Oversized logs, one leaf per log path labelled by its basename.
pub fn build_log_tree(logs: &[LogEntry]) -> FileTree {
    let mut builder = GroupBuilder::new("Log Files");
    for log in logs {
        let name = path_components(&log.path).last().copied().unwrap_or(&log.path);
        let meta = NodeMeta {
            safe_to_clean: Some(log.safe_to_clean),
            ..NodeMeta::default()
        };
        builder.insert(
            log.path.clone(),
            FileNode::leaf(name, log.size_bytes, Some(log.path.clone()), Some(meta)),
        );
    }
    builder.finish()
}

/// Duplicate groups sized by their wasted bytes.
pub fn build_duplicate_tree(groups: &[DuplicateGroup]) -> FileTree {
    let mut builder = GroupBuilder::new("Duplicate Files (wasted)");
    for (i, group) in groups.iter().enumerate() {
        let copies = if group.files.is_empty() {
            group.count
        } else {
            group.files.len() as u64
        };
        let name = format!("{} copies ({} each)", copies, format_size(group.size));
        let meta = NodeMeta {
            files: group
                .files
                .iter()
                .take(DUPLICATE_SAMPLE_FILES)
                .cloned()
                .collect(),
            ..NodeMeta::default()
        };
        let key = group.hash.clone().unwrap_or_else(|| format!("#{i}"));
        builder.insert(key, FileNode::leaf(&name, group.wasted, None, Some(meta)));
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::aggregate::find_size_mismatch;
    use super::*;

    fn record(path: &str, size: u64) -> FileRecord {
        FileRecord {
            path: path.to_string(),
            size,
            modified: None,
        }
    }

    #[test]
    fn builds_nested_directories_with_summed_sizes() {
        let tree = build_directory_tree(&[
            record("/a/b/f1", 100),
            record("/a/c/f2", 300),
            record("/a/f3", 100),
        ]);

        let a = tree.find("a").expect("a");
        assert_eq!(tree.get(tree.root).size, 500);
        assert_eq!(tree.get(a).size, 500);
        assert_eq!(tree.get(tree.find("a/b").unwrap()).size, 100);
        assert_eq!(tree.get(tree.find("a/c").unwrap()).size, 300);

        let f3 = tree.find("a/f3").unwrap();
        assert_eq!(tree.get(f3).size, 100);
        assert_eq!(tree.get(f3).path.as_deref(), Some("/a/f3"));
        assert!(tree.get(a).path.is_none());
        assert_eq!(find_size_mismatch(&tree), None);
    }

    #[test]
    fn drops_empty_and_zero_sized_records() {
        let tree = build_directory_tree(&[record("", 10), record("///", 10), record("/x/y", 0)]);
        assert!(tree.is_empty());
        assert_eq!(tree.get(tree.root).size, 0);
    }

    #[test]
    fn same_path_overwrites_instead_of_double_counting() {
        let tree = build_directory_tree(&[
            record("/d/file", 100),
            record("d//file", 40),
            record("/d/other", 10),
        ]);

        let d = tree.find("d").unwrap();
        assert_eq!(tree.get(d).children.len(), 2);
        assert_eq!(tree.get(tree.find("d/file").unwrap()).size, 40);
        assert_eq!(tree.get(d).size, 50);
        assert_eq!(tree.get(tree.root).size, 50);
        assert_eq!(find_size_mismatch(&tree), None);
    }

    #[test]
    fn file_and_directory_conflicts_are_dropped() {
        let tree = build_directory_tree(&[
            record("/a/f", 10),
            record("/a/f/inner", 20),
            record("/b/c/d", 5),
            record("/b/c", 7),
        ]);

        assert_eq!(tree.get(tree.root).size, 15);
        assert!(tree.find("a/f/inner").is_none());
        assert!(tree.get(tree.find("b/c").unwrap()).path.is_none());
        assert_eq!(find_size_mismatch(&tree), None);
    }

    #[test]
    fn deep_paths_keep_aggregation_invariant() {
        let records: Vec<FileRecord> = (0..50)
            .map(|i| record(&format!("/r/{}/{}/{}/leaf{i}", i % 3, i % 5, i % 7), i + 1))
            .collect();
        let tree = build_directory_tree(&records);

        assert_eq!(tree.get(tree.root).size, (1..=50).sum::<u64>());
        assert_eq!(find_size_mismatch(&tree), None);
    }

    #[test]
    fn recycle_bins_group_by_share() {
        let tree = build_recycle_tree(&[
            RecycleBin {
                share: "photos".into(),
                size_bytes: 2048,
                file_count: 3,
            },
            RecycleBin {
                share: "video".into(),
                size_bytes: 0,
                file_count: 0,
            },
            RecycleBin {
                share: "photos".into(),
                size_bytes: 1024,
                file_count: 1,
            },
        ]);

        assert_eq!(tree.get(tree.root).children.len(), 1);
        let only = tree.get(tree.root).children[0];
        assert_eq!(tree.get(only).name.as_str(), "photos/#recycle");
        assert_eq!(tree.get(only).size, 1024);
        assert_eq!(tree.get(only).meta.as_ref().unwrap().file_count, Some(1));
        assert_eq!(tree.get(tree.root).size, 1024);
    }

    #[test]
    fn logs_are_labelled_by_basename() {
        let tree = build_log_tree(&[LogEntry {
            path: "/var/log/messages".into(),
            size_bytes: 500,
            safe_to_clean: true,
        }]);

        let log = tree.child_named(tree.root, "messages").unwrap();
        assert_eq!(tree.get(log).path.as_deref(), Some("/var/log/messages"));
        assert_eq!(tree.get(log).meta.as_ref().unwrap().safe_to_clean, Some(true));
    }

    #[test]
    fn duplicate_groups_sized_by_waste() {
        let files: Vec<String> = (0..7).map(|i| format!("/vol/copy{i}.iso")).collect();
        let tree = build_duplicate_tree(&[DuplicateGroup {
            hash: None,
            size: 1024 * 1024,
            count: 7,
            wasted: 6 * 1024 * 1024,
            files,
        }]);

        let group = tree.get(tree.root).children[0];
        assert_eq!(tree.get(group).name.as_str(), "7 copies (1.0 MB each)");
        assert_eq!(tree.get(group).size, 6 * 1024 * 1024);
        assert_eq!(tree.get(group).meta.as_ref().unwrap().files.len(), 5);
        assert!(tree.get(group).path.is_none());
    }

    #[test]
    fn sizes_that_would_overflow_are_dropped() {
        let tree = build_directory_tree(&[record("/a/x", u64::MAX), record("/a/y", 1)]);
        assert_eq!(tree.get(tree.root).size, u64::MAX);
        assert!(tree.find("a/y").is_none());
        assert_eq!(find_size_mismatch(&tree), None);

        // Overwriting with a larger size must not overflow either
        let tree = build_directory_tree(&[
            record("/a/x", u64::MAX - 1),
            record("/b/y", 1),
            record("/b/y", 2),
        ]);
        assert_eq!(tree.get(tree.find("b/y").unwrap()).size, 1);
        assert_eq!(find_size_mismatch(&tree), None);

        let bins = build_recycle_tree(&[
            RecycleBin {
                share: "homes".into(),
                size_bytes: u64::MAX,
                file_count: 1,
            },
            RecycleBin {
                share: "media".into(),
                size_bytes: 1,
                file_count: 1,
            },
        ]);
        assert_eq!(bins.get(bins.root).children.len(), 1);
        assert_eq!(find_size_mismatch(&bins), None);
    }
}
