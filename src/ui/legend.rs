use std::collections::HashMap;

use crate::render::colors::{category_palette, extension_color, AppColor, ColorMode};
use crate::tree::arena::{FileTree, NodeId};
use crate::tree::category::Category;
use crate::tree::extensions::extension_of;

/// Extensions shown in the file-type legend.
const MAX_LEGEND_EXTENSIONS: usize = 10;

/// Label used for leaves without an extension.
const NO_EXTENSION: &str = "other";

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: AppColor,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Legend {
    Swatches(Vec<LegendEntry>),
    /// The heat ramp has no discrete entries
    Caption(&'static str),
}

/// Legend for the current view under `mode`.
pub fn build_legend(tree: &FileTree, current: NodeId, mode: ColorMode) -> Legend {
    match mode {
        ColorMode::Category => Legend::Swatches(
            Category::ALL
                .iter()
                .map(|&c| LegendEntry {
                    label: c.as_str().to_string(),
                    color: AppColor::from_hex(category_palette(c)[0]),
                })
                .collect(),
        ),
        ColorMode::FileType => Legend::Swatches(
            extension_totals(tree, current)
                .into_iter()
                .take(MAX_LEGEND_EXTENSIONS)
                .map(|(ext, _)| {
                    let color = extension_color(if ext == NO_EXTENSION { "" } else { ext.as_str() });
                    LegendEntry {
                        label: format!(".{ext}"),
                        color,
                    }
                })
                .collect(),
        ),
        ColorMode::SizeHeat => Legend::Caption("Warmer = larger"),
    }
}

/// Bytes per extension over all leaves below `current`, largest first.
pub fn extension_totals(tree: &FileTree, current: NodeId) -> Vec<(String, u64)> {
    let mut totals: HashMap<String, u64> = HashMap::new();
    let mut stack: Vec<NodeId> = tree.children(current).collect();

    while let Some(id) = stack.pop() {
        let node = tree.get(id);
        if node.has_children() {
            stack.extend(tree.children(id));
            continue;
        }
        let mut ext = extension_of(&node.name);
        if ext.is_empty() {
            ext = NO_EXTENSION.to_string();
        }
        *totals.entry(ext).or_default() += node.size;
    }

    let mut sorted: Vec<(String, u64)> = totals.into_iter().collect();
    sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::types::FileRecord;
    use crate::tree::build_directory_tree;

    fn record(path: &str, size: u64) -> FileRecord {
        FileRecord {
            path: path.into(),
            size,
            modified: None,
        }
    }

    #[test]
    fn extension_totals_rank_by_bytes() {
        let tree = build_directory_tree(&[
            record("/v/a.mkv", 500),
            record("/v/sub/b.MKV", 300),
            record("/v/c.iso", 600),
            record("/v/README", 10),
        ]);
        let totals = extension_totals(&tree, tree.root);
        assert_eq!(
            totals,
            vec![
                ("mkv".to_string(), 800),
                ("iso".to_string(), 600),
                ("other".to_string(), 10)
            ]
        );

        match build_legend(&tree, tree.root, ColorMode::FileType) {
            Legend::Swatches(entries) => {
                assert_eq!(entries[0].label, ".mkv");
                assert_eq!(entries[0].color.to_hex(), "#74b9ff");
                assert_eq!(entries[2].color.to_hex(), "#636e72");
            }
            other => panic!("unexpected legend {other:?}"),
        }
    }

    #[test]
    fn category_and_heat_legends() {
        let tree = FileTree::new("All Categories");
        match build_legend(&tree, tree.root, ColorMode::Category) {
            Legend::Swatches(entries) => {
                assert_eq!(entries.len(), 4);
                assert_eq!(entries[1].label, "recycle");
                assert_eq!(entries[1].color.to_hex(), "#f39c12");
            }
            other => panic!("unexpected legend {other:?}"),
        }
        assert_eq!(
            build_legend(&tree, tree.root, ColorMode::SizeHeat),
            Legend::Caption("Warmer = larger")
        );
    }
}
