use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::tree::aggregate::children_by_size;
use crate::tree::arena::{FileTree, NodeId};

/// An axis-aligned rectangle in layout units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Shrink by `border` on every side, never below zero size.
    pub fn inset(&self, border: f64) -> Rect {
        Rect {
            x: self.x + border,
            y: self.y + border,
            w: (self.w - 2.0 * border).max(0.0),
            h: (self.h - 2.0 * border).max(0.0),
        }
    }

    /// Half-open containment: the right and bottom edges belong to the neighbour.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    fn is_usable(&self) -> bool {
        [self.x, self.y, self.w, self.h].iter().all(|v| v.is_finite())
            && self.w >= 0.0
            && self.h >= 0.0
    }
}

/// A positioned node in the treemap layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRect {
    pub node: NodeId,
    pub rect: Rect,
    /// 1 for children of the laid-out node, 2 for the nested level below them
    pub depth: u16,
}

impl LayoutRect {
    /// Whether the rectangle is large enough for the presentation layer to draw.
    /// Layout itself never drops rectangles.
    pub fn is_visible(&self, config: &LayoutConfig) -> bool {
        let min_side = if self.depth <= 1 {
            config.min_visible
        } else {
            config.min_visible_nested
        };
        self.rect.w >= min_side && self.rect.h >= min_side
    }
}

/// The full layout result (rects + fast lookup).
#[derive(Debug, Default)]
pub struct Layout {
    /// Parents precede their nested children
    pub rects: Vec<LayoutRect>,
    /// node → index into `rects`
    pub node_to_rect: HashMap<NodeId, usize>,
}

impl Layout {
    pub fn rect_of(&self, node: NodeId) -> Option<&LayoutRect> {
        self.node_to_rect.get(&node).map(|&i| &self.rects[i])
    }

    /// Rectangles of the first level only; these tile the viewport.
    pub fn top_level(&self) -> impl Iterator<Item = &LayoutRect> {
        self.rects.iter().filter(|r| r.depth == 1)
    }
}

/// Configuration for treemap layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Levels below the laid-out node that get their children nested inside them
    pub nest_depth: u16,
    /// A child must be wider than this to host its own children
    pub nest_min_width: f64,
    /// A child must be taller than this to host its own children
    pub nest_min_height: f64,
    /// Inset applied to a parent rectangle before nesting its children
    pub border: f64,
    /// Smallest drawable side for first-level rectangles
    pub min_visible: f64,
    /// Smallest drawable side for nested rectangles
    pub min_visible_nested: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            nest_depth: 1,
            nest_min_width: 40.0,
            nest_min_height: 30.0,
            border: 1.0,
            min_visible: 2.0,
            min_visible_nested: 3.0,
        }
    }
}

/// Lay out the children of `current` against a `viewport_w` x `viewport_h` viewport,
/// nesting grandchildren as far as `config.nest_depth` allows.
pub fn compute_layout(
    tree: &FileTree,
    current: NodeId,
    viewport_w: f64,
    viewport_h: f64,
    config: &LayoutConfig,
) -> Layout {
    let mut layout = Layout::default();
    let Some(node) = tree.try_get(current) else {
        tracing::debug!("Skipping layout for unknown node {:?}", current);
        return layout;
    };
    let bounds = Rect::new(0.0, 0.0, viewport_w, viewport_h);
    if !bounds.is_usable() {
        tracing::debug!("Skipping layout for unusable viewport {}x{}", viewport_w, viewport_h);
        return layout;
    }

    layout_children(tree, current, bounds, 1, config, &mut layout);

    tracing::debug!(
        "Laid out '{}' into {} rects ({:.0}x{:.0})",
        node.name,
        layout.rects.len(),
        viewport_w,
        viewport_h
    );
    layout
}

fn layout_children(
    tree: &FileTree,
    parent: NodeId,
    bounds: Rect,
    depth: u16,
    config: &LayoutConfig,
    layout: &mut Layout,
) {
    // Re-sorted on every pass; stored order carries no meaning
    let items: Vec<(NodeId, u64)> = children_by_size(tree, parent)
        .into_iter()
        .map(|id| (id, tree.get(id).size))
        .collect();

    for (child, rect) in squarify(&items, bounds) {
        layout.node_to_rect.insert(child, layout.rects.len());
        layout.rects.push(LayoutRect {
            node: child,
            rect,
            depth,
        });

        if depth <= config.nest_depth
            && tree.get(child).has_children()
            && rect.w > config.nest_min_width
            && rect.h > config.nest_min_height
        {
            layout_children(tree, child, rect.inset(config.border), depth + 1, config, layout);
        }
    }
}

/// Squarified tiling of `bounds` (Bruls, Huizing, van Wijk).
///
/// `items` must be sorted by size, largest first. Zero-sized items get no
/// rectangle; every other item gets exactly one, however thin, and together
/// they cover `bounds` with areas proportional to size. Returns nothing when
/// the total size is zero.
pub fn squarify<T: Copy>(items: &[(T, u64)], bounds: Rect) -> Vec<(T, Rect)> {
    let items: Vec<(T, f64)> = items
        .iter()
        .filter(|&&(_, size)| size > 0)
        .map(|&(item, size)| (item, size as f64))
        .collect();
    if items.is_empty() || !bounds.is_usable() {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(items.len());
    let Rect {
        mut x,
        mut y,
        mut w,
        mut h,
    } = bounds;
    let mut start = 0;

    while start < items.len() {
        // Wide space: the row becomes a column along the left edge
        let wide = w >= h;
        let side = if wide { h } else { w };
        let long = if wide { w } else { h };
        let remaining: f64 = items[start..].iter().map(|&(_, s)| s).sum();

        let mut end = start + 1;
        let mut row_size = items[start].1;
        let mut worst = worst_ratio(&items[start..end], row_size, remaining, side, long);
        while end < items.len() {
            let grown_size = row_size + items[end].1;
            let grown = worst_ratio(&items[start..=end], grown_size, remaining, side, long);
            if grown > worst {
                break;
            }
            worst = grown;
            row_size = grown_size;
            end += 1;
        }

        let thickness = long * (row_size / remaining);
        let mut offset = 0.0;
        for &(item, size) in &items[start..end] {
            let length = side * (size / row_size);
            let rect = if wide {
                Rect::new(x, y + offset, thickness, length)
            } else {
                Rect::new(x + offset, y, length, thickness)
            };
            result.push((item, rect));
            offset += length;
        }

        if wide {
            x += thickness;
            w = (w - thickness).max(0.0);
        } else {
            y += thickness;
            h = (h - thickness).max(0.0);
        }
        start = end;
    }

    result
}

/// Worst item aspect ratio if `row` were laid down as the next strip.
/// `row_len` is the strip's thickness, `item_len` each item's extent along it.
fn worst_ratio<T>(row: &[(T, f64)], row_size: f64, remaining: f64, side: f64, long: f64) -> f64 {
    let row_len = (row_size / remaining) * long;
    if row_len <= 0.0 {
        return f64::INFINITY;
    }
    row.iter()
        .map(|&(_, size)| {
            let item_area = (size / remaining) * side * long;
            let item_len = item_area / row_len;
            (row_len / item_len).max(item_len / row_len)
        })
        .fold(0.0, f64::max)
}
