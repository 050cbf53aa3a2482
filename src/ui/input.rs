use crate::layout::LayoutRect;
use crate::tree::arena::NodeId;

/// Hit-test: find which layout rectangle contains the given point.
/// Returns the topmost (deepest) rectangle at that point.
pub fn hit_test(layout_rects: &[LayoutRect], x: f64, y: f64) -> Option<NodeId> {
    // Nested rectangles are pushed after their parent
    layout_rects
        .iter()
        .rev()
        .find(|r| r.rect.contains(x, y))
        .map(|r| r.node)
}

/// Pointer interaction produced by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputAction {
    /// Pointer moved over a node
    Hover { node: NodeId },
    /// Click on a node (drill down)
    DrillDown { node: NodeId },
    /// Back button or "Up" (navigate up)
    NavigateUp,
    /// Breadcrumb entry clicked
    JumpTo { index: usize },
    /// Viewport resized, re-layout at the new size
    Resize { width: f64, height: f64 },
    None,
}

/// Resolve a click at `(x, y)` against the current layout.
pub fn click_at(layout_rects: &[LayoutRect], x: f64, y: f64) -> InputAction {
    match hit_test(layout_rects, x, y) {
        Some(node) => InputAction::DrillDown { node },
        None => InputAction::None,
    }
}

/// Resolve a pointer move at `(x, y)` against the current layout.
pub fn hover_at(layout_rects: &[LayoutRect], x: f64, y: f64) -> InputAction {
    match hit_test(layout_rects, x, y) {
        Some(node) => InputAction::Hover { node },
        None => InputAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Rect;

    #[test]
    fn deepest_rect_wins() {
        let rects = [
            LayoutRect {
                node: NodeId(1),
                rect: Rect::new(0.0, 0.0, 100.0, 100.0),
                depth: 1,
            },
            LayoutRect {
                node: NodeId(2),
                rect: Rect::new(1.0, 1.0, 50.0, 50.0),
                depth: 2,
            },
            LayoutRect {
                node: NodeId(3),
                rect: Rect::new(100.0, 0.0, 50.0, 100.0),
                depth: 1,
            },
        ];

        assert_eq!(hit_test(&rects, 10.0, 10.0), Some(NodeId(2)));
        assert_eq!(hit_test(&rects, 80.0, 80.0), Some(NodeId(1)));
        assert_eq!(hit_test(&rects, 100.0, 10.0), Some(NodeId(3)));
        assert_eq!(hit_test(&rects, 200.0, 10.0), None);
        assert_eq!(click_at(&rects, 120.0, 5.0), InputAction::DrillDown { node: NodeId(3) });
        assert_eq!(hover_at(&rects, -1.0, 5.0), InputAction::None);
    }
}
