use crate::error::NavError;
use crate::layout::{compute_layout, Layout, LayoutConfig};
use crate::render::colors::{paint_layout, AppColor, ColorMode};
use crate::tree::arena::{FileTree, NodeId};
use crate::tree::category::Category;
use crate::ui::input::InputAction;
use crate::ui::legend::{build_legend, Legend};
use crate::ui::navigation::NavigationState;
use crate::ui::tooltip::{build_tooltip, TooltipInfo};

/// One interactive treemap over an immutable hierarchy.
///
/// Owns the only mutable view state (navigation, color mode, viewport), so
/// several views can share nothing and be driven independently. Every event
/// that changes the current node or the viewport recomputes the layout.
pub struct TreemapView {
    tree: FileTree,
    navigation: NavigationState,
    color_mode: ColorMode,
    layout_config: LayoutConfig,
    viewport_width: f64,
    viewport_height: f64,
    layout: Layout,
    hover: Option<NodeId>,
}

impl TreemapView {
    pub fn new(tree: FileTree, width: f64, height: f64, layout_config: LayoutConfig) -> Self {
        let navigation = NavigationState::new(tree.root);
        let mut view = Self {
            tree,
            navigation,
            color_mode: ColorMode::default(),
            layout_config,
            viewport_width: width,
            viewport_height: height,
            layout: Layout::default(),
            hover: None,
        };
        view.relayout();
        view
    }

    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    pub fn current(&self) -> NodeId {
        self.navigation.current()
    }

    pub fn hover(&self) -> Option<NodeId> {
        self.hover
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    /// Repaint only; the layout is untouched.
    pub fn set_color_mode(&mut self, mode: ColorMode) {
        self.color_mode = mode;
    }

    pub fn relayout(&mut self) {
        self.layout = compute_layout(
            &self.tree,
            self.navigation.current(),
            self.viewport_width,
            self.viewport_height,
            &self.layout_config,
        );
        self.hover = None;
    }

    /// Apply one interaction. Returns whether the layout was recomputed.
    pub fn handle(&mut self, action: InputAction) -> Result<bool, NavError> {
        match action {
            InputAction::Hover { node } => {
                self.hover = self.tree.try_get(node).map(|_| node);
                Ok(false)
            }
            InputAction::DrillDown { node } => {
                self.navigation.drill_down(node, &self.tree)?;
                self.relayout();
                Ok(true)
            }
            InputAction::NavigateUp => {
                self.navigation.drill_up()?;
                self.relayout();
                Ok(true)
            }
            InputAction::JumpTo { index } => {
                self.navigation.jump_to(index)?;
                self.relayout();
                Ok(true)
            }
            InputAction::Resize { width, height } => {
                self.viewport_width = width;
                self.viewport_height = height;
                self.relayout();
                Ok(true)
            }
            InputAction::None => Ok(false),
        }
    }

    /// Show a single category (or every category with `None`), clearing history.
    /// Returns false when the category is not present in the tree.
    pub fn select_category(&mut self, category: Option<Category>) -> bool {
        let target = match category {
            None => Some(self.tree.root),
            Some(c) => self.tree.child_named(self.tree.root, c.label()),
        };
        let Some(target) = target else {
            return false;
        };
        self.navigation.reset(target);
        self.relayout();
        true
    }

    /// Colors for `layout().rects`, in order.
    pub fn colors(&self) -> Vec<AppColor> {
        let view_max = self.tree.get(self.current()).size;
        paint_layout(&self.tree, &self.layout, self.color_mode, view_max)
    }

    /// Tooltip for `node`, if it belongs to this view's tree.
    pub fn tooltip(&self, node: NodeId) -> Option<TooltipInfo> {
        self.tree.try_get(node)?;
        Some(build_tooltip(&self.tree, node))
    }

    pub fn legend(&self) -> Legend {
        build_legend(&self.tree, self.current(), self.color_mode)
    }
}
