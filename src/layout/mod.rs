pub mod squarify;

pub use squarify::{compute_layout, squarify, Layout, LayoutConfig, LayoutRect, Rect};
