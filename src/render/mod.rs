pub mod colors;

pub use colors::{node_color, paint_layout, AppColor, ColorMode};
