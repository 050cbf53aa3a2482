pub mod input;
pub mod legend;
pub mod navigation;
pub mod tooltip;
pub mod view;
