// Public library interface for SpaceView-rs
// The CLI and the debug-layout tool both drive the pipeline through these modules

pub mod config;
pub mod error;
pub mod layout;
pub mod render;
pub mod scanner;
pub mod tree;
pub mod ui;
