//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source code display with token highlighting and the error line
//! - [`tree`]: Collapsible syntax tree outline
//! - [`status`]: Status bar with keybindings and parse state
//!
//! Each pane module exports a primary `render_*` function plus the scroll
//! state or render data types it needs.

pub mod source;
pub mod status;
pub mod tree;

// Re-export render functions for convenience
pub use source::{highlight_source_code, render_source_pane, SourceRenderData, SourceScrollState};
pub use status::{render_status_bar, StatusRenderData};
pub use tree::{render_tree_pane, TreeScrollState};
