//! Ratatui widgets for the facets TUI.

pub mod command_bar;
pub mod facet_panel;
pub mod help;
pub mod query_view;
pub mod text_input;
