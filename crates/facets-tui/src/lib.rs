//! facets TUI: ratatui shell around the filter store.
//!
//! The left pane lists one facet per active filter; the right pane shows the
//! query they render to. See [`event`] for keybindings and [`commands`] for
//! the `:` command line.

pub mod app;
pub mod commands;
pub mod event;
pub mod facets;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use facets::{refresh_faceted_filters, to_faceted_filters, FacetWidget, FacetedFilter};

use facets_core::{config::Config, FilterStore};

/// Start the TUI over the configured default filters. Returns the final query.
pub fn run(config: Config) -> anyhow::Result<String> {
    App::new(config, theme::Theme::load_default()).run()
}

/// Start the TUI over an existing store, e.g. one seeded from descriptors.
pub fn run_with_store(store: FilterStore, config: Config) -> anyhow::Result<String> {
    App::with_store(store, config, theme::Theme::load_default()).run()
}
