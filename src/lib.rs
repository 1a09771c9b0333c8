//! facets: typed search filters rendered to Lucene-style query strings.
//!
//! This crate is the thin shell over the two workspace crates: it re-exports
//! them so integration tests can import everything from one place, and holds
//! the descriptor folding shared by the `query` and `tui` subcommands.
//!
//! ```text
//! descriptors ──► get_filter ──► filter_changed ──► FilterStore ──► to_query
//!                                                        │
//!                                                        └──► TUI facets
//! ```

pub use facets_core;
pub use facets_tui;

use facets_core::config::Config;
use facets_core::{get_filter, parse_descriptors, Filter, FilterDescriptor, FilterStore};

/// Where a folded filter list starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartingSet {
    /// Begin from the configured default filters instead of an empty list.
    pub defaults: bool,
    /// Leave the date filter out of the defaults.
    pub no_date: bool,
}

impl StartingSet {
    /// The default set the store resets to.
    pub fn defaults(&self, config: &Config) -> Vec<Filter> {
        let mut filters = config.filters.clone();
        if self.no_date {
            filters.include_date_filter = false;
        }
        facets_core::default_filters_with_range(
            &filters.default_date_range,
            filters.include_date_filter,
        )
    }

    /// The list folding starts from.
    pub fn initial(&self, config: &Config) -> Vec<Filter> {
        if self.defaults {
            self.defaults(config)
        } else {
            Vec::new()
        }
    }
}

/// Parse every argument (or the whole of `stdin` when there are none) as
/// descriptor JSON.
pub fn read_descriptors(
    args: &[String],
    stdin: Option<&str>,
) -> facets_core::Result<Vec<FilterDescriptor>> {
    if args.is_empty() {
        return parse_descriptors(stdin.unwrap_or_default());
    }
    let mut descriptors = Vec::new();
    for arg in args {
        descriptors.extend(parse_descriptors(arg)?);
    }
    Ok(descriptors)
}

/// Fold descriptors into a store, one `filter_changed` per descriptor.
pub fn fold_descriptors(
    config: &Config,
    start: StartingSet,
    descriptors: &[FilterDescriptor],
) -> facets_core::Result<FilterStore> {
    let store = FilterStore::with_filters(start.defaults(config), start.initial(config));
    for descriptor in descriptors {
        let filter = get_filter(descriptor)?;
        tracing::debug!(filter = ?filter, "folding descriptor");
        store.filter_changed(filter);
    }
    Ok(store)
}
