//! facets-core: typed search filters and their query-string rendering.
//!
//! This crate holds everything that is not presentation: the filter model,
//! the list operations that keep one filter per key, the Lucene-style query
//! serializer, the descriptor factory, and the observable filter store.
//!
//! # Flow
//!
//! ```text
//! FilterDescriptor ──► get_filter ──► Filter
//!                                       │
//!            FilterStore ◄── filter_changed / filter_removed
//!                 │
//!                 └──► to_query ──► "status:open date:\"last week\" timeout"
//! ```

pub mod config;
pub mod descriptor;
pub mod error;
pub mod filter;
pub mod list;
pub mod query;
pub mod store;
pub mod types;

pub use descriptor::{get_filter, parse_descriptors, FilterDescriptor};
pub use error::{FilterError, Result};
pub use filter::{
    BooleanFilter, DateFilter, DateValue, Filter, KeywordFilter, QueryFilter, StatusFilter,
    StringFilter,
};
pub use list::{
    default_filters, default_filters_with_range, filter_changed, filter_removed,
    process_filter_rules, set_filter,
};
pub use query::{quote, quote_if_special_characters, to_query};
pub use store::{FilterReceiver, FilterStore};
pub use types::FilterKind;
