//! Test builders: terse constructors for filters, lists and stores.
//!
//! These are for readability in assertions, not for production use. They
//! panic on invalid input rather than returning `Result`.

use facets::facets_core::{
    default_filters, get_filter, BooleanFilter, DateFilter, DateValue, Filter, FilterDescriptor,
    FilterStore, KeywordFilter, StatusFilter, StringFilter,
};
use serde_json::Value;

pub fn boolean(term: &str, value: Option<bool>) -> Filter {
    BooleanFilter::new(term, value).into()
}

pub fn date(term: &str, value: Option<&str>) -> Filter {
    DateFilter::new(term, value.map(DateValue::parse)).into()
}

pub fn keyword(value: &str) -> Filter {
    KeywordFilter::new(value).into()
}

pub fn status(values: &[&str]) -> Filter {
    StatusFilter::new(values.iter().copied()).into()
}

pub fn string(term: &str, value: Option<&str>) -> Filter {
    StringFilter::new(term, value.map(str::to_string)).into()
}

/// One filter of every variant, each with its term and value unset.
pub fn unset_filters() -> Vec<Filter> {
    vec![
        BooleanFilter::default().into(),
        DateFilter::default().into(),
        KeywordFilter::default().into(),
        StatusFilter::default().into(),
        StringFilter::default().into(),
    ]
}

/// One filter of every variant with a value set.
pub fn populated_filters() -> Vec<Filter> {
    vec![
        boolean("fixed", Some(true)),
        date("date", Some("last week")),
        keyword("panic"),
        status(&["open", "fixed"]),
        string("tag", Some("db")),
    ]
}

/// Build a filter from descriptor JSON.
pub fn from_json(json: &str) -> Filter {
    let descriptor: FilterDescriptor =
        serde_json::from_str(json).unwrap_or_else(|e| panic!("bad descriptor {json}: {e}"));
    get_filter(&descriptor).unwrap_or_else(|e| panic!("get_filter({json}) failed: {e}"))
}

pub fn descriptor(kind: &str, term: Option<&str>, value: Value) -> FilterDescriptor {
    FilterDescriptor::new(kind, term.map(str::to_string), value)
}

/// A store over the default set, with the date filter.
pub fn default_store() -> FilterStore {
    FilterStore::new(default_filters(true))
}
