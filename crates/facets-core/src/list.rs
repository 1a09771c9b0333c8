//! Filter list operations: merge, deduplicate, change and remove.
//!
//! All functions take the list by value and hand back the new list, so the
//! caller decides where the result lives (a plain `Vec`, or a
//! [`FilterStore`](crate::store::FilterStore) that notifies subscribers).
//!
//! # Invariant
//!
//! After [`process_filter_rules`] runs, no two filters share a
//! [`key`](QueryFilter::key). [`filter_changed`] and [`filter_removed`] always
//! finish with that pass.

use crate::filter::{DateFilter, Filter, KeywordFilter, QueryFilter, StatusFilter};
use std::collections::HashSet;

/// Date range applied by the default filter set.
pub const DEFAULT_DATE_RANGE: &str = "last week";

/// Field targeted by the default date filter.
pub const DEFAULT_DATE_TERM: &str = "date";

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// The filters every listing starts with: an empty status filter, a date
/// filter covering the last week, and an empty keyword filter.
pub fn default_filters(include_date_filter: bool) -> Vec<Filter> {
    default_filters_with_range(DEFAULT_DATE_RANGE, include_date_filter)
}

/// Like [`default_filters`] with a custom date range for the date filter.
pub fn default_filters_with_range(date_range: &str, include_date_filter: bool) -> Vec<Filter> {
    let mut filters: Vec<Filter> = vec![StatusFilter::default().into()];
    if include_date_filter {
        filters.push(DateFilter::new(DEFAULT_DATE_TERM, Some(date_range.into())).into());
    }
    filters.push(KeywordFilter::default().into());
    filters
}

// ---------------------------------------------------------------------------
// Merge
// ---------------------------------------------------------------------------

/// Whether `incoming` updates `existing` rather than sitting beside it.
/// Keys embed the term, so an unset term and an empty one share a slot.
fn same_slot(existing: &Filter, incoming: &Filter) -> bool {
    existing.key() == incoming.key()
}

/// Union preserving first appearance: existing values, then new ones.
fn union(existing: &[String], incoming: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    existing
        .iter()
        .cloned()
        .chain(incoming)
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

fn merge_into(existing: &mut Filter, incoming: Filter) {
    match (existing, incoming) {
        (Filter::Status(current), Filter::Status(new)) => {
            current.value = union(&current.value, new.value);
        }
        // Whole replacement, term included.
        (slot, new) => *slot = new,
    }
}

/// Merge `filter` into `filters`.
///
/// An entry with the same key is updated in place: status values are
/// unioned, every other variant is replaced. Otherwise `filter` is appended,
/// with repeated status values collapsed.
pub fn set_filter(mut filters: Vec<Filter>, filter: Filter) -> Vec<Filter> {
    match filters.iter().position(|f| same_slot(f, &filter)) {
        Some(idx) => {
            tracing::debug!(key = %filter.key(), "set_filter: merged into existing");
            merge_into(&mut filters[idx], filter);
        }
        None => {
            tracing::debug!(key = %filter.key(), "set_filter: appended");
            filters.push(match filter {
                Filter::Status(status) => Filter::Status(StatusFilter {
                    value: union(&[], status.value),
                }),
                other => other,
            });
        }
    }
    filters
}

// ---------------------------------------------------------------------------
// Dedup
// ---------------------------------------------------------------------------

/// Keep only the first filter for each key, preserving first-seen order.
pub fn process_filter_rules(filters: Vec<Filter>) -> Vec<Filter> {
    let mut seen = HashSet::new();
    let before = filters.len();
    let kept: Vec<Filter> = filters
        .into_iter()
        .filter(|f| seen.insert(f.key()))
        .collect();

    if kept.len() != before {
        tracing::debug!(dropped = before - kept.len(), "process_filter_rules: duplicates removed");
    }
    kept
}

// ---------------------------------------------------------------------------
// Change / removal entry points
// ---------------------------------------------------------------------------

/// Apply a user edit: merge `updated` into the list, then deduplicate.
pub fn filter_changed(filters: Vec<Filter>, updated: Filter) -> Vec<Filter> {
    process_filter_rules(set_filter(filters, updated))
}

/// Apply a user removal.
///
/// - `None` clears everything back to `defaults`.
/// - A filter whose key belongs to a default is restored to that default
///   instead of disappearing.
/// - Anything else is dropped from the list.
pub fn filter_removed(
    mut filters: Vec<Filter>,
    defaults: &[Filter],
    removed: Option<&Filter>,
) -> Vec<Filter> {
    let Some(removed) = removed else {
        tracing::debug!("filter_removed: reset to defaults");
        return defaults.to_vec();
    };

    let key = removed.key();
    match defaults.iter().find(|d| d.key() == key) {
        Some(default) => {
            tracing::debug!(key = %key, "filter_removed: restored default");
            match filters.iter().position(|f| f.key() == key) {
                Some(idx) => filters[idx] = default.clone(),
                None => filters.push(default.clone()),
            }
        }
        None => {
            tracing::debug!(key = %key, "filter_removed: dropped");
            filters.retain(|f| f.key() != key);
        }
    }

    process_filter_rules(filters)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{BooleanFilter, StringFilter};
    use crate::query::to_query;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn status(values: &[&str]) -> Filter {
        StatusFilter::new(values.iter().copied()).into()
    }

    fn string(term: &str, value: &str) -> Filter {
        StringFilter::new(term, Some(value.to_string())).into()
    }

    #[test]
    fn defaults_with_and_without_date() {
        let with = default_filters(true);
        assert_eq!(
            with.iter().map(|f| f.key()).collect::<Vec<_>>(),
            vec!["status", "date:date", "keyword"]
        );
        assert_eq!(to_query(&with), r#"date:"last week""#);

        let without = default_filters(false);
        assert_eq!(
            without.iter().map(|f| f.key()).collect::<Vec<_>>(),
            vec!["status", "keyword"]
        );
    }

    #[test]
    fn set_filter_unions_status_values() {
        let filters = vec![status(&["a", "b"])];
        let merged = set_filter(filters, status(&["a"]));
        assert_eq!(merged, vec![status(&["a", "b"])]);
    }

    #[test]
    fn set_filter_union_keeps_existing_then_new_order() {
        let merged = set_filter(vec![status(&["b", "a"])], status(&["c", "a", "d"]));
        assert_eq!(merged, vec![status(&["b", "a", "c", "d"])]);
    }

    #[test]
    fn set_filter_replaces_scalar_value() {
        let merged = set_filter(vec![string("tag", "old")], string("tag", "new"));
        assert_eq!(merged, vec![string("tag", "new")]);
    }

    #[test]
    fn set_filter_replacement_can_unset() {
        let merged = set_filter(
            vec![BooleanFilter::new("fixed", Some(true)).into()],
            BooleanFilter::new("fixed", None).into(),
        );
        assert_eq!(merged, vec![Filter::from(BooleanFilter::new("fixed", None))]);
    }

    #[test]
    fn set_filter_appends_different_terms() {
        let merged = set_filter(vec![string("tag", "x")], string("project", "y"));
        assert_eq!(merged, vec![string("tag", "x"), string("project", "y")]);
    }

    #[test]
    fn set_filter_distinguishes_kinds_with_same_term() {
        let merged = set_filter(
            vec![string("fixed", "yes")],
            BooleanFilter::new("fixed", Some(true)).into(),
        );
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn set_filter_collapses_repeated_status_values_on_append() {
        let merged = set_filter(vec![], status(&["b", "b", "a", "b"]));
        assert_eq!(merged, vec![status(&["b", "a"])]);
        assert_eq!(to_query(&merged), "(status:b OR status:a)");
    }

    #[test]
    fn filter_changed_status_twice_is_stable() {
        let once = filter_changed(vec![], status(&["b", "b"]));
        let twice = filter_changed(once.clone(), status(&["b", "b"]));
        assert_eq!(once, twice);
        assert_eq!(to_query(&twice), "status:b");
    }

    #[test]
    fn unset_and_empty_terms_share_a_slot() {
        let unset: Filter = StringFilter {
            term: None,
            value: Some("x".to_string()),
        }
        .into();
        let empty = string("", "y");
        assert_eq!(unset.key(), empty.key());

        let changed = filter_changed(vec![unset], empty.clone());
        assert_eq!(changed, vec![empty]);
    }

    #[test]
    fn process_filter_rules_keeps_first_per_key() {
        let filters = vec![
            string("tag", "first"),
            status(&["open"]),
            string("tag", "second"),
        ];
        assert_eq!(
            process_filter_rules(filters),
            vec![string("tag", "first"), status(&["open"])]
        );
    }

    #[test]
    fn filter_changed_merges_then_dedups() {
        let filters = vec![status(&["open"]), status(&["fixed"])];
        let changed = filter_changed(filters, status(&["regressed"]));
        assert_eq!(changed, vec![status(&["open", "regressed"])]);
    }

    #[test]
    fn filter_removed_without_filter_resets_to_defaults() {
        let defaults = default_filters(true);
        let filters = vec![status(&["open"]), string("tag", "x")];
        assert_eq!(filter_removed(filters, &defaults, None), defaults);
    }

    #[test]
    fn filter_removed_restores_default_entry() {
        let defaults = default_filters(true);
        let filters = filter_changed(defaults.clone(), status(&["open", "fixed"]));
        let removed = status(&["open", "fixed"]);
        assert_eq!(filter_removed(filters, &defaults, Some(&removed)), defaults);
    }

    #[test]
    fn filter_removed_restores_missing_default_entry() {
        let defaults = default_filters(true);
        let filters = vec![status(&[]), KeywordFilter::default().into()];
        let date: Filter = DateFilter::new("date", None).into();
        let restored = filter_removed(filters, &defaults, Some(&date));
        assert!(restored.contains(&defaults[1]));
        assert_eq!(restored.len(), 3);
    }

    #[test]
    fn filter_removed_drops_non_default() {
        let defaults = default_filters(false);
        let filters = filter_changed(defaults.clone(), string("tag", "x"));
        let removed = string("tag", "x");
        assert_eq!(filter_removed(filters, &defaults, Some(&removed)), defaults);
    }

    fn arb_filter() -> impl Strategy<Value = Filter> {
        let term = prop_oneof![Just("tag"), Just("project"), Just("fixed"), Just("")];
        prop_oneof![
            proptest::option::of("[a-z]{1,4}").prop_map(|v| Filter::from(StringFilter {
                term: None,
                value: v,
            })),
            (term.clone(), any::<Option<bool>>())
                .prop_map(|(t, v)| Filter::from(BooleanFilter::new(t, v))),
            (term.clone(), proptest::option::of("[a-z ]{0,8}"))
                .prop_map(|(t, v)| Filter::from(StringFilter::new(t, v))),
            proptest::collection::vec("[a-c]", 0..4)
                .prop_map(|value| Filter::from(StatusFilter { value })),
            "[a-z ]{0,8}".prop_map(|v| Filter::from(KeywordFilter::new(v))),
        ]
    }

    proptest! {
        #[test]
        fn dedup_leaves_unique_keys(filters in proptest::collection::vec(arb_filter(), 0..12)) {
            let out = process_filter_rules(filters);
            let keys: HashSet<String> = out.iter().map(|f| f.key()).collect();
            prop_assert_eq!(keys.len(), out.len());
        }

        #[test]
        fn filter_changed_is_idempotent(
            filters in proptest::collection::vec(arb_filter(), 0..8),
            updated in arb_filter(),
        ) {
            let once = filter_changed(filters, updated.clone());
            let twice = filter_changed(once.clone(), updated);
            prop_assert_eq!(once, twice);
        }
    }
}
