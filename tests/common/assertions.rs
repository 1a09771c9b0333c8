//! Domain-specific assertion macros for facets harnesses.
//!
//! These wrap `pretty_assertions` and add context to failure messages so it
//! is clear which list or filter broke the expectation.

/// Assert the query string a filter list renders to.
///
/// ```rust
/// assert_query!(filters, "status:open panic");
/// ```
#[macro_export]
macro_rules! assert_query {
    ($filters:expr, $expected:expr) => {{
        let filters: &[facets::facets_core::Filter] = &$filters;
        let actual = facets::facets_core::to_query(filters);
        pretty_assertions::assert_eq!(
            actual,
            $expected,
            "assert_query! failed for filters {:#?}",
            filters
        );
    }};
}

/// Assert the fragment a single filter renders to.
#[macro_export]
macro_rules! assert_fragment {
    ($filter:expr, $expected:expr) => {{
        use facets::facets_core::QueryFilter;
        let filter: &facets::facets_core::Filter = &$filter;
        pretty_assertions::assert_eq!(
            filter.to_filter(),
            $expected,
            "assert_fragment! failed for {:?}",
            filter
        );
    }};
}

/// Assert that no two filters in a list share a key.
#[macro_export]
macro_rules! assert_unique_keys {
    ($filters:expr) => {{
        use facets::facets_core::QueryFilter;
        let filters: &[facets::facets_core::Filter] = &$filters;
        let mut seen = std::collections::HashSet::new();
        for f in filters {
            if !seen.insert(f.key()) {
                panic!(
                    "assert_unique_keys! failed: key {:?} appears more than once in {:#?}",
                    f.key(),
                    filters
                );
            }
        }
    }};
}

/// Assert the keys of a list, in order.
#[macro_export]
macro_rules! assert_keys {
    ($filters:expr, [$($key:expr),* $(,)?]) => {{
        use facets::facets_core::QueryFilter;
        let filters: &[facets::facets_core::Filter] = &$filters;
        let actual: Vec<String> = filters.iter().map(|f| f.key()).collect();
        let expected: Vec<String> = vec![$($key.to_string()),*];
        pretty_assertions::assert_eq!(actual, expected, "assert_keys! failed");
    }};
}
