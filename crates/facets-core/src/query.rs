//! Query serialization: renders active filters into a Lucene-style query
//! string.
//!
//! Each filter produces one fragment (`term:value`, `_missing_:term`,
//! `(status:a OR status:b)`, free text). [`to_query`] drops the empty ones and
//! joins the rest with a single space.

use crate::filter::{Filter, QueryFilter};
use std::borrow::Cow;

/// Characters with syntactic meaning in a Lucene query.
const RESERVED: &[char] = &[
    '+', '-', '&', '|', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':', '\\',
    '/',
];

/// True if `value` contains whitespace or a reserved query character.
pub fn needs_quoting(value: &str) -> bool {
    value
        .chars()
        .any(|c| c.is_whitespace() || RESERVED.contains(&c))
}

/// Quote `value` as a phrase if it would otherwise be misread by the query
/// parser. Plain values (and the empty string) are returned unchanged.
///
/// ```
/// use facets_core::query::quote_if_special_characters;
///
/// assert_eq!(quote_if_special_characters("a b"), "\"a b\"");
/// assert_eq!(quote_if_special_characters("abc"), "abc");
/// ```
pub fn quote_if_special_characters(value: &str) -> Cow<'_, str> {
    if needs_quoting(value) {
        match quote(value) {
            Some(quoted) => Cow::Owned(quoted),
            None => Cow::Borrowed(value),
        }
    } else {
        Cow::Borrowed(value)
    }
}

/// Wrap `value` in double quotes. Embedded quotes and backslashes are
/// escaped so the phrase stays a single token. Returns `None` for an empty
/// value.
pub fn quote(value: &str) -> Option<String> {
    if value.is_empty() {
        return None;
    }

    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    Some(out)
}

/// Render a list of filters as a single query string.
pub fn to_query(filters: &[Filter]) -> String {
    filters
        .iter()
        .map(|f| f.to_filter())
        .filter(|fragment| !fragment.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
