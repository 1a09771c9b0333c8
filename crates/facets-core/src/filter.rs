//! Filter model: the five filter variants and the [`Filter`] sum type.
//!
//! Every variant implements [`QueryFilter`]: it knows its key, whether it is
//! empty, how to reset itself, and how to render itself as a query fragment.
//!
//! # Fragments
//!
//! | Variant | Unset term | Unset value | Set value |
//! |---------|-----------|-------------|-----------|
//! | Boolean | `""` | `_missing_:term` | `term:true` |
//! | Date | `""` | `_missing_:term` | `term:"2024-01-15T10:00:00.000Z"` |
//! | String | `""` | `_missing_:term` | `term:value` (quoted if needed) |
//! | Keyword | none | `""` | trimmed text |
//! | Status | none | `""` (empty list) | `status:a` / `(status:a OR status:b)` |

use crate::query::quote_if_special_characters;
use crate::types::FilterKind;
use chrono::{DateTime, SecondsFormat, Utc};

/// Behaviour shared by every filter variant.
pub trait QueryFilter {
    fn kind(&self) -> FilterKind;

    /// Deduplication identity. At most one filter per key is active.
    fn key(&self) -> String;

    /// True when the value is unset or blank.
    fn is_empty(&self) -> bool;

    /// Clear the value back to unset / empty.
    fn reset(&mut self);

    /// Render as a query fragment; empty when there is nothing to filter on.
    fn to_filter(&self) -> String;
}

// ---------------------------------------------------------------------------
// Term-based helpers
// ---------------------------------------------------------------------------

fn term_key(kind: FilterKind, term: Option<&str>) -> String {
    format!("{}:{}", kind, term.unwrap_or_default())
}

fn term_fragment(term: Option<&str>, value: Option<String>) -> String {
    let Some(term) = term else {
        return String::new();
    };

    match value {
        None => format!("_missing_:{term}"),
        Some(value) => format!("{term}:{value}"),
    }
}

// ---------------------------------------------------------------------------
// Boolean
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BooleanFilter {
    pub term: Option<String>,
    pub value: Option<bool>,
}

impl BooleanFilter {
    pub fn new(term: impl Into<String>, value: Option<bool>) -> Self {
        Self {
            term: Some(term.into()),
            value,
        }
    }
}

impl QueryFilter for BooleanFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::Boolean
    }

    fn key(&self) -> String {
        term_key(self.kind(), self.term.as_deref())
    }

    fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    fn reset(&mut self) {
        self.value = None;
    }

    fn to_filter(&self) -> String {
        term_fragment(self.term.as_deref(), self.value.map(|v| v.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Date
// ---------------------------------------------------------------------------

/// A date filter value: either a concrete instant or a relative range
/// expression understood by the search backend (`last week`, `[now-1d TO now]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateValue {
    Instant(DateTime<Utc>),
    Expression(String),
}

impl DateValue {
    /// Interpret `s` as an RFC 3339 timestamp, falling back to a free-form
    /// range expression.
    pub fn parse(s: &str) -> Self {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| DateValue::Instant(dt.with_timezone(&Utc)))
            .unwrap_or_else(|_| DateValue::Expression(s.to_string()))
    }

    /// Normalised textual form: UTC with millisecond precision for instants,
    /// the expression verbatim otherwise.
    pub fn to_query_value(&self) -> String {
        match self {
            DateValue::Instant(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
            DateValue::Expression(expr) => expr.clone(),
        }
    }
}

impl std::fmt::Display for DateValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_query_value())
    }
}

impl From<DateTime<Utc>> for DateValue {
    fn from(dt: DateTime<Utc>) -> Self {
        DateValue::Instant(dt)
    }
}

impl From<&str> for DateValue {
    fn from(s: &str) -> Self {
        DateValue::parse(s)
    }
}

impl From<String> for DateValue {
    fn from(s: String) -> Self {
        DateValue::parse(&s)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateFilter {
    pub term: Option<String>,
    pub value: Option<DateValue>,
}

impl DateFilter {
    pub fn new(term: impl Into<String>, value: Option<DateValue>) -> Self {
        Self {
            term: Some(term.into()),
            value,
        }
    }
}

impl QueryFilter for DateFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::Date
    }

    fn key(&self) -> String {
        term_key(self.kind(), self.term.as_deref())
    }

    fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    fn reset(&mut self) {
        self.value = None;
    }

    fn to_filter(&self) -> String {
        let value = self.value.as_ref().map(|v| {
            let date = v.to_query_value();
            quote_if_special_characters(&date).into_owned()
        });
        term_fragment(self.term.as_deref(), value)
    }
}

// ---------------------------------------------------------------------------
// Keyword
// ---------------------------------------------------------------------------

/// Free-text search terms, passed through to the query unquoted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordFilter {
    pub value: Option<String>,
}

impl KeywordFilter {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
        }
    }
}

impl QueryFilter for KeywordFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::Keyword
    }

    fn key(&self) -> String {
        self.kind().to_string()
    }

    fn is_empty(&self) -> bool {
        self.value.as_deref().map_or(true, |v| v.trim().is_empty())
    }

    fn reset(&mut self) {
        self.value = None;
    }

    fn to_filter(&self) -> String {
        match self.value.as_deref() {
            Some(v) if !v.trim().is_empty() => v.trim().to_string(),
            _ => String::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Multi-valued status filter; several values combine with `OR`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusFilter {
    pub value: Vec<String>,
}

impl StatusFilter {
    /// Build from `values`, keeping the first occurrence of each.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut value: Vec<String> = Vec::new();
        for v in values.into_iter().map(Into::into) {
            if !value.contains(&v) {
                value.push(v);
            }
        }
        Self { value }
    }
}

impl QueryFilter for StatusFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::Status
    }

    fn key(&self) -> String {
        self.kind().to_string()
    }

    fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    fn reset(&mut self) {
        self.value.clear();
    }

    fn to_filter(&self) -> String {
        match self.value.as_slice() {
            [] => String::new(),
            [single] => format!("status:{single}"),
            many => {
                let terms: Vec<String> = many.iter().map(|v| format!("status:{v}")).collect();
                format!("({})", terms.join(" OR "))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// String
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StringFilter {
    pub term: Option<String>,
    pub value: Option<String>,
}

impl StringFilter {
    pub fn new(term: impl Into<String>, value: Option<String>) -> Self {
        Self {
            term: Some(term.into()),
            value,
        }
    }
}

impl QueryFilter for StringFilter {
    fn kind(&self) -> FilterKind {
        FilterKind::String
    }

    fn key(&self) -> String {
        term_key(self.kind(), self.term.as_deref())
    }

    fn is_empty(&self) -> bool {
        self.value.is_none()
    }

    fn reset(&mut self) {
        self.value = None;
    }

    fn to_filter(&self) -> String {
        let value = self
            .value
            .as_deref()
            .map(|v| quote_if_special_characters(v).into_owned());
        term_fragment(self.term.as_deref(), value)
    }
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Any filter. Matching on this enum is exhaustive, so adding a variant is a
/// compile error everywhere a variant needs handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Boolean(BooleanFilter),
    Date(DateFilter),
    Keyword(KeywordFilter),
    Status(StatusFilter),
    String(StringFilter),
}

impl Filter {
    fn as_query_filter(&self) -> &dyn QueryFilter {
        match self {
            Filter::Boolean(f) => f,
            Filter::Date(f) => f,
            Filter::Keyword(f) => f,
            Filter::Status(f) => f,
            Filter::String(f) => f,
        }
    }

    fn as_query_filter_mut(&mut self) -> &mut dyn QueryFilter {
        match self {
            Filter::Boolean(f) => f,
            Filter::Date(f) => f,
            Filter::Keyword(f) => f,
            Filter::Status(f) => f,
            Filter::String(f) => f,
        }
    }

    /// The term of a field-targeting variant.
    ///
    /// The outer `Option` is `None` when the variant has no term at all
    /// (keyword, status); the inner one is `None` when the term is unset.
    pub fn term(&self) -> Option<Option<&str>> {
        match self {
            Filter::Boolean(f) => Some(f.term.as_deref()),
            Filter::Date(f) => Some(f.term.as_deref()),
            Filter::String(f) => Some(f.term.as_deref()),
            Filter::Keyword(_) | Filter::Status(_) => None,
        }
    }
}

impl QueryFilter for Filter {
    fn kind(&self) -> FilterKind {
        self.as_query_filter().kind()
    }

    fn key(&self) -> String {
        self.as_query_filter().key()
    }

    fn is_empty(&self) -> bool {
        self.as_query_filter().is_empty()
    }

    fn reset(&mut self) {
        self.as_query_filter_mut().reset()
    }

    fn to_filter(&self) -> String {
        self.as_query_filter().to_filter()
    }
}

impl From<BooleanFilter> for Filter {
    fn from(f: BooleanFilter) -> Self {
        Filter::Boolean(f)
    }
}

impl From<DateFilter> for Filter {
    fn from(f: DateFilter) -> Self {
        Filter::Date(f)
    }
}

impl From<KeywordFilter> for Filter {
    fn from(f: KeywordFilter) -> Self {
        Filter::Keyword(f)
    }
}

impl From<StatusFilter> for Filter {
    fn from(f: StatusFilter) -> Self {
        Filter::Status(f)
    }
}

impl From<StringFilter> for Filter {
    fn from(f: StringFilter) -> Self {
        Filter::String(f)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
