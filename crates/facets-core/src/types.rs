//! Core types for facets-core.
//!
//! [`FilterKind`] is the closed set of filter discriminants. It is the string
//! that appears in the `type` field of a filter descriptor and the prefix of
//! every filter key.

use crate::error::FilterError;
use std::str::FromStr;

/// Which variant a filter is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterKind {
    Boolean,
    Date,
    Keyword,
    Status,
    String,
}

impl FilterKind {
    pub const ALL: [FilterKind; 5] = [
        FilterKind::Boolean,
        FilterKind::Date,
        FilterKind::Keyword,
        FilterKind::Status,
        FilterKind::String,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Boolean => "boolean",
            FilterKind::Date => "date",
            FilterKind::Keyword => "keyword",
            FilterKind::Status => "status",
            FilterKind::String => "string",
        }
    }

    /// True for variants that target a named field (`term`).
    pub fn has_term(&self) -> bool {
        matches!(
            self,
            FilterKind::Boolean | FilterKind::Date | FilterKind::String
        )
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "boolean" => Ok(FilterKind::Boolean),
            "date" => Ok(FilterKind::Date),
            "keyword" => Ok(FilterKind::Keyword),
            "status" => Ok(FilterKind::Status),
            "string" => Ok(FilterKind::String),
            other => Err(FilterError::UnknownType(other.to_string())),
        }
    }
}
