//! Filter descriptors: the plain-record form filters take on the wire.
//!
//! A descriptor is `{ "type": ..., "term": ..., "value": ... }`. The `type`
//! discriminant selects the variant; the `value` must have the matching JSON
//! shape (`null` or absent means unset):
//!
//! | type | value |
//! |------|-------|
//! | `boolean` | `true` / `false` |
//! | `date` | RFC 3339 timestamp or range expression string |
//! | `keyword` | string |
//! | `status` | array of strings (a lone string is accepted) |
//! | `string` | string, number or boolean (stored as text) |

use crate::error::{FilterError, Result};
use crate::filter::{
    BooleanFilter, DateFilter, DateValue, Filter, KeywordFilter, QueryFilter, StatusFilter,
    StringFilter,
};
use crate::types::FilterKind;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub value: Value,
}

impl FilterDescriptor {
    pub fn new(kind: impl Into<String>, term: Option<String>, value: Value) -> Self {
        Self {
            kind: kind.into(),
            term,
            value,
        }
    }
}

/// Build a filter from its descriptor.
///
/// Fails with [`FilterError::UnknownType`] for an unrecognised discriminant
/// and [`FilterError::InvalidValue`] when the value has the wrong shape.
pub fn get_filter(descriptor: &FilterDescriptor) -> Result<Filter> {
    let kind: FilterKind = descriptor.kind.parse()?;
    let term = descriptor.term.clone();
    let value = &descriptor.value;

    let filter = match kind {
        FilterKind::Boolean => Filter::Boolean(BooleanFilter {
            term,
            value: match value {
                Value::Null => None,
                Value::Bool(b) => Some(*b),
                other => return Err(shape(kind, "a boolean", other)),
            },
        }),
        FilterKind::Date => Filter::Date(DateFilter {
            term,
            value: match value {
                Value::Null => None,
                Value::String(s) => Some(DateValue::parse(s)),
                other => return Err(shape(kind, "a date string", other)),
            },
        }),
        FilterKind::Keyword => Filter::Keyword(KeywordFilter {
            value: match value {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => return Err(shape(kind, "a string", other)),
            },
        }),
        FilterKind::Status => Filter::Status(StatusFilter::new(match value {
            Value::Null => Vec::new(),
            Value::String(s) => vec![s.clone()],
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    other => Err(shape(kind, "an array of strings", other)),
                })
                .collect::<Result<Vec<_>>>()?,
            other => return Err(shape(kind, "an array of strings", other)),
        })),
        FilterKind::String => Filter::String(StringFilter {
            term,
            value: match value {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                other => return Err(shape(kind, "a string", other)),
            },
        }),
    };

    Ok(filter)
}

fn shape(kind: FilterKind, expected: &str, got: &Value) -> FilterError {
    FilterError::invalid_value(kind.as_str(), format!("expected {expected}, got {got}"))
}

/// Parse JSON holding descriptors: each document is one descriptor or an
/// array of them, and documents may follow one another (JSON Lines). Blank
/// input yields no descriptors.
pub fn parse_descriptors(json: &str) -> Result<Vec<FilterDescriptor>> {
    let mut descriptors = Vec::new();
    for doc in serde_json::Deserializer::from_str(json).into_iter::<Value>() {
        match doc? {
            Value::Array(items) => {
                for item in items {
                    descriptors.push(serde_json::from_value(item)?);
                }
            }
            other => descriptors.push(serde_json::from_value(other)?),
        }
    }
    Ok(descriptors)
}

impl Filter {
    pub fn from_descriptor(descriptor: &FilterDescriptor) -> Result<Self> {
        get_filter(descriptor)
    }

    /// The descriptor that rebuilds this filter via [`get_filter`].
    pub fn to_descriptor(&self) -> FilterDescriptor {
        let kind = self.kind().as_str();
        match self {
            Filter::Boolean(f) => FilterDescriptor::new(
                kind,
                f.term.clone(),
                f.value.map(Value::Bool).unwrap_or(Value::Null),
            ),
            Filter::Date(f) => FilterDescriptor::new(
                kind,
                f.term.clone(),
                f.value
                    .as_ref()
                    .map(|v| Value::String(v.to_query_value()))
                    .unwrap_or(Value::Null),
            ),
            Filter::Keyword(f) => FilterDescriptor::new(
                kind,
                None,
                f.value.clone().map(Value::String).unwrap_or(Value::Null),
            ),
            Filter::Status(f) => FilterDescriptor::new(
                kind,
                None,
                Value::Array(f.value.iter().cloned().map(Value::String).collect()),
            ),
            Filter::String(f) => FilterDescriptor::new(
                kind,
                f.term.clone(),
                f.value.clone().map(Value::String).unwrap_or(Value::Null),
            ),
        }
    }
}

impl TryFrom<FilterDescriptor> for Filter {
    type Error = FilterError;

    fn try_from(descriptor: FilterDescriptor) -> Result<Self> {
        get_filter(&descriptor)
    }
}

impl TryFrom<&FilterDescriptor> for Filter {
    type Error = FilterError;

    fn try_from(descriptor: &FilterDescriptor) -> Result<Self> {
        get_filter(descriptor)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::default_filters;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;

    fn descriptor(value: Value) -> FilterDescriptor {
        serde_json::from_value(value).unwrap()
    }

    #[rstest]
    #[case(json!({"type": "boolean", "term": "fixed", "value": true}), "fixed:true")]
    #[case(json!({"type": "boolean", "term": "fixed"}), "_missing_:fixed")]
    #[case(json!({"type": "date", "term": "date", "value": "last week"}), r#"date:"last week""#)]
    #[case(
        json!({"type": "date", "term": "first", "value": "2024-01-15T10:00:00Z"}),
        r#"first:"2024-01-15T10:00:00.000Z""#
    )]
    #[case(json!({"type": "keyword", "value": " boom "}), "boom")]
    #[case(json!({"type": "status", "value": ["open", "fixed"]}), "(status:open OR status:fixed)")]
    #[case(json!({"type": "status", "value": "open"}), "status:open")]
    #[case(json!({"type": "status", "value": ["b", "b"]}), "status:b")]
    #[case(json!({"type": "string", "term": "tag", "value": "a b"}), r#"tag:"a b""#)]
    #[case(json!({"type": "string", "term": "build", "value": 42}), "build:42")]
    fn descriptor_renders(#[case] raw: Value, #[case] expected: &str) {
        let filter = get_filter(&descriptor(raw)).unwrap();
        assert_eq!(filter.to_filter(), expected);
    }

    #[test]
    fn keyword_descriptor_builds_keyword_filter() {
        let filter = get_filter(&descriptor(json!({"type": "keyword", "value": "x"}))).unwrap();
        assert_eq!(filter, Filter::from(KeywordFilter::new("x")));
    }

    #[test]
    fn unknown_type_is_fatal() {
        let err = get_filter(&descriptor(json!({"type": "range", "value": 1}))).unwrap_err();
        assert!(matches!(err, FilterError::UnknownType(ref t) if t == "range"));
    }

    #[rstest]
    #[case(json!({"type": "boolean", "term": "fixed", "value": "yes"}))]
    #[case(json!({"type": "date", "term": "date", "value": 3}))]
    #[case(json!({"type": "status", "value": [1, 2]}))]
    #[case(json!({"type": "keyword", "value": {"a": 1}}))]
    #[case(json!({"type": "string", "term": "tag", "value": ["x"]}))]
    fn wrong_shape_is_invalid(#[case] raw: Value) {
        let err = get_filter(&descriptor(raw)).unwrap_err();
        assert!(matches!(err, FilterError::InvalidValue { .. }), "{err}");
    }

    #[test]
    fn to_descriptor_rebuilds_same_filter() {
        for filter in default_filters(true) {
            let rebuilt = get_filter(&filter.to_descriptor()).unwrap();
            assert_eq!(rebuilt, filter);
        }
    }

    #[test]
    fn parse_descriptors_accepts_object_or_array() {
        let one = parse_descriptors(r#"{"type": "keyword", "value": "x"}"#).unwrap();
        assert_eq!(one.len(), 1);

        let many =
            parse_descriptors(r#"[{"type": "keyword"}, {"type": "status", "value": []}]"#).unwrap();
        assert_eq!(many.len(), 2);
        assert_eq!(many[0].value, Value::Null);
    }

    #[test]
    fn parse_descriptors_reads_json_lines() {
        let input = "{\"type\": \"keyword\", \"value\": \"x\"}\n[{\"type\": \"status\"}]\n";
        let parsed = parse_descriptors(input).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].kind, "status");
        assert!(parse_descriptors("  \n").unwrap().is_empty());
    }

    #[test]
    fn parse_descriptors_rejects_garbage() {
        assert!(matches!(
            parse_descriptors("{not json"),
            Err(FilterError::Json(_))
        ));
    }

    #[test]
    fn default_descriptor_snapshot() {
        let descriptors: Vec<FilterDescriptor> =
            default_filters(true).iter().map(Filter::to_descriptor).collect();
        insta::assert_json_snapshot!(descriptors, @r###"
        [
          {
            "type": "status",
            "value": []
          },
          {
            "type": "date",
            "term": "date",
            "value": "last week"
          },
          {
            "type": "keyword"
          }
        ]
        "###);
    }
}
