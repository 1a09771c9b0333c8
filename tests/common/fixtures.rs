//! Static descriptor corpora used across harnesses.

/// Descriptors covering every variant, one JSON object per line.
pub const DESCRIPTOR_LINES: &str = r#"{"type":"status","value":["open"]}
{"type":"boolean","term":"fixed","value":false}
{"type":"date","term":"first_seen","value":"2024-01-15T10:00:00Z"}
{"type":"string","term":"tag","value":"db primary"}
{"type":"keyword","value":"null pointer"}
{"type":"status","value":["regressed"]}
"#;

/// The same descriptors as one JSON array.
pub const DESCRIPTOR_ARRAY: &str = r#"[
  {"type":"status","value":["open"]},
  {"type":"boolean","term":"fixed","value":false},
  {"type":"date","term":"first_seen","value":"2024-01-15T10:00:00Z"},
  {"type":"string","term":"tag","value":"db primary"},
  {"type":"keyword","value":"null pointer"},
  {"type":"status","value":["regressed"]}
]"#;

/// The query both corpora fold to when starting from an empty list.
pub const FOLDED_QUERY: &str = r#"(status:open OR status:regressed) fixed:false first_seen:"2024-01-15T10:00:00.000Z" tag:"db primary" null pointer"#;
