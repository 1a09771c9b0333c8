//! Error type shared by every fallible operation in facets-core.

/// Errors raised while building filters from external input or loading
/// configuration. List operations and serialization never fail.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// The descriptor's `type` discriminant names no known filter variant.
    #[error("unknown filter type: {0}")]
    UnknownType(String),

    /// The descriptor's `value` has the wrong shape for its filter type.
    #[error("invalid value for {kind} filter: {reason}")]
    InvalidValue { kind: String, reason: String },

    #[error("malformed filter descriptor: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FilterError>;

impl FilterError {
    pub(crate) fn invalid_value(kind: impl Into<String>, reason: impl Into<String>) -> Self {
        FilterError::InvalidValue {
            kind: kind.into(),
            reason: reason.into(),
        }
    }
}
