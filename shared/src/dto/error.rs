use serde::{Deserialize, Serialize};

/// One server-reported error.
///
/// Field errors carry the offending field name so forms can annotate the
/// matching input; general errors leave `field` empty. Some backend versions
/// tag the field as `path` instead of `field`, so both spellings deserialize
/// into [`ApiError::field`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    pub msg: String,
    #[serde(default, alias = "path", skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ApiError {
    /// A general error with no associated field.
    pub fn message(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            field: None,
        }
    }

    /// An error annotated with the input field it applies to.
    pub fn for_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            field: Some(field.into()),
        }
    }
}

/// The backend failure envelope: every non-2xx response carries
/// `{"errors": [{"msg": ..., "field"?: ...}, ...]}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ErrorEnvelope {
    #[serde(default)]
    pub errors: Vec<ApiError>,
}
