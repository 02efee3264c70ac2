//! # Common Error Types
//!
//! Consolidated error handling for the data-access layer.
//!
//! Failures fall into two families with different propagation rules:
//!
//! - [`ConfigError`]: a deployment/programming defect (missing or malformed
//!   base URL). Surfaces synchronously from [`crate::ApiClient::new`], before
//!   any request can be dispatched.
//! - [`RequestError`]: anything that happens once a request is in flight.
//!   The executor never panics and never converts HTTP-level failures into
//!   anything other than the `Err` branch of its result.
//!
//! Every [`RequestError`] normalizes to a non-empty, ordered list of
//! [`ApiError`] values via [`RequestError::errors`], so UI callers consume a
//! single shape regardless of whether the backend was reached, rejected the
//! request, or answered with an unreadable body.

use shared::ApiError;
use thiserror::Error;

/// Client construction error: the backend base URL is absent or malformed.
///
/// Treated as a deployment defect rather than a user-facing condition, which
/// is why it is a separate type from [`RequestError`]: it cannot occur once a
/// client instance exists.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("backend base URL is not configured")]
    MissingBaseUrl,

    #[error("invalid backend base URL `{0}`: expected an absolute http(s) URL")]
    InvalidBaseUrl(String),
}

/// A failed API request, tagged by where the failure happened.
///
/// Callers that only need something to display can flatten any variant with
/// [`RequestError::errors`]; callers that need to branch ("check your
/// connection" vs. "fix this field") match on the variant.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request never reached the server (DNS failure, connection
    /// refused, request could not be built).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status and a parseable error
    /// envelope. The list is never empty.
    #[error("server rejected the request: {}", format_messages(.0))]
    Server(Vec<ApiError>),

    /// The server answered with a non-2xx status but the body did not match
    /// the expected error envelope.
    #[error("unknown error")]
    UnknownResponse,

    /// The server answered 2xx but the body could not be decoded into the
    /// expected type.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl RequestError {
    /// Flatten this failure into the canonical error list consumed by UI
    /// callers. Always yields at least one entry.
    pub fn errors(&self) -> Vec<ApiError> {
        match self {
            Self::Network(msg) => vec![ApiError::message(format!(
                "Network error: could not connect to the backend ({msg})"
            ))],
            Self::Server(errors) if !errors.is_empty() => errors.clone(),
            Self::Server(_) | Self::UnknownResponse => vec![ApiError::message("Unknown error")],
            Self::Decode(msg) => vec![ApiError::message(format!(
                "Unexpected response from the backend: {msg}"
            ))],
        }
    }

    /// True when the backend was never reached.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// The server-reported errors, if the server rejected the request.
    pub fn server_errors(&self) -> Option<&[ApiError]> {
        match self {
            Self::Server(errors) => Some(errors),
            _ => None,
        }
    }
}

fn format_messages(errors: &[ApiError]) -> String {
    errors
        .iter()
        .map(|e| e.msg.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convenience alias used throughout the client crate.
pub type Result<T> = std::result::Result<T, RequestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_never_empty() {
        assert_eq!(RequestError::UnknownResponse.errors().len(), 1);
        assert_eq!(RequestError::Server(Vec::new()).errors().len(), 1);
        assert_eq!(RequestError::Network("refused".into()).errors().len(), 1);
        assert_eq!(RequestError::Decode("bad".into()).errors().len(), 1);
    }

    #[test]
    fn test_unknown_response_message() {
        let errors = RequestError::UnknownResponse.errors();
        assert_eq!(errors[0].msg, "Unknown error");
    }

    #[test]
    fn test_server_errors_preserve_order_and_fields() {
        let err = RequestError::Server(vec![
            ApiError::for_field("Email is required", "email"),
            ApiError::message("Forbidden"),
        ]);
        let errors = err.errors();
        assert_eq!(errors[0].field.as_deref(), Some("email"));
        assert_eq!(errors[1].msg, "Forbidden");
        assert!(err.server_errors().is_some());
        assert!(!err.is_network());
    }

    #[test]
    fn test_network_is_distinguishable() {
        let err = RequestError::Network("connection refused".into());
        assert!(err.is_network());
        assert!(err.server_errors().is_none());
        assert!(err.errors()[0].msg.starts_with("Network error"));
    }

    #[test]
    fn test_display_joins_server_messages() {
        let err = RequestError::Server(vec![
            ApiError::message("too cheap"),
            ApiError::message("too short"),
        ]);
        assert_eq!(
            err.to_string(),
            "server rejected the request: too cheap, too short"
        );
    }
}
