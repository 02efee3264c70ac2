//! # Request Construction
//!
//! [`RequestSpec`] describes one HTTP call: method, path, query, body and
//! auth requirement. Specs are built fresh per call and consumed by
//! [`crate::ApiClient::execute`]; nothing mutates them after dispatch.
//!
//! [`RequestOptions`] carries the per-call knobs of the verb facade: whether
//! the call needs the auth header and an optional error callback for callers
//! (typically forms) that want the normalized error list pushed to them in
//! addition to receiving the `Err` branch.

use std::fmt;

use reqwest::Method;
use shared::ApiError;

/// A scalar query-string value. Keys with a `None` value are omitted from
/// the query string entirely rather than serialized as empty.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Int(i64),
    Str(String),
    Bool(bool),
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Str(value) => write!(f, "{value}"),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Request body, selecting the encoding policy.
///
/// JSON bodies are sent with `Content-Type: application/json`; multipart
/// bodies are sent with *no* manual `Content-Type` so the transport layer can
/// write its own boundary (see [`crate::session::Session::build_headers`]).
pub enum RequestBody {
    Json(serde_json::Value),
    Multipart(reqwest::multipart::Form),
}

/// One HTTP call, fully described before dispatch.
pub struct RequestSpec {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, QueryValue)>,
    pub body: Option<RequestBody>,
    pub requires_auth: bool,
}

impl RequestSpec {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            requires_auth: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Add a query pair only when the value is present.
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl Into<QueryValue>>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    pub fn multipart(mut self, form: reqwest::multipart::Form) -> Self {
        self.body = Some(RequestBody::Multipart(form));
        self
    }

    pub fn auth(mut self, requires_auth: bool) -> Self {
        self.requires_auth = requires_auth;
        self
    }

    /// The `Content-Type` the header provider should set for this spec, or
    /// `None` for multipart bodies (the boundary-corruption rule).
    pub fn content_type(&self) -> Option<&'static str> {
        match self.body {
            Some(RequestBody::Multipart(_)) => None,
            _ => Some("application/json"),
        }
    }
}

/// Callback receiving the normalized error list of a failed call.
pub type ErrorHandler<'a> = &'a (dyn Fn(&[ApiError]) + Send + Sync);

/// Per-call options of the typed verb facade.
#[derive(Clone, Copy)]
pub struct RequestOptions<'a> {
    /// Send the `apikey` header when a token is present. Defaults to `true`;
    /// login and registration opt out.
    pub requires_auth: bool,
    /// Invoked exactly once with the normalized errors when the call fails.
    /// Failures are logged either way; the `Err` branch is always returned.
    pub on_error: Option<ErrorHandler<'a>>,
}

impl Default for RequestOptions<'_> {
    fn default() -> Self {
        Self {
            requires_auth: true,
            on_error: None,
        }
    }
}

impl<'a> RequestOptions<'a> {
    /// Options for endpoints that must not send the auth header.
    pub fn public() -> Self {
        Self {
            requires_auth: false,
            on_error: None,
        }
    }

    pub fn with_error_handler(mut self, on_error: ErrorHandler<'a>) -> Self {
        self.on_error = Some(on_error);
        self
    }
}
