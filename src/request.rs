//! Incoming HTTP request type and typed extraction.

use std::collections::HashMap;
use std::str::FromStr;

use bytes::Bytes;
use http::HeaderMap;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::method::Method;
use crate::response::{IntoResponse, Response};
use crate::status::Status;

/// An incoming HTTP request with its body already collected.
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
}

impl Request {
    pub(crate) fn new(
        method: Method,
        path: String,
        headers: HeaderMap,
        body: Bytes,
        params: HashMap<String, String>,
    ) -> Self {
        Self { method, path, headers, body, params }
    }

    pub fn method(&self) -> Method { self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup. Values that are not visible ASCII are
    /// treated as absent.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/posts/{id}`, `req.param("id")` on `/posts/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Parses a path parameter into `T`.
    pub fn param_as<T>(&self, key: &str) -> Result<T, Rejection>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self
            .param(key)
            .ok_or_else(|| Rejection::MissingParam(key.to_owned()))?;
        raw.parse().map_err(|e: T::Err| Rejection::InvalidParam {
            name: key.to_owned(),
            value: raw.to_owned(),
            reason: e.to_string(),
        })
    }

    /// Deserialises the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Rejection> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Deserialises the body as JSON and runs its `validator` rules.
    pub fn validated_json<T: DeserializeOwned + Validate>(&self) -> Result<T, Rejection> {
        let value: T = self.json()?;
        value.validate()?;
        Ok(value)
    }
}

// ── Rejection ─────────────────────────────────────────────────────────────────

/// A request refused before it reaches application logic. Always `422`.
#[derive(Debug, Error)]
pub enum Rejection {
    #[error("missing path parameter `{0}`")]
    MissingParam(String),

    #[error("path parameter `{name}` = {value:?} is invalid: {reason}")]
    InvalidParam {
        name: String,
        value: String,
        reason: String,
    },

    #[error("invalid JSON body: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

/// One entry of a 422 body: where the problem is, what it is, and its kind.
///
/// Renders as `{"loc": ["body", "title"], "msg": "...", "type": "missing"}`.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldError {
    fn new(loc: &[&str], msg: impl Into<String>, kind: &str) -> Self {
        Self {
            loc: loc.iter().map(|s| (*s).to_owned()).collect(),
            msg: msg.into(),
            kind: kind.to_owned(),
        }
    }
}

impl Rejection {
    /// The individual problems behind this rejection, sorted by location.
    pub fn field_errors(&self) -> Vec<FieldError> {
        match self {
            Self::MissingParam(name) => {
                vec![FieldError::new(&["path", name.as_str()], "Field required", "missing")]
            }
            Self::InvalidParam { name, reason, .. } => {
                vec![FieldError::new(&["path", name.as_str()], reason.as_str(), "parsing")]
            }
            Self::InvalidJson(e) => vec![json_error(e)],
            Self::Validation(errors) => {
                let mut out: Vec<FieldError> = errors
                    .field_errors()
                    .into_iter()
                    .flat_map(|(field, errs)| {
                        let field = field.to_string();
                        errs.iter().map(move |e| {
                            let msg = e
                                .message
                                .as_ref()
                                .map_or_else(|| e.code.to_string(), |m| m.to_string());
                            FieldError::new(&["body", field.as_str()], msg, &e.code)
                        })
                    })
                    .collect();
                out.sort_by(|a, b| a.loc.cmp(&b.loc));
                out
            }
        }
    }
}

fn json_error(e: &serde_json::Error) -> FieldError {
    let msg = e.to_string();
    match e.classify() {
        Category::Data => match missing_field(&msg) {
            Some(field) => FieldError::new(&["body", field], "Field required", "missing"),
            None => FieldError::new(&["body"], msg.as_str(), "value_error"),
        },
        Category::Syntax | Category::Eof | Category::Io => {
            FieldError::new(&["body"], msg.as_str(), "json_invalid")
        }
    }
}

/// Field name out of serde's "missing field `title` at line .." message.
fn missing_field(msg: &str) -> Option<&str> {
    msg.strip_prefix("missing field `")?.split('`').next()
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        tracing::debug!(reason = %self, "request rejected");
        let body = serde_json::json!({ "detail": self.field_errors() });
        Response::builder()
            .status(Status::UnprocessableContent)
            .json(body.to_string().into_bytes())
    }
}
