//! Error types for summit-client
//!
//! This module provides error handling for the library, including:
//! - A structured representation of failed HTTP responses ([`ApiError`])
//! - Status-class predicates (validation, unauthorized, forbidden, not found)
//! - Field-level validation error extraction for form display
//! - Local precondition failures that never reach the network

use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for summit-client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for summit-client
///
/// This is the primary error type used throughout the library. Service
/// facades never catch these; they propagate to the caller, with one
/// exception: the session controller converts identity-fetch failures
/// into a state transition instead.
#[derive(Debug, Error)]
pub enum Error {
    /// The server answered with a non-success HTTP status
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Network-level failure (connect, DNS, body read, ...)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The configured base URL plus endpoint path did not form a valid URL
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A token refresh was requested but no refresh token is stored
    ///
    /// This is a local precondition failure: no network call is attempted,
    /// so it is distinct from an [`ApiError`] carrying a 401.
    #[error("no refresh token available")]
    MissingRefreshToken,

    /// A caller-supplied header name or value is not valid for the wire
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// The server returned 204 No Content where a typed body was required
    #[error("empty response body from {0}")]
    EmptyBody(String),
}

/// Structured representation of a failed HTTP response
///
/// Constructed at the moment a non-success status is observed and never
/// mutated afterwards. The payload is kept as raw JSON (`Value::Null` when
/// the body was missing or unparseable) so callers that need more than the
/// status class can still inspect it.
#[derive(Debug, Clone, Error)]
#[error("{status} {status_text}")]
pub struct ApiError {
    /// HTTP status code of the failed response
    pub status: u16,
    /// Canonical reason phrase (e.g. "Not Found"); empty if unknown
    pub status_text: String,
    /// Parsed JSON error body, or `Value::Null` when absent/unparseable
    pub data: Value,
}

impl ApiError {
    /// Create a new error from a failed response's parts
    pub fn new(status: u16, status_text: impl Into<String>, data: Value) -> Self {
        Self {
            status,
            status_text: status_text.into(),
            data,
        }
    }

    /// Validation failure (400) — the payload maps fields to messages
    pub fn is_validation(&self) -> bool {
        self.status == 400
    }

    /// Missing or invalid credentials (401)
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Authenticated but not allowed (403)
    pub fn is_forbidden(&self) -> bool {
        self.status == 403
    }

    /// Resource does not exist (404)
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    /// Per-field validation messages, for inline form display
    ///
    /// Returns the payload reinterpreted as `field -> ordered messages` when
    /// this is a validation error and the payload is a non-null JSON object.
    /// Entries are extracted independently: message arrays keep their order,
    /// a lone string becomes a one-element list, and entries of any other
    /// shape are skipped without discarding the rest. Any other status, or a
    /// non-object payload, yields an empty map. Never panics.
    pub fn field_errors(&self) -> HashMap<String, Vec<String>> {
        if !self.is_validation() {
            return HashMap::new();
        }
        let Value::Object(map) = &self.data else {
            return HashMap::new();
        };
        map.iter()
            .filter_map(|(field, value)| {
                let messages = match value {
                    Value::String(message) => vec![message.clone()],
                    Value::Array(items) => items
                        .iter()
                        .filter_map(|m| m.as_str().map(str::to_string))
                        .collect(),
                    _ => return None,
                };
                if messages.is_empty() {
                    return None;
                }
                Some((field.clone(), messages))
            })
            .collect()
    }
}
