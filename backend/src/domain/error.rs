//! Shared API error model for the clinical practice backend.
//!
//! Every fallible operation that crosses the HTTP boundary resolves to this
//! [`Error`] type. The contract is deliberately two-tier: anything the caller
//! can correct (malformed identifiers, missing fields, references to unknown
//! records) maps to `invalid_request`, while unexpected conditions map to
//! `internal_error` and are redacted before serialisation by the inbound
//! adapter.
//!
//! Errors capture the [`TraceId`](crate::domain::TraceId) current at
//! construction time so a client-reported error body can be correlated with
//! server logs.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::TraceId;

/// Machine-readable error category carried in every error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request was malformed or referenced an unknown record.
    InvalidRequest,
    /// The caller has no authenticated session.
    Unauthorized,
    /// The caller is authenticated but not permitted to act.
    Forbidden,
    /// A downstream dependency (the database) could not be reached.
    ServiceUnavailable,
    /// An unexpected server-side failure.
    InternalError,
}

/// Structured error returned by domain services and serialised by the HTTP
/// adapter.
///
/// `details` holds an optional JSON object naming the offending field and a
/// machine-readable code (for example `{"field": "patientId", "code":
/// "invalid_uuid"}`). `trace_id` echoes the request trace identifier when the
/// error was constructed inside a traced request scope.
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorCode};
///
/// let err = Error::invalid_request("patientId must be a UUID");
/// assert_eq!(err.code(), ErrorCode::InvalidRequest);
/// assert_eq!(err.message(), "patientId must be a UUID");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Error {
    code: ErrorCode,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
    #[serde(
        rename = "traceId",
        alias = "trace_id",
        skip_serializing_if = "Option::is_none"
    )]
    trace_id: Option<String>,
}

impl Error {
    /// Create an error with the given code and message, capturing the current
    /// trace id when one is in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Attach a structured details payload naming the offending input.
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// A request the caller can fix: bad syntax, missing fields, or a
    /// reference to a record that does not exist.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// No valid session accompanied the request.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// The session subject is not allowed to perform the operation.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Forbidden, message)
    }

    /// A dependency is temporarily unreachable; the caller may retry.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// An unexpected failure the caller cannot correct.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// The machine-readable category of this error.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable description of the failure.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Structured detail payload, when present.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    /// Trace identifier captured at construction time, when present.
    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Replace the message and drop details, keeping code and trace id.
    ///
    /// Used by the inbound adapter to redact internal failures before they
    /// reach a client.
    #[must_use]
    pub fn redacted(self, message: impl Into<String>) -> Self {
        Self {
            code: self.code,
            message: message.into(),
            details: None,
            trace_id: self.trace_id,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests;
