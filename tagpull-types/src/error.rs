use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the tagpull workspace.
///
/// Covers argument validation, remote status failures, benign not-found and
/// empty-result conditions, and middleware configuration problems. The same
/// type travels as a hard error and as a `warnings` entry in reports.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TagpullError {
    /// A point or service could not be found on the historian.
    #[error("not found: {what}")]
    NotFound {
        /// Description of the missing resource, e.g. "point SITE.SVC.TAG".
        what: String,
    },

    /// The point exists but the requested window produced no samples.
    #[error("empty result: {what}")]
    EmptyResult {
        /// Description of the request that produced nothing.
        what: String,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// The historian answered a call with a non-success status code.
    #[error("{operation} failed with status {code}")]
    Remote {
        /// Remote operation name (e.g. "hist_raw", "exists").
        operation: String,
        /// Raw status code reported by the historian.
        code: i32,
    },

    /// Issues with returned data (unparsable timestamps, malformed records).
    #[error("data issue: {0}")]
    Data(String),

    /// None of the requested points produced any data.
    #[error("no data for any requested point")]
    NoData,

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),

    /// Middleware stack configuration is invalid.
    #[error("invalid middleware stack: {message}")]
    InvalidMiddlewareStack {
        /// Human-readable description of the validation failure.
        message: String,
    },
}

impl TagpullError {
    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build an `EmptyResult` error for a description of the request.
    pub fn empty(what: impl Into<String>) -> Self {
        Self::EmptyResult { what: what.into() }
    }

    /// Helper: build a `Remote` error from an operation name and status code.
    pub fn remote(operation: impl Into<String>, code: i32) -> Self {
        Self::Remote {
            operation: operation.into(),
            code,
        }
    }

    /// Returns true if this error should be surfaced to users as actionable.
    ///
    /// Missing points, empty windows and the all-empty advisory are benign
    /// outcomes of a well-formed request.
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        !matches!(
            self,
            Self::NotFound { .. } | Self::EmptyResult { .. } | Self::NoData
        )
    }
}
