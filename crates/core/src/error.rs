//! Error classification shared by every core module.
//!
//! Each module keeps its own error enum. Callers that need to pick an
//! outward-facing status (the HTTP layer) match on [`ErrorKind`] instead of
//! inspecting messages.

use serde::Serialize;

/// Broad category of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Bad or missing input. Nothing was written.
    Validation,
    /// The referenced entity does not exist.
    NotFound,
    /// A malformed identifier.
    BadRequest,
    /// A batch operation was given nothing to do.
    EmptyInput,
    /// The caller could not be identified.
    Unauthorized,
    /// The builder service failed or refused the request.
    ExternalService,
    /// The builder service did not answer in time.
    Timeout,
    /// Unexpected storage or configuration failure.
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::BadRequest => "bad_request",
            ErrorKind::EmptyInput => "empty_input",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::ExternalService => "external_service",
            ErrorKind::Timeout => "timeout",
            ErrorKind::Internal => "internal",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
