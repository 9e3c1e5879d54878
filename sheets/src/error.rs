use std::fmt;

use thiserror::Error;

/// What kind of named resource a lookup failed to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Spreadsheet,
    Worksheet,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Spreadsheet => write!(f, "spreadsheet"),
            ResourceKind::Worksheet => write!(f, "worksheet"),
        }
    }
}

/// Error taxonomy for spreadsheet operations.
#[derive(Debug, Error)]
pub enum SheetError {
    /// Credential file missing, malformed, or rejected by the token
    /// endpoint.
    #[error("credential error: {0}")]
    Credential(String),

    /// The named spreadsheet or worksheet does not exist.
    #[error("{kind} not found: '{name}'")]
    ResourceNotFound { kind: ResourceKind, name: String },

    /// The write itself was refused or lost.
    #[error("remote write failed: {0}")]
    WriteFailed(String),

    /// Could not reach the API at all.
    #[error("network error: {0}")]
    Network(String),

    /// Unexpected HTTP status outside the cases above.
    #[error("HTTP {0}: {1}")]
    Http(u16, String),

    /// Response body was not what the API contract promises.
    #[error("parse error: {0}")]
    Parse(String),
}
