//! Error types for terminus.
//!
//! Resolution errors are terminal for an invocation; the reverse interface
//! lookup never produces one and degrades to an empty name instead.

use thiserror::Error;

/// Result type alias for terminus operations.
pub type Result<T> = std::result::Result<T, TerminusError>;

/// Main error type for terminus.
#[derive(Error, Debug)]
pub enum TerminusError {
    #[error("invalid argument '{argument}': {reason}")]
    InvalidFormat { argument: String, reason: String },

    #[error("no such network interface: {name}")]
    InterfaceNotFound { name: String },

    #[error("no IPv4 address on network interface: {name}")]
    NoIpv4Address { name: String },

    #[error("malformed subnet mask: {mask}")]
    MalformedMask { mask: String },

    #[error("unable to list network interfaces: {source}")]
    InterfaceList {
        #[source]
        source: std::io::Error,
    },

    #[error("template error: {reason}")]
    Template { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl TerminusError {
    pub(crate) fn invalid_format(argument: &str, reason: impl Into<String>) -> Self {
        TerminusError::InvalidFormat {
            argument: argument.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn template(reason: impl Into<String>) -> Self {
        TerminusError::Template {
            reason: reason.into(),
        }
    }
}
