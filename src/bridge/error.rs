//! Error types for backend bridge calls.

use thiserror::Error;

use super::BridgeMethod;

/// A failed call to a backend function.
///
/// Store actions hand these back to their callers untouched; presenting them
/// is the caller's job.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The request never produced a response (connection refused, DNS, TLS, ...).
    #[error("bridge call {method} could not reach the backend: {source}")]
    Transport {
        /// The backend function being called.
        method: BridgeMethod,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },

    /// The backend ran the function and reported a failure.
    #[error("backend rejected {method}: {message}")]
    Rejected {
        /// The backend function being called.
        method: BridgeMethod,
        /// HTTP status of the rejection, when the bridge is HTTP based.
        status: Option<u16>,
        /// The backend's error message.
        message: String,
    },

    /// The backend answered, but the result did not have the expected shape.
    #[error("could not decode {method} result: {source}")]
    Decode {
        /// The backend function being called.
        method: BridgeMethod,
        /// The underlying decode error.
        #[source]
        source: serde_json::Error,
    },

    /// The HTTP client backing the bridge could not be built.
    #[error("failed to build bridge HTTP client: {source}")]
    ClientBuild {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// The bridge base URL cannot be used.
    #[error("invalid bridge URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Why it was rejected.
        reason: String,
    },
}

impl BridgeError {
    /// Creates a `Rejected` error without transport status, as an in-process bridge reports it.
    #[must_use]
    pub fn rejected(method: BridgeMethod, message: impl Into<String>) -> Self {
        Self::Rejected {
            method,
            status: None,
            message: message.into(),
        }
    }

    /// Returns the backend function the failed call targeted, if any.
    #[must_use]
    pub fn method(&self) -> Option<BridgeMethod> {
        match self {
            Self::Transport { method, .. }
            | Self::Rejected { method, .. }
            | Self::Decode { method, .. } => Some(*method),
            Self::ClientBuild { .. } | Self::InvalidUrl { .. } => None,
        }
    }
}
