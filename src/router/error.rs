//! Error types for client-side navigation.

use thiserror::Error;

/// Errors that can occur when navigating.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    /// No route in the table matches the requested path.
    #[error("no route matches '{path}'")]
    NoMatch {
        /// The requested path, as given.
        path: String,
    },
}
