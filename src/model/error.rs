//! Error types for account payload parsing.

use thiserror::Error;

/// Errors that can occur while turning a bridge payload into an [`AccountItem`].
///
/// Field contents never fail construction; only the payload's outer shape does.
///
/// [`AccountItem`]: super::AccountItem
#[derive(Debug, Error)]
pub enum ModelError {
    /// The text handed to `from_json_text` is not valid JSON.
    #[error("invalid account JSON: {source}")]
    InvalidJson {
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The payload parsed, but its top-level value is not an object.
    #[error("account payload must be a JSON object, found {found}")]
    NotAnObject {
        /// JSON kind of the value that was found instead.
        found: &'static str,
    },
}
