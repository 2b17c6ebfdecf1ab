//! Crate-wide error type.

use thiserror::Error;

/// Errors surfaced by the data-access layer.
///
/// Every remote operation is a single call with no retry; a failed call
/// produces exactly one of these and is never replayed.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure talking to the endpoint.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform rejected the call and returned an error body.
    #[error("appwrite error {code} ({kind}): {message}")]
    Api {
        code: u16,
        kind: String,
        message: String,
    },

    /// A response arrived but did not match the expected shape.
    #[error("unexpected response: {0}")]
    InvalidResponse(String),

    /// Rejected locally before any network call was made.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Upload payload exceeds the allowed size.
    #[error("file too large: {size} bytes (limit {limit})")]
    FileTooLarge { size: usize, limit: usize },
}
