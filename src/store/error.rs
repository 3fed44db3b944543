use thiserror::Error;

/// Failures reported by a [`RemoteStore`](super::RemoteStore) adapter.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Transport failure, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The store answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The body did not have the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// The row cannot be addressed by the store.
    #[error("record has no store identifier")]
    Unaddressable,
}
