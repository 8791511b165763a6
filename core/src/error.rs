//! Errors surfaced by `TodoClient` build and parse methods.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    /// 404: the todo does not exist (or the id was never handed out).
    #[error("todo not found")]
    NotFound,

    /// Any other status the operation does not expect. `detail` is lifted
    /// from a `{"detail": ...}` body when the server sent one.
    #[error("HTTP {status}: {body}")]
    Http {
        status: u16,
        body: String,
        detail: Option<String>,
    },

    #[error("failed to decode response body: {0}")]
    Deserialization(#[source] serde_json::Error),

    #[error("failed to encode request body: {0}")]
    Serialization(#[source] serde_json::Error),
}
