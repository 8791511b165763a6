//! Error types for the store, the HTTP surface, and server configuration.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Fixed detail text of every 404 the API returns.
pub const NOT_FOUND_DETAIL: &str = "Todo not found";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("todo {0} not found")]
    NotFound(Uuid),
}

/// Errors a handler can return. Each maps to one status code and a
/// `{"detail": ...}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Todo not found")]
    NotFound,

    /// The request body failed JSON extraction before reaching the store.
    #[error(transparent)]
    InvalidBody(#[from] JsonRejection),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound,
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, NOT_FOUND_DETAIL.to_string()),
            ApiError::InvalidBody(rejection) => (rejection.status(), rejection.body_text()),
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error(
        "allowed origin `*` cannot be combined with allow_credentials=true; list explicit origins instead"
    )]
    WildcardWithCredentials,

    #[error("invalid CORS origin `{0}`")]
    InvalidOrigin(String),
}

/// Failure to start or keep serving.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
