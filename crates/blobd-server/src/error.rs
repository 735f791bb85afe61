use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("object not found")]
    NotFound,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("method not allowed (allowed: {allow})")]
    MethodNotAllowed { allow: &'static str },

    #[error("payload exceeds {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("store error: {0}")]
    Store(#[from] blobd_store::StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Transport(_) | Self::Store(_) | Self::Config(_) | Self::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::NotFound => status.into_response(),
            Self::MethodNotAllowed { allow } => {
                (status, [(header::ALLOW, allow)], self.to_string()).into_response()
            }
            _ if status.is_server_error() => {
                tracing::error!(error = %self, "request failed");
                (status, "internal server error").into_response()
            }
            _ => (status, self.to_string()).into_response(),
        }
    }
}

pub type ServerResult<T> = Result<T, ServerError>;
