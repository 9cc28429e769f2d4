use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Product with id = {0} does not exist!")]
    NotFound(i64),

    /// Update payload rejected by the schema; carries the first violation.
    #[error("Bad Request!\n{0}")]
    Validation(String),

    /// Body or path that could not be parsed at all.
    #[error("Bad Request!\n{0}")]
    MalformedInput(String),

    /// No id is left above the largest one in the store.
    #[error("Cannot create product: id space exhausted")]
    IdsExhausted,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            AppError::IdsExhausted => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() || status == StatusCode::CONFLICT {
            error!(error = %self, "Request failed");
        }
        (status, self.to_string()).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedInput(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::MalformedInput(rejection.body_text())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}
