use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    /// The uploaded file could not be written to or read back from disk
    #[error("Error handling uploaded file: {0}")]
    FileHandling(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Payload Too Large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal Server Error: {0}")]
    Internal(String),

    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::FileHandling(_) | AppError::Internal(_) | AppError::Anyhow(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    /// Message safe to show to the user
    pub fn user_message(&self) -> String {
        match self {
            AppError::FileHandling(_) => self.to_string(),
            AppError::BadRequest(msg) | AppError::NotFound(msg) | AppError::PayloadTooLarge(msg) => {
                msg.clone()
            }
            AppError::Internal(_) | AppError::Anyhow(_) => "Internal Server Error".to_string(),
        }
    }

    fn log(&self) {
        match self {
            AppError::FileHandling(msg) => tracing::error!("File handling error: {}", msg),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            AppError::Anyhow(e) => tracing::error!("Anyhow error: {:?}", e),
            _ => {}
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let body = Json(json!({
            "error": self.user_message()
        }));

        (self.status(), body).into_response()
    }
}

/// Renders an error inline on an HTML page instead of as JSON
pub struct PageError {
    pub error: AppError,
    pub html: String,
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        self.error.log();
        (self.error.status(), axum::response::Html(self.html)).into_response()
    }
}
