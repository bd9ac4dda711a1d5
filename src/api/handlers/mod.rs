pub mod documents;
pub mod health;
pub mod pages;

use crate::AppState;
use crate::api::error::AppError;
use crate::models::{AnalysisReport, UploadedDocument};
use crate::services::intake::accept_upload;
use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use bytes::BytesMut;
use serde::Deserialize;
use validator::Validate;

/// Path parameter naming a stored upload
#[derive(Deserialize, Validate)]
pub struct DocumentPath {
    #[validate(length(equal = 64, message = "Invalid document id"))]
    pub id: String,
}

impl DocumentPath {
    pub fn checked(self) -> Result<String, AppError> {
        self.validate()
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        Ok(self.id)
    }
}

fn multipart_error(e: MultipartError) -> AppError {
    let err_msg = e.to_string();
    if err_msg.contains("length limit exceeded") {
        AppError::PayloadTooLarge("Request body exceeds the maximum allowed limit".to_string())
    } else {
        AppError::BadRequest(err_msg)
    }
}

/// Reads the `file` field of a multipart form, enforcing the size limit
/// while the body streams in.
pub async fn read_upload(
    state: &AppState,
    mut multipart: Multipart,
) -> Result<UploadedDocument, AppError> {
    let max_size = state.config.max_file_size;

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let mut buffer = BytesMut::new();

        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            if buffer.len() + chunk.len() > max_size {
                return Err(AppError::PayloadTooLarge(format!(
                    "File exceeds the maximum allowed size of {} bytes",
                    max_size
                )));
            }
            buffer.extend_from_slice(&chunk);
        }

        return accept_upload(&filename, buffer.freeze(), &state.config);
    }

    Err(AppError::BadRequest("No file uploaded".to_string()))
}

/// Runs the blocking analysis off the async executor
pub async fn run_analysis(
    state: &AppState,
    document: UploadedDocument,
) -> Result<AnalysisReport, AppError> {
    let analysis = state.analysis.clone();
    tokio::task::spawn_blocking(move || analysis.analyze(&document))
        .await
        .map_err(|e| AppError::Internal(format!("Analysis task failed: {}", e)))?
}
