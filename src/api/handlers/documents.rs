use super::{DocumentPath, read_upload, run_analysis};
use crate::AppState;
use crate::api::error::AppError;
use crate::models::{AnalysisReport, SentimentLabel};
use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::StatusCode,
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

/// Multipart body with a single `.txt` file
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

#[derive(Serialize, ToSchema)]
pub struct UploadResponse {
    pub document_id: String,
    pub filename: String,
    pub size: usize,
}

#[derive(Serialize, ToSchema)]
pub struct WordCloudPayload {
    pub content_type: String,
    pub width: u32,
    pub height: u32,
    pub words: usize,
    pub data_base64: String,
}

#[derive(Serialize, ToSchema)]
pub struct AnalysisResponse {
    pub document_id: String,
    pub filename: String,
    pub label: SentimentLabel,
    pub score: f64,
    /// Score rounded to two decimals
    pub score_display: String,
    /// (score + 1) / 2
    pub progress: f64,
    pub word_count: usize,
    pub word_cloud: Option<WordCloudPayload>,
    pub notice: Option<String>,
}

impl From<AnalysisReport> for AnalysisResponse {
    fn from(report: AnalysisReport) -> Self {
        let score_display = report.score_display();
        Self {
            document_id: report.document_id,
            filename: report.filename,
            label: report.sentiment.label,
            score: report.sentiment.score,
            score_display,
            progress: report.progress,
            word_count: report.word_count,
            word_cloud: report.word_cloud.map(|image| WordCloudPayload {
                content_type: mime::IMAGE_SVG.to_string(),
                width: image.width,
                height: image.height,
                words: image.words,
                data_base64: STANDARD.encode(image.svg.as_bytes()),
            }),
            notice: report.notice,
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/documents",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Document stored", body = UploadResponse),
        (status = 400, description = "Not a .txt text file"),
        (status = 413, description = "File too large")
    ),
    tag = "documents"
)]
pub async fn upload_document(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let document = read_upload(&state, multipart).await?;
    let response = UploadResponse {
        document_id: document.id.clone(),
        filename: document.filename.clone(),
        size: document.size(),
    };

    state.documents.insert(document);
    info!("📄 Stored {} ({} bytes)", response.filename, response.size);

    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/api/documents/{id}/analyze",
    params(
        ("id" = String, Path, description = "Document id returned by the upload")
    ),
    responses(
        (status = 200, description = "Sentiment analysis", body = AnalysisResponse),
        (status = 404, description = "Unknown document"),
        (status = 500, description = "File handling failure")
    ),
    tag = "documents"
)]
pub async fn analyze_document(
    State(state): State<AppState>,
    Path(path): Path<DocumentPath>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let id = path.checked()?;
    let document = state
        .documents
        .get(&id)
        .ok_or_else(|| AppError::NotFound("Document not found".to_string()))?;

    let report = run_analysis(&state, document).await?;
    Ok(Json(report.into()))
}

#[utoipa::path(
    delete,
    path = "/api/documents/{id}",
    params(
        ("id" = String, Path, description = "Document id returned by the upload")
    ),
    responses(
        (status = 204, description = "Document forgotten"),
        (status = 404, description = "Unknown document")
    ),
    tag = "documents"
)]
pub async fn delete_document(
    State(state): State<AppState>,
    Path(path): Path<DocumentPath>,
) -> Result<StatusCode, AppError> {
    let id = path.checked()?;
    state
        .documents
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| AppError::NotFound("Document not found".to_string()))
}

#[utoipa::path(
    post,
    path = "/api/analyze",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Sentiment analysis", body = AnalysisResponse),
        (status = 400, description = "Not a .txt text file"),
        (status = 413, description = "File too large"),
        (status = 500, description = "File handling failure")
    ),
    tag = "documents"
)]
pub async fn analyze_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisResponse>, AppError> {
    let document = read_upload(&state, multipart).await?;
    let report = run_analysis(&state, document).await?;
    Ok(Json(report.into()))
}
