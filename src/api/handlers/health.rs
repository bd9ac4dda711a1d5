use crate::AppState;
use axum::{Json, extract::State, response::IntoResponse};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub word_cloud: String,
    pub documents: usize,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health status", body = HealthResponse)
    ),
    tag = "system"
)]
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let word_cloud = if state.analysis.word_cloud_enabled() {
        "enabled"
    } else {
        "disabled"
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        word_cloud: word_cloud.to_string(),
        documents: state.documents.len(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
