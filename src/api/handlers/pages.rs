use super::{DocumentPath, read_upload, run_analysis};
use crate::AppState;
use crate::api::error::{AppError, PageError};
use crate::api::views::{PageView, render_page};
use axum::{
    extract::{Multipart, Path, State},
    response::Html,
};
use tracing::info;

fn page_error(error: AppError) -> PageError {
    let html = render_page(&PageView {
        error: Some(error.user_message()),
        ..PageView::default()
    });
    PageError { error, html }
}

pub async fn index() -> Html<String> {
    Html(render_page(&PageView::default()))
}

pub async fn upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Html<String>, PageError> {
    let document = read_upload(&state, multipart).await.map_err(page_error)?;
    info!("📄 Stored {} ({} bytes)", document.filename, document.size());

    let html = render_page(&PageView {
        document: Some(&document),
        ..PageView::default()
    });
    state.documents.insert(document);

    Ok(Html(html))
}

pub async fn analyze(
    State(state): State<AppState>,
    Path(path): Path<DocumentPath>,
) -> Result<Html<String>, PageError> {
    let id = path.checked().map_err(page_error)?;
    let document = state.documents.get(&id).ok_or_else(|| {
        page_error(AppError::NotFound(
            "This upload is no longer available. Upload the file again.".to_string(),
        ))
    })?;

    let report = run_analysis(&state, document.clone())
        .await
        .map_err(page_error)?;

    Ok(Html(render_page(&PageView {
        document: Some(&document),
        report: Some(&report),
        error: None,
    })))
}
