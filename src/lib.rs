pub mod api;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;

use crate::config::AppConfig;
use crate::services::analysis::AnalysisService;
use crate::services::document_store::DocumentStore;
use crate::services::sentiment::LexiconScorer;
use crate::services::word_cloud::create_renderer;
use crate::api::middleware::request_id::REQUEST_ID_HEADER;
use axum::{
    Router,
    extract::Request,
    http::Response,
    middleware::from_fn,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{Span, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Extra room for multipart framing on top of the file itself
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::documents::upload_document,
        api::handlers::documents::analyze_document,
        api::handlers::documents::delete_document,
        api::handlers::documents::analyze_upload,
        api::handlers::health::health_check,
    ),
    components(
        schemas(
            api::handlers::documents::UploadForm,
            api::handlers::documents::UploadResponse,
            api::handlers::documents::AnalysisResponse,
            api::handlers::documents::WordCloudPayload,
            api::handlers::health::HealthResponse,
            models::SentimentLabel,
        )
    ),
    tags(
        (name = "documents", description = "Upload and sentiment analysis endpoints"),
        (name = "system", description = "Service status")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub documents: Arc<DocumentStore>,
    pub analysis: Arc<AnalysisService>,
}

impl AppState {
    /// Wires the default scorer and the word-cloud capability the config asks for
    pub fn new(config: AppConfig) -> Self {
        let analysis = AnalysisService::new(
            &config,
            Arc::new(LexiconScorer::default()),
            create_renderer(&config),
        );

        Self {
            documents: Arc::new(DocumentStore::new(config.max_documents)),
            analysis: Arc::new(analysis),
            config,
        }
    }
}

/// Request span carrying the id the request-id middleware assigned
fn request_span(request: &Request) -> Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");
    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

/// Routes wrapped, inside out, in body limit, CORS, tracing and request ids.
/// The request-id middleware is outermost so every span sees the id.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(api::handlers::pages::index))
        .route("/upload", post(api::handlers::pages::upload))
        .route(
            "/documents/:id/analyze",
            post(api::handlers::pages::analyze),
        )
        .route("/health", get(api::handlers::health::health_check))
        .route(
            "/api/documents",
            post(api::handlers::documents::upload_document),
        )
        .route(
            "/api/documents/:id",
            axum::routing::delete(api::handlers::documents::delete_document),
        )
        .route(
            "/api/documents/:id/analyze",
            post(api::handlers::documents::analyze_document),
        )
        .route("/api/analyze", post(api::handlers::documents::analyze_upload))
        .layer(axum::extract::DefaultBodyLimit::max(
            state.config.max_file_size + MULTIPART_OVERHEAD,
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
                .expose_headers(Any),
        )
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(request_span)
                .on_request(|request: &Request, _span: &Span| {
                    info!("📥 {} {}", request.method(), request.uri());
                })
                .on_response(|response: &Response<_>, latency: Duration, _span: &Span| {
                    info!(
                        "📤 Finished in {:?} with status {}",
                        latency,
                        response.status()
                    );
                }),
        )
        .layer(from_fn(api::middleware::request_id::request_id_middleware))
        .with_state(state)
}
