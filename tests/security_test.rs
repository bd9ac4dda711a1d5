use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use call_sentiment::config::AppConfig;
use call_sentiment::{AppState, create_app};
use http_body_util::BodyExt;
use tower::ServiceExt;

const BOUNDARY: &str = "---------------------------123456789012345678901234567";

fn app() -> Router {
    let _ = tracing_subscriber::fmt::try_init();
    create_app(AppState::new(AppConfig::development()))
}

async fn upload(app: &Router, filename: &str, content: &[u8]) -> (StatusCode, serde_json::Value) {
    let mut body = format!(
        "--{boundary}\r\n\
        Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
        Content-Type: text/plain\r\n\r\n",
        boundary = BOUNDARY
    )
    .into_bytes();
    body.extend_from_slice(content);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/documents")
                .header(
                    "Content-Type",
                    format!("multipart/form-data; boundary={}", BOUNDARY),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_path_traversal_is_sanitized() {
    let app = app();

    // Accepted, stored under the bare file name
    let (status, json) = upload(&app, "../../../tmp/calls.txt", b"Safe content").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["filename"], "calls.txt");
}

#[tokio::test]
async fn test_upload_restrictions() {
    let app = app();

    let (status, _) = upload(&app, "malware.exe", b"MZ content").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = upload(&app, ".hidden.txt", b"hello").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // PNG renamed to .txt
    let (status, json) = upload(
        &app,
        "calls.txt",
        &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D],
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("BINARY_AS_TEXT"));

    let (status, json) = upload(&app, "calls.txt", b"line one\0line two").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("BINARY_AS_TEXT"));
}

#[tokio::test]
async fn test_same_content_same_document_id() {
    let app = app();

    let (_, first) = upload(&app, "monday.txt", b"Thanks for the quick fix").await;
    let (_, second) = upload(&app, "tuesday.txt", b"Thanks for the quick fix").await;
    let (_, other) = upload(&app, "monday.txt", b"Still broken").await;

    assert_eq!(first["document_id"], second["document_id"]);
    assert_ne!(first["document_id"], other["document_id"]);
}

#[tokio::test]
async fn test_non_utf8_upload_is_rejected() {
    let app = app();

    let (status, json) = upload(&app, "calls.txt", b"hi\xc3\x28!").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("INVALID_ENCODING"));

    // A leading BOM is still valid UTF-8
    let (status, _) = upload(&app, "calls.txt", b"\xef\xbb\xbfAgent: hello").await;
    assert_eq!(status, StatusCode::OK);
}
