use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tags every request and its response with an `x-request-id`, reusing the
/// client's value when it is a valid header value.
pub async fn request_id_middleware(mut req: Request, next: Next) -> Response {
    let header = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .filter(|v| v.to_str().is_ok_and(|s| !s.is_empty()))
        .cloned();

    let header = match header {
        Some(value) => value,
        None => match HeaderValue::from_str(&Uuid::new_v4().to_string()) {
            Ok(value) => value,
            Err(_) => return next.run(req).await,
        },
    };

    req.headers_mut().insert(REQUEST_ID_HEADER, header.clone());

    let mut response = next.run(req).await;
    response.headers_mut().insert(REQUEST_ID_HEADER, header);

    response
}
