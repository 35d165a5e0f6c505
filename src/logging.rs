use std::time::Instant;

use axum::{
    extract::Request,
    http::header::{ACCEPT, CONTENT_TYPE},
    middleware::Next,
    response::Response,
};
use tracing::{info, warn};

pub async fn request_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let accept = header_str(request.headers().get(ACCEPT)).to_string();
    let started_at = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let content_type = header_str(response.headers().get(CONTENT_TYPE));
    let elapsed_ms = started_at.elapsed().as_millis();

    info!(
        method = %method,
        path = %path,
        status = status.as_u16(),
        accept = %accept,
        content_type = %content_type,
        duration_ms = elapsed_ms,
        "request summary"
    );

    if status.is_server_error() {
        warn!(method = %method, path = %path, accept = %accept, "response negotiation failed");
    }

    response
}

fn header_str(value: Option<&axum::http::HeaderValue>) -> &str {
    value.and_then(|value| value.to_str().ok()).unwrap_or("-")
}
