//! HTTP Middleware
//!
//! 按状态码记录失败请求：4xx → warn，5xx → error

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms,
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            method = %method,
            uri = %uri,
            status = status.as_u16(),
            elapsed_ms,
            "HTTP client error"
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        routing::post,
        Router,
    };
    use tower::util::ServiceExt;

    async fn mixed() -> &'static str {
        "RIFF"
    }

    async fn rejected() -> StatusCode {
        StatusCode::UNPROCESSABLE_ENTITY
    }

    async fn failed() -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn create_test_router() -> Router {
        Router::new()
            .route("/mixed", post(mixed))
            .route("/rejected", post(rejected))
            .route("/failed", post(failed))
            .layer(axum::middleware::from_fn(error_logging_middleware))
    }

    async fn status_of(uri: &str) -> StatusCode {
        let request = HttpRequest::builder()
            .method("POST")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        create_test_router().oneshot(request).await.unwrap().status()
    }

    #[tokio::test]
    async fn test_responses_pass_through_unchanged() {
        assert_eq!(status_of("/mixed").await, StatusCode::OK);
        assert_eq!(status_of("/rejected").await, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(status_of("/failed").await, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        assert_eq!(status_of("/missing").await, StatusCode::NOT_FOUND);
    }
}
