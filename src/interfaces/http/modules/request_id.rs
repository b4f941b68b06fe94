//! Request ID middleware
//!
//! Reuses the caller's `X-Request-Id` or generates a UUID, runs the rest of
//! the stack inside a span carrying it, and echoes it in the response.

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use tracing::Instrument;
use uuid::Uuid;

/// Header name for the request correlation ID.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID, stored in request extensions.
///
/// Extract in handlers: `Extension(RequestId(id)): Extension<RequestId>`
#[derive(Clone, Debug)]
pub struct RequestId(pub String);

pub async fn request_id_middleware(mut request: Request<Body>, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .map(String::from)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    request
        .extensions_mut()
        .insert(RequestId(request_id.clone()));

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %request.method(),
        uri = %request.uri(),
    );

    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = request_id.parse() {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::get, Extension, Router};

    async fn echo(Extension(RequestId(id)): Extension<RequestId>) -> String {
        id
    }

    async fn call(req: Request<Body>) -> Response {
        use tower::Service;
        let mut svc = Router::new()
            .route("/", get(echo))
            .layer(middleware::from_fn(request_id_middleware))
            .into_service();
        svc.call(req).await.unwrap()
    }

    #[tokio::test]
    async fn incoming_id_is_propagated() {
        let req = Request::builder()
            .uri("/")
            .header(REQUEST_ID_HEADER, "abc-123")
            .body(Body::empty())
            .unwrap();
        let resp = call(req).await;
        assert_eq!(resp.headers()[REQUEST_ID_HEADER], "abc-123");
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"abc-123");
    }

    #[tokio::test]
    async fn missing_id_is_generated() {
        let resp = call(Request::builder().uri("/").body(Body::empty()).unwrap()).await;
        let id = resp.headers()[REQUEST_ID_HEADER].to_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }
}
