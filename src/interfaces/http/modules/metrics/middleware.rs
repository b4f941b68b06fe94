//! Records per-route request counts and latencies.
//!
//! - `http_requests_total{method, path, status}` counter
//! - `http_request_duration_seconds{method, path}` histogram
//! - `http_requests_in_flight` gauge

use std::time::Instant;

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};

/// `path` label for requests that matched no route
const UNMATCHED_PATH: &str = "<unmatched>";

pub async fn http_metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_PATH.to_string());

    let in_flight = metrics::gauge!("http_requests_in_flight");
    in_flight.increment(1.0);
    let start = Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed().as_secs_f64();
    in_flight.decrement(1.0);

    let status = response.status().as_u16().to_string();

    metrics::counter!(
        "http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status
    )
    .increment(1);
    metrics::histogram!("http_request_duration_seconds", "method" => method, "path" => path)
        .record(duration);

    response
}
