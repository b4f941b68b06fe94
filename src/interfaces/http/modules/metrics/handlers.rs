use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use metrics_exporter_prometheus::PrometheusHandle;

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// `GET /metrics`, unauthenticated
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "Monitoring",
    responses(
        (status = 200, description = "Prometheus text exposition", content_type = "text/plain")
    )
)]
pub async fn prometheus_metrics(State(state): State<MetricsState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        state.handle.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, routing::get, Router};
    use metrics_exporter_prometheus::PrometheusBuilder;

    #[tokio::test]
    async fn renders_text_exposition() {
        use tower::Service;
        let handle = PrometheusBuilder::new().build_recorder().handle();
        let mut svc = Router::new()
            .route("/metrics", get(prometheus_metrics))
            .with_state(MetricsState { handle })
            .into_service();

        let resp = svc
            .call(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], PROMETHEUS_CONTENT_TYPE);
    }
}
