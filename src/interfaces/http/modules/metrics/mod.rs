//! Prometheus scrape endpoint and the HTTP metrics middleware feeding it

pub mod handlers;
pub mod middleware;

pub use handlers::*;
pub use middleware::http_metrics_middleware;
