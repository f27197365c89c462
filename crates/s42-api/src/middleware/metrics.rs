//! # Request Metrics
//!
//! Lightweight in-process counters, reported as JSON at `/health/metrics`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use serde::Serialize;
use utoipa::ToSchema;

/// Shared metrics state.
#[derive(Debug, Clone, Default)]
pub struct ApiMetrics {
    request_count: Arc<AtomicU64>,
    error_count: Arc<AtomicU64>,
    upload_count: Arc<AtomicU64>,
}

/// Point-in-time copy of the counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct MetricsSnapshot {
    /// Requests handled, health probes excluded.
    pub requests: u64,
    /// Responses with a 4xx or 5xx status.
    pub errors: u64,
    /// Builds published since start.
    pub uploads: u64,
}

impl ApiMetrics {
    /// Create zeroed counters.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    pub fn errors(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }

    pub fn uploads(&self) -> u64 {
        self.upload_count.load(Ordering::Relaxed)
    }

    /// Count one published build.
    pub fn record_upload(&self) {
        self.upload_count.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            requests: self.requests(),
            errors: self.errors(),
            uploads: self.uploads(),
        }
    }

    fn observe(&self, response: &Response) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
        if response.status().is_server_error() || response.status().is_client_error() {
            self.error_count.fetch_add(1, Ordering::Relaxed);
        }
    }
}

/// Middleware that increments request and error counters.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let metrics = request.extensions().get::<ApiMetrics>().cloned();

    let response = next.run(request).await;

    if let Some(m) = metrics {
        m.observe(&response);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn counts_requests_and_errors() {
        let metrics = ApiMetrics::new();
        metrics.observe(&StatusCode::OK.into_response());
        metrics.observe(&StatusCode::NOT_FOUND.into_response());
        metrics.observe(&StatusCode::INTERNAL_SERVER_ERROR.into_response());
        assert_eq!(metrics.requests(), 3);
        assert_eq!(metrics.errors(), 2);
    }

    #[test]
    fn clones_share_counters() {
        let metrics = ApiMetrics::new();
        let other = metrics.clone();
        other.record_upload();
        assert_eq!(
            metrics.snapshot(),
            MetricsSnapshot {
                requests: 0,
                errors: 0,
                uploads: 1
            }
        );
    }
}
