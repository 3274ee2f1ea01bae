//! Health endpoints.
//!
//! | Path               | Description                                |
//! |--------------------|--------------------------------------------|
//! | `GET /health`      | Aggregated status: 200 if UP, 503 if DOWN  |
//! | `GET /health/live` | Liveness probe, always 200                 |

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

/// Result of a single health check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Up,
    Down(String),
}

impl HealthStatus {
    pub fn is_up(&self) -> bool {
        matches!(self, HealthStatus::Up)
    }
}

/// A named check contributed to `GET /health`.
pub trait HealthIndicator: Send + Sync + 'static {
    fn name(&self) -> &str;

    fn check(&self) -> impl Future<Output = HealthStatus> + Send;
}

trait ErasedIndicator: Send + Sync + 'static {
    fn name(&self) -> &str;
    fn check(&self) -> Pin<Box<dyn Future<Output = HealthStatus> + Send + '_>>;
}

impl<T: HealthIndicator> ErasedIndicator for T {
    fn name(&self) -> &str {
        HealthIndicator::name(self)
    }

    fn check(&self) -> Pin<Box<dyn Future<Output = HealthStatus> + Send + '_>> {
        Box::pin(HealthIndicator::check(self))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthCheckStatus {
    Up,
    Down,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthCheck {
    pub name: String,
    pub status: HealthCheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: HealthCheckStatus,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<HealthCheck>,
    pub uptime_seconds: u64,
}

/// Collects indicators and builds the health router.
#[derive(Default)]
pub struct HealthBuilder {
    checks: Vec<Box<dyn ErasedIndicator>>,
}

impl HealthBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check<H: HealthIndicator>(mut self, indicator: H) -> Self {
        self.checks.push(Box::new(indicator));
        self
    }

    /// Routes for `/health` and `/health/live`, ready to merge into the app.
    pub fn into_router<S: Clone + Send + Sync + 'static>(self) -> Router<S> {
        let state = Arc::new(HealthState {
            checks: self.checks,
            start_time: Instant::now(),
        });
        Router::new()
            .route("/health", get(health_handler))
            .route("/health/live", get(liveness_handler))
            .with_state(state)
    }
}

struct HealthState {
    checks: Vec<Box<dyn ErasedIndicator>>,
    start_time: Instant,
}

impl HealthState {
    async fn aggregate(&self) -> HealthResponse {
        let mut checks = Vec::with_capacity(self.checks.len());
        for indicator in &self.checks {
            let start = Instant::now();
            let status = indicator.check().await;
            let (status, reason) = match status {
                HealthStatus::Up => (HealthCheckStatus::Up, None),
                HealthStatus::Down(reason) => (HealthCheckStatus::Down, Some(reason)),
            };
            checks.push(HealthCheck {
                name: indicator.name().to_string(),
                status,
                reason,
                duration_ms: start.elapsed().as_millis() as u64,
            });
        }
        let all_up = checks.iter().all(|c| c.status == HealthCheckStatus::Up);
        HealthResponse {
            status: if all_up {
                HealthCheckStatus::Up
            } else {
                HealthCheckStatus::Down
            },
            checks,
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

async fn health_handler(State(state): State<Arc<HealthState>>) -> impl IntoResponse {
    let response = state.aggregate().await;
    let status = match response.status {
        HealthCheckStatus::Up => StatusCode::OK,
        HealthCheckStatus::Down => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Json(response))
}

async fn liveness_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
