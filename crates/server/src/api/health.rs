//! Health endpoint.
//!
//! SRP: server readiness and credential probe reporting.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub timestamp: String,
    pub environment: String,
    pub credentials: &'static str,
}

/// Liveness plus the advisory credential probe outcome. Always 200;
/// invalid credentials are reported, not enforced.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let credentials = state.probe.read().await.as_str();
    let uptime_s = (Utc::now() - state.started_at).num_seconds();
    tracing::debug!(uptime_s, credentials, "Health check");

    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now().to_rfc3339(),
        environment: state.environment.clone(),
        credentials,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kaggle_tools::{default_registry, ProbeStatus, StaticBackend};
    use tokio::sync::RwLock;

    fn test_state(probe: ProbeStatus) -> Arc<AppState> {
        let registry = default_registry(Arc::new(StaticBackend::ok(""))).unwrap();
        Arc::new(AppState {
            registry: Arc::new(registry),
            environment: "test".to_string(),
            started_at: Utc::now(),
            probe: Arc::new(RwLock::new(probe)),
        })
    }

    #[tokio::test]
    async fn health_reports_probe_outcome() {
        let resp = health(State(test_state(ProbeStatus::Valid))).await;
        assert_eq!(resp.0.status, "ok");
        assert_eq!(resp.0.credentials, "valid");
        assert_eq!(resp.0.environment, "test");
    }

    #[tokio::test]
    async fn health_is_ok_even_with_invalid_credentials() {
        let resp = health(State(test_state(ProbeStatus::Invalid))).await;
        assert_eq!(resp.0.status, "ok");
        assert_eq!(resp.0.credentials, "invalid");
    }

    #[tokio::test]
    async fn health_timestamp_is_rfc3339() {
        let resp = health(State(test_state(ProbeStatus::Unknown))).await;
        assert!(chrono::DateTime::parse_from_rfc3339(&resp.0.timestamp).is_ok());
        assert_eq!(resp.0.credentials, "unknown");
    }
}
