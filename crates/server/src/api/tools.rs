//! Tool discovery and invocation endpoints.
//!
//! SRP: the REST face of the tool registry. Dispatch semantics mirror the
//! MCP transport: tool-level failures ride inside a 200 envelope, only an
//! unknown tool name is a transport-level 404.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

use kaggle_tools::ToolDefinition;

use crate::state::AppState;

#[derive(Serialize)]
pub struct ToolsResponse {
    pub tools: Vec<ToolDefinition>,
}

/// Capability discovery: every registered tool with its input schema.
pub async fn list_tools(State(state): State<Arc<AppState>>) -> Json<ToolsResponse> {
    Json(ToolsResponse {
        tools: state.registry.list(),
    })
}

/// Invoke a tool by name with the request body as its input.
pub async fn call_tool(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Json(input): Json<Value>,
) -> Result<Json<Value>, (axum::http::StatusCode, Json<Value>)> {
    let tool = state.registry.get(&name).ok_or_else(|| {
        (
            axum::http::StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "success": false,
                "error": { "message": format!("Unknown tool: {name}") }
            })),
        )
    })?;

    tracing::debug!(tool = %name, "Invoking tool over HTTP");

    match tool.execute(input).await {
        Ok(payload) => Ok(Json(payload)),
        Err(failure) => {
            failure.log();
            Ok(Json(failure.to_payload()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use kaggle_core::Failure;
    use kaggle_tools::{default_registry, ProbeStatus, StaticBackend};
    use tokio::sync::RwLock;

    const DATASET_CSV: &str = "\
ref,title,subtitle,downloadCount,lastUpdated,usabilityRating
alice/iris,Iris Flowers,Classic ML dataset,120,2024-01-01 00:00:00,0.88
";

    fn state_over(backend: StaticBackend) -> Arc<AppState> {
        let registry = default_registry(Arc::new(backend)).unwrap();
        Arc::new(AppState {
            registry: Arc::new(registry),
            environment: "test".to_string(),
            started_at: Utc::now(),
            probe: Arc::new(RwLock::new(ProbeStatus::Unknown)),
        })
    }

    #[tokio::test]
    async fn listing_exposes_the_full_catalogue() {
        let resp = list_tools(State(state_over(StaticBackend::ok("")))).await;
        assert_eq!(resp.0.tools.len(), 6);
        assert!(resp
            .0
            .tools
            .iter()
            .all(|t| t.input_schema.get("type").is_some()));
    }

    #[tokio::test]
    async fn invoking_a_tool_returns_its_payload() {
        let state = state_over(StaticBackend::ok(DATASET_CSV));
        let result = call_tool(
            State(state),
            Path("search_kaggle_datasets".to_string()),
            Json(serde_json::json!({"query": "iris"})),
        )
        .await
        .unwrap();

        assert_eq!(
            result.0["message"],
            "Found 1 datasets matching the query."
        );
        assert_eq!(result.0["results"][0]["ref"], "alice/iris");
    }

    #[tokio::test]
    async fn tool_failures_keep_the_success_envelope() {
        let state = state_over(StaticBackend::failing(Failure::classified(
            "404 - Not Found",
        )));
        let result = call_tool(
            State(state),
            Path("search_kaggle_datasets".to_string()),
            Json(serde_json::json!({"query": "iris"})),
        )
        .await
        .unwrap();

        assert_eq!(result.0["success"], false);
        assert_eq!(result.0["error"]["code"], "NotFound");
    }

    #[tokio::test]
    async fn unknown_tool_is_a_404() {
        let state = state_over(StaticBackend::ok(""));
        let err = call_tool(
            State(state),
            Path("no_such_tool".to_string()),
            Json(serde_json::json!({})),
        )
        .await
        .unwrap_err();

        assert_eq!(err.0, axum::http::StatusCode::NOT_FOUND);
        assert_eq!(err.1 .0["success"], false);
        assert_eq!(
            err.1 .0["error"]["message"],
            "Unknown tool: no_such_tool"
        );
    }
}
