//! Keyword search over public Kaggle datasets.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use kaggle_core::Failure;

use crate::executor::{KaggleBackend, KaggleOperation};
use crate::normalize::{self, DatasetRecord, MAX_RESULTS};
use crate::tool::{Tool, ToolDefinition};
use crate::validate;

pub struct SearchDatasetsTool {
    backend: Arc<dyn KaggleBackend>,
}

impl SearchDatasetsTool {
    pub fn new(backend: Arc<dyn KaggleBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Tool for SearchDatasetsTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "search_kaggle_datasets".to_string(),
            description: "Search Kaggle datasets by keyword and return up to 10 matches."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search term (1-100 characters)"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn execute(&self, input: Value) -> Result<Value, Failure> {
        let query = validate::required_str(&input, "query")?;
        validate::dataset_query(query)?;

        debug!(query = query, "searching kaggle datasets");

        let result = self
            .backend
            .execute(KaggleOperation::SearchDatasets { query: query.to_string() })
            .await;
        if !result.success {
            return Err(result.into_failure());
        }

        let rows = normalize::parse_csv_rows(&result.output);
        let records: Vec<DatasetRecord> =
            rows.iter().take(MAX_RESULTS).map(DatasetRecord::from_row).collect();

        Ok(json!({
            "message": normalize::search_message("datasets", records.len()),
            "results": records,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{ExecutionResult, RecordingBackend, StaticBackend};

    fn csv_of(n: usize) -> String {
        let mut raw = String::from("ref,title,downloadCount,lastUpdated,usabilityRating\n");
        for i in 0..n {
            raw.push_str(&format!("owner/ds-{i},Dataset {i},{i},2024-01-01,0.9\n"));
        }
        raw
    }

    #[tokio::test]
    async fn returns_normalized_records() {
        let tool = SearchDatasetsTool::new(Arc::new(StaticBackend::ok(csv_of(2))));
        let payload = tool.execute(json!({"query": "iris"})).await.unwrap();

        assert_eq!(payload["message"], "Found 2 datasets matching the query.");
        assert_eq!(payload["results"][0]["ref"], "owner/ds-0");
        assert_eq!(payload["results"][0]["downloadCount"], 0);
        assert_eq!(payload["results"][1]["subtitle"], "N/A");
    }

    #[tokio::test]
    async fn caps_results_at_ten_preserving_order() {
        let tool = SearchDatasetsTool::new(Arc::new(StaticBackend::ok(csv_of(25))));
        let payload = tool.execute(json!({"query": "iris"})).await.unwrap();

        let results = payload["results"].as_array().unwrap();
        assert_eq!(results.len(), 10);
        assert_eq!(results[0]["ref"], "owner/ds-0");
        assert_eq!(results[9]["ref"], "owner/ds-9");
    }

    #[tokio::test]
    async fn empty_output_is_a_successful_empty_search() {
        let tool = SearchDatasetsTool::new(Arc::new(StaticBackend::ok("")));
        let payload = tool.execute(json!({"query": "iris"})).await.unwrap();

        assert_eq!(payload["message"], "No datasets found matching the query.");
        assert_eq!(payload["results"], json!([]));
    }

    #[tokio::test]
    async fn invalid_query_never_reaches_the_backend() {
        let backend = Arc::new(RecordingBackend::returning(ExecutionResult::ok("", "")));
        let tool = SearchDatasetsTool::new(backend.clone());

        let failure = tool.execute(json!({"query": ""})).await.unwrap_err();
        assert_eq!(failure.category, kaggle_core::ErrorCategory::Validation);
        assert!(backend.operations().is_empty());

        let failure = tool.execute(json!({})).await.unwrap_err();
        assert!(failure.message.contains("'query'"));
        assert!(backend.operations().is_empty());
    }

    #[tokio::test]
    async fn backend_failures_pass_through_classified() {
        let tool = SearchDatasetsTool::new(Arc::new(StaticBackend::failing(
            Failure::classified("401 Unauthorized"),
        )));
        let failure = tool.execute(json!({"query": "iris"})).await.unwrap_err();
        assert_eq!(failure.category, kaggle_core::ErrorCategory::Authentication);
    }
}
