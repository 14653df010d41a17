//! Keyword search over Kaggle competitions, with lifecycle filtering.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use tracing::debug;

use kaggle_core::Failure;

use crate::executor::{KaggleBackend, KaggleOperation};
use crate::normalize::{self, CompetitionRecord, MAX_RESULTS};
use crate::tool::{Tool, ToolDefinition};
use crate::validate;

pub struct SearchCompetitionsTool {
    backend: Arc<dyn KaggleBackend>,
}

impl SearchCompetitionsTool {
    pub fn new(backend: Arc<dyn KaggleBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Tool for SearchCompetitionsTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "search_kaggle_competitions".to_string(),
            description: "Search Kaggle competitions by keyword, optionally filtered by status."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "Search term (up to 100 characters, empty lists everything)"
                    },
                    "status": {
                        "type": "string",
                        "enum": ["all", "active", "completed"],
                        "description": "Lifecycle filter (default 'all')"
                    }
                },
                "required": ["query"]
            }),
        }
    }

    async fn execute(&self, input: Value) -> Result<Value, Failure> {
        let query = validate::required_str(&input, "query")?;
        validate::competition_query(query)?;
        let status = match validate::optional_str(&input, "status") {
            Some(value) => {
                validate::status(value)?;
                value
            }
            None => "all",
        };

        debug!(query = query, status = status, "searching kaggle competitions");

        let result = self
            .backend
            .execute(KaggleOperation::SearchCompetitions { query: query.to_string() })
            .await;
        if !result.success {
            return Err(result.into_failure());
        }

        let rows = normalize::parse_csv_rows(&result.output);
        // Filter first, then cap, so a page of closed competitions cannot
        // mask active ones further down the listing.
        let rows = normalize::filter_by_status(rows, status, Utc::now().naive_utc());
        let records: Vec<CompetitionRecord> =
            rows.iter().take(MAX_RESULTS).map(CompetitionRecord::from_row).collect();

        Ok(json!({
            "message": normalize::search_message("competitions", records.len()),
            "results": records,
        }))
    }
}
