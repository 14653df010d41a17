//! Single-competition lookup by identifier.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use kaggle_core::{ErrorCategory, ErrorCode, Failure};

use crate::executor::{KaggleBackend, KaggleOperation};
use crate::normalize::{self, CompetitionRecord};
use crate::tool::{Tool, ToolDefinition};
use crate::validate;

pub struct CompetitionDetailsTool {
    backend: Arc<dyn KaggleBackend>,
}

impl CompetitionDetailsTool {
    pub fn new(backend: Arc<dyn KaggleBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Tool for CompetitionDetailsTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "get_competition_details".to_string(),
            description: "Fetch details for one Kaggle competition by its identifier."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "competition_id": {
                        "type": "string",
                        "description": "Competition identifier (URL slug, e.g. 'titanic')"
                    }
                },
                "required": ["competition_id"]
            }),
        }
    }

    async fn execute(&self, input: Value) -> Result<Value, Failure> {
        let id = validate::required_str(&input, "competition_id")?;
        validate::competition_id(id)?;

        debug!(competition_id = id, "fetching kaggle competition details");

        let result = self
            .backend
            .execute(KaggleOperation::CompetitionDetails { competition_id: id.to_string() })
            .await;
        if !result.success {
            let failure = result.into_failure();
            let failure = if failure.code == ErrorCode::NotFound {
                failure.with_message(format!("Competition '{}' not found.", id))
            } else {
                failure
            };
            return Err(failure);
        }

        // The listing is a keyword search; select the exact competition by
        // its ref slug, case-insensitively.
        let rows = normalize::parse_csv_rows(&result.output);
        let row = rows.iter().find(|row| {
            row.get("ref")
                .map(|r| normalize::competition_slug(r).eq_ignore_ascii_case(id))
                .unwrap_or(false)
        });

        match row {
            Some(row) => Ok(json!(CompetitionRecord::from_row(row))),
            None => Err(Failure::new(
                ErrorCategory::ExternalExecution,
                ErrorCode::NotFound,
                format!("Competition '{}' not found.", id),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::StaticBackend;

    const CSV: &str = "ref,deadline,category,reward,teamCount,userHasEntered\n\
        https://www.kaggle.com/competitions/titanic,2030-01-01 00:00:00,Getting Started,Knowledge,14000,false\n\
        house-prices,2030-06-01 00:00:00,Getting Started,Knowledge,5000,false\n";

    #[tokio::test]
    async fn selects_the_exact_slug_match() {
        let tool = CompetitionDetailsTool::new(Arc::new(StaticBackend::ok(CSV)));
        let payload = tool.execute(json!({"competition_id": "titanic"})).await.unwrap();

        assert_eq!(payload["url"], "https://www.kaggle.com/competitions/titanic");
        assert_eq!(payload["teamCount"], 14000);
        assert_eq!(payload["description"], "N/A");
    }

    #[tokio::test]
    async fn slug_matching_is_case_insensitive() {
        let tool = CompetitionDetailsTool::new(Arc::new(StaticBackend::ok(CSV)));
        let payload = tool.execute(json!({"competition_id": "Titanic"})).await.unwrap();
        assert_eq!(payload["ref"], "https://www.kaggle.com/competitions/titanic");
    }

    #[tokio::test]
    async fn no_match_is_not_found() {
        let tool = CompetitionDetailsTool::new(Arc::new(StaticBackend::ok(CSV)));
        let failure = tool
            .execute(json!({"competition_id": "spaceship-titanic"}))
            .await
            .unwrap_err();

        assert_eq!(failure.code, ErrorCode::NotFound);
        assert_eq!(failure.message, "Competition 'spaceship-titanic' not found.");
    }

    #[tokio::test]
    async fn invalid_id_is_a_validation_failure() {
        let tool = CompetitionDetailsTool::new(Arc::new(StaticBackend::ok(CSV)));
        let failure = tool
            .execute(json!({"competition_id": "has space"}))
            .await
            .unwrap_err();
        assert_eq!(failure.category, ErrorCategory::Validation);
    }
}
