//! Competition data download into a local directory.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use kaggle_core::{ErrorCode, Failure};

use crate::executor::{KaggleBackend, KaggleOperation};
use crate::normalize::{self, DownloadOutcome};
use crate::tool::{Tool, ToolDefinition};
use crate::validate;

pub struct DownloadCompetitionTool {
    backend: Arc<dyn KaggleBackend>,
}

impl DownloadCompetitionTool {
    pub fn new(backend: Arc<dyn KaggleBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Tool for DownloadCompetitionTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "download_competition_data".to_string(),
            description: "Download a Kaggle competition's data files into a local directory."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "competition_id": {
                        "type": "string",
                        "description": "Competition identifier (URL slug, e.g. 'titanic')"
                    },
                    "download_path": {
                        "type": "string",
                        "description": "Target directory (defaults to ./competitions/<competition-id>)"
                    }
                },
                "required": ["competition_id"]
            }),
        }
    }

    async fn execute(&self, input: Value) -> Result<Value, Failure> {
        let id = validate::required_str(&input, "competition_id")?;
        validate::competition_id(id)?;

        let target = match validate::optional_str(&input, "download_path") {
            Some(path) => {
                validate::download_path(path)?;
                path.to_string()
            }
            None => format!("./competitions/{}", id),
        };

        debug!(competition_id = id, target = %target, "downloading kaggle competition data");

        let result = self
            .backend
            .execute(KaggleOperation::DownloadCompetition {
                competition_id: id.to_string(),
                target_dir: target.clone(),
            })
            .await;
        if !result.success {
            let failure = result.into_failure();
            let failure = if failure.code == ErrorCode::NotFound {
                failure.with_message(format!("Competition '{}' not found or access denied.", id))
            } else {
                failure
            };
            return Err(failure);
        }

        let files = normalize::list_downloaded_files(Path::new(&target));
        Ok(json!(DownloadOutcome::completed(target, files)))
    }
}
