//! Dataset download into a local directory.

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

pub struct DownloadDatasetTool {
    backend: Arc<dyn KaggleBackend>,
}

impl DownloadDatasetTool {
    pub fn new(backend: Arc<dyn KaggleBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Tool for DownloadDatasetTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "download_kaggle_dataset".to_string(),
            description: "Download and unzip a Kaggle dataset into a local directory."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "dataset_ref": {
                        "type": "string",
                        "description": "Dataset reference in 'owner/dataset-name' format"
                    },
                    "download_path": {
                        "type": "string",
                        "description": "Target directory (defaults to ./datasets/<dataset-name>)"
                    }
                },
                "required": ["dataset_ref"]
            }),
        }
    }

    async fn execute(&self, input: Value) -> Result<Value, Failure> {
        let dataset_ref = validate::required_str(&input, "dataset_ref")?;
        validate::dataset_ref(dataset_ref)?;

        let target = match validate::optional_str(&input, "download_path") {
            Some(path) => {
                validate::download_path(path)?;
                path.to_string()
            }
            None => {
                let name = dataset_ref.split('/').nth(1).unwrap_or(dataset_ref);
                format!("./datasets/{}", name)
            }
        };

        debug!(dataset_ref = dataset_ref, target = %target, "downloading kaggle dataset");

        let result = self
            .backend
            .execute(KaggleOperation::DownloadDataset {
                dataset_ref: dataset_ref.to_string(),
                target_dir: target.clone(),
            })
            .await;
        if !result.success {
            let failure = result.into_failure();
            let failure = if failure.code == ErrorCode::NotFound {
                failure.with_message(format!(
                    "Dataset '{}' not found or access denied.",
                    dataset_ref
                ))
            } else {
                failure
            };
            return Err(failure);
        }

        let files = normalize::list_downloaded_files(Path::new(&target));
        Ok(json!(DownloadOutcome::completed(target, files)))
    }
}
