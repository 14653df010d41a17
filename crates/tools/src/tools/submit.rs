//! Competition submission from caller-supplied file content.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};
use tracing::debug;

use kaggle_core::Failure;

use crate::executor::{KaggleBackend, KaggleOperation};
use crate::tool::{Tool, ToolDefinition};
use crate::validate;

const DEFAULT_MESSAGE: &str = "Submitted via MCP";

pub struct SubmitToCompetitionTool {
    backend: Arc<dyn KaggleBackend>,
}

impl SubmitToCompetitionTool {
    pub fn new(backend: Arc<dyn KaggleBackend>) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl Tool for SubmitToCompetitionTool {
    fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: "submit_to_competition".to_string(),
            description: "Submit a predictions file to a Kaggle competition.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "competition_id": {
                        "type": "string",
                        "description": "Competition identifier (URL slug, e.g. 'titanic')"
                    },
                    "file_content": {
                        "type": "string",
                        "description": "Contents of the submission file"
                    },
                    "filename": {
                        "type": "string",
                        "description": "Name for the submission file (e.g. 'submission.csv')"
                    },
                    "message": {
                        "type": "string",
                        "description": "Submission description (defaults to 'Submitted via MCP')"
                    }
                },
                "required": ["competition_id", "file_content", "filename"]
            }),
        }
    }

    async fn execute(&self, input: Value) -> Result<Value, Failure> {
        let id = validate::required_str(&input, "competition_id")?;
        validate::competition_id(id)?;
        let content = validate::required_str(&input, "file_content")?;
        validate::file_content(content)?;
        let filename = validate::required_str(&input, "filename")?;
        validate::submission_filename(filename)?;
        let message = validate::optional_str(&input, "message").unwrap_or(DEFAULT_MESSAGE);

        // The staging directory drops on every exit path, taking the
        // artifact with it.
        let staging = tempfile::tempdir().map_err(|e| Failure::classified(e.to_string()))?;
        let file_path = staging.path().join(filename);
        tokio::fs::write(&file_path, content)
            .await
            .map_err(|e| Failure::classified(e.to_string()))?;

        debug!(competition_id = id, file = %file_path.display(), "submitting to kaggle competition");

        let result = self
            .backend
            .execute(KaggleOperation::SubmitToCompetition {
                competition_id: id.to_string(),
                file_path: file_path.to_string_lossy().into_owned(),
                message: message.to_string(),
            })
            .await;
        if !result.success {
            return Err(result.into_failure());
        }

        Ok(json!({
            "success": true,
            "submission_id": format!("submission-{}", Utc::now().timestamp_millis()),
            "status": "submitted",
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::{ExecutionResult, FnBackend, KaggleOperation, RecordingBackend, StaticBackend};
    use std::path::PathBuf;
    use std::sync::Mutex;

    fn submit_input() -> Value {
        json!({
            "competition_id": "titanic",
            "file_content": "PassengerId,Survived\n892,0\n",
            "filename": "submission.csv",
        })
    }

    #[tokio::test]
    async fn stages_the_file_for_the_cli_and_cleans_up() {
        let seen = Arc::new(Mutex::new(PathBuf::new()));
        let seen_in_backend = seen.clone();
        let backend = FnBackend(move |op: &KaggleOperation| {
            if let KaggleOperation::SubmitToCompetition { file_path, .. } = op {
                let path = PathBuf::from(file_path);
                // The artifact must exist while the operation runs.
                assert!(path.exists());
                *seen_in_backend.lock().unwrap() = path;
            }
            ExecutionResult::ok("Successfully submitted", "")
        });

        let tool = SubmitToCompetitionTool::new(Arc::new(backend));
        let payload = tool.execute(submit_input()).await.unwrap();

        assert_eq!(payload["success"], true);
        assert_eq!(payload["status"], "submitted");
        assert!(payload["submission_id"].as_str().unwrap().starts_with("submission-"));

        let staged = seen.lock().unwrap().clone();
        assert!(staged.ends_with("submission.csv"));
        assert!(!staged.exists());
    }

    #[tokio::test]
    async fn artifact_is_removed_after_failures_too() {
        let seen = Arc::new(Mutex::new(PathBuf::new()));
        let seen_in_backend = seen.clone();
        let backend = FnBackend(move |op: &KaggleOperation| {
            if let KaggleOperation::SubmitToCompetition { file_path, .. } = op {
                *seen_in_backend.lock().unwrap() = PathBuf::from(file_path);
            }
            ExecutionResult::failed(Failure::classified("400: deadline has passed"))
        });

        let tool = SubmitToCompetitionTool::new(Arc::new(backend));
        let failure = tool.execute(submit_input()).await.unwrap_err();
        assert_eq!(failure.category, kaggle_core::ErrorCategory::Unknown);

        let staged = seen.lock().unwrap().clone();
        assert!(staged.ends_with("submission.csv"));
        assert!(!staged.exists());
    }

    #[tokio::test]
    async fn message_defaults_when_not_supplied() {
        let backend = Arc::new(RecordingBackend::returning(ExecutionResult::ok("", "")));
        let tool = SubmitToCompetitionTool::new(backend.clone());

        tool.execute(submit_input()).await.unwrap();

        match &backend.operations()[0] {
            KaggleOperation::SubmitToCompetition { message, .. } => {
                assert_eq!(message, "Submitted via MCP")
            }
            other => panic!("unexpected operation: {:?}", other),
        }
    }

    #[tokio::test]
    async fn traversal_filenames_never_reach_the_filesystem() {
        let backend = Arc::new(RecordingBackend::returning(ExecutionResult::ok("", "")));
        let tool = SubmitToCompetitionTool::new(backend.clone());

        let mut input = submit_input();
        input["filename"] = json!("../../etc/passwd");
        let failure = tool.execute(input).await.unwrap_err();

        assert_eq!(failure.category, kaggle_core::ErrorCategory::Validation);
        assert!(backend.operations().is_empty());
    }

    #[tokio::test]
    async fn empty_content_is_rejected() {
        let tool = SubmitToCompetitionTool::new(Arc::new(StaticBackend::ok("")));
        let mut input = submit_input();
        input["file_content"] = json!("");
        let failure = tool.execute(input).await.unwrap_err();
        assert_eq!(failure.category, kaggle_core::ErrorCategory::Validation);
    }
}
