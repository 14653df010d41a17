//! Kaggle execution backend.
//!
//! Every tool funnels through `KaggleBackend::execute`: one external
//! operation per invocation, bounded by its class timeout, with every
//! outcome folded into an `ExecutionResult` instead of an escaping error.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use kaggle_core::config::KaggleConfig;
use kaggle_core::{ErrorCategory, ErrorCode, Failure, KaggleCredentials};

/// Timeout class for each kind of external operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationClass {
    Search,
    Download,
    Submit,
}

impl OperationClass {
    pub fn timeout(&self) -> Duration {
        match self {
            OperationClass::Search => Duration::from_secs(60),
            OperationClass::Download => Duration::from_secs(300),
            OperationClass::Submit => Duration::from_secs(120),
        }
    }
}

/// One external Kaggle operation, mapped 1:1 onto a CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KaggleOperation {
    SearchDatasets { query: String },
    DownloadDataset { dataset_ref: String, target_dir: String },
    SearchCompetitions { query: String },
    CompetitionDetails { competition_id: String },
    DownloadCompetition { competition_id: String, target_dir: String },
    SubmitToCompetition { competition_id: String, file_path: String, message: String },
}

impl KaggleOperation {
    pub fn class(&self) -> OperationClass {
        match self {
            KaggleOperation::SearchDatasets { .. }
            | KaggleOperation::SearchCompetitions { .. }
            | KaggleOperation::CompetitionDetails { .. } => OperationClass::Search,
            KaggleOperation::DownloadDataset { .. }
            | KaggleOperation::DownloadCompetition { .. } => OperationClass::Download,
            KaggleOperation::SubmitToCompetition { .. } => OperationClass::Submit,
        }
    }

    /// CLI argv for this operation (binary name excluded).
    pub fn argv(&self) -> Vec<String> {
        let owned = |parts: &[&str]| parts.iter().map(|s| s.to_string()).collect();
        match self {
            KaggleOperation::SearchDatasets { query } => {
                owned(&["datasets", "list", "-s", query, "--csv"])
            }
            KaggleOperation::DownloadDataset { dataset_ref, target_dir } => {
                owned(&["datasets", "download", "-d", dataset_ref, "-p", target_dir, "--unzip"])
            }
            KaggleOperation::SearchCompetitions { query } => {
                owned(&["competitions", "list", "-s", query, "--csv"])
            }
            // The CLI has no single-competition lookup; details are selected
            // from a listing filtered by the identifier.
            KaggleOperation::CompetitionDetails { competition_id } => {
                owned(&["competitions", "list", "-s", competition_id, "--csv"])
            }
            KaggleOperation::DownloadCompetition { competition_id, target_dir } => {
                owned(&["competitions", "download", "-c", competition_id, "-p", target_dir])
            }
            KaggleOperation::SubmitToCompetition { competition_id, file_path, message } => {
                owned(&["competitions", "submit", "-c", competition_id, "-f", file_path, "-m", message])
            }
        }
    }
}

/// Outcome of one backend execution. `success == true` implies `failure` is
/// `None` and `diagnostic` is advisory; failed executions carry a classified
/// failure and unreliable output.
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub success: bool,
    pub output: String,
    pub diagnostic: String,
    pub failure: Option<Failure>,
}

impl ExecutionResult {
    pub fn ok(output: impl Into<String>, diagnostic: impl Into<String>) -> Self {
        Self {
            success: true,
            output: output.into(),
            diagnostic: diagnostic.into(),
            failure: None,
        }
    }

    pub fn failed(failure: Failure) -> Self {
        Self {
            success: false,
            output: String::new(),
            diagnostic: String::new(),
            failure: Some(failure),
        }
    }

    /// The classified failure of a failed execution.
    pub fn into_failure(self) -> Failure {
        self.failure.unwrap_or_else(|| {
            Failure::new(
                ErrorCategory::Unknown,
                ErrorCode::CommandFailed,
                ErrorCategory::Unknown.user_message(),
            )
        })
    }
}

/// Seam between tools and the external Kaggle surface.
///
/// Implementations never panic and never let an error escape: every outcome
/// is an `ExecutionResult`.
#[async_trait]
pub trait KaggleBackend: Send + Sync {
    async fn execute(&self, op: KaggleOperation) -> ExecutionResult;
}

/// Production backend shelling out to the `kaggle` CLI.
pub struct KaggleCli {
    bin: String,
    credentials: KaggleCredentials,
}

impl KaggleCli {
    pub fn new(bin: impl Into<String>, credentials: KaggleCredentials) -> Self {
        Self { bin: bin.into(), credentials }
    }

    pub fn from_config(kaggle: &KaggleConfig) -> Self {
        Self::new(kaggle.bin.clone(), kaggle.credentials.clone())
    }
}

#[async_trait]
impl KaggleBackend for KaggleCli {
    async fn execute(&self, op: KaggleOperation) -> ExecutionResult {
        // Checked before anything external happens, so an unconfigured
        // process never spawns the CLI at all.
        if !self.credentials.is_configured() {
            return ExecutionResult::failed(Failure::missing_credentials());
        }

        let argv = op.argv();
        let timeout = op.class().timeout();
        debug!(
            bin = %self.bin,
            args = ?argv,
            timeout_secs = timeout.as_secs(),
            "executing kaggle command"
        );

        let mut command = Command::new(&self.bin);
        command
            .args(&argv)
            .envs(self.credentials.as_env())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!(bin = %self.bin, error = %e, "failed to spawn kaggle CLI");
                return ExecutionResult::failed(
                    Failure::new(
                        ErrorCategory::ExternalExecution,
                        ErrorCode::CommandFailed,
                        format!("Failed to launch the Kaggle CLI ('{}').", self.bin),
                    )
                    .with_detail(e.to_string()),
                );
            }
        };

        // Dropping the output future kills the child (kill_on_drop), so a
        // timed-out CLI does not linger.
        let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                warn!(error = %e, "failed to collect kaggle CLI output");
                return ExecutionResult::failed(
                    Failure::new(
                        ErrorCategory::ExternalExecution,
                        ErrorCode::CommandFailed,
                        ErrorCategory::ExternalExecution.user_message(),
                    )
                    .with_detail(e.to_string()),
                );
            }
            Err(_) => {
                warn!(args = ?argv, timeout_secs = timeout.as_secs(), "kaggle CLI timed out");
                return ExecutionResult::failed(Failure::timeout(timeout.as_secs()));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if output.status.success() {
            return ExecutionResult::ok(stdout, stderr);
        }

        warn!(exit = ?output.status.code(), "kaggle CLI returned non-zero exit");
        let raw = if stderr.trim().is_empty() {
            stdout
        } else if stdout.trim().is_empty() {
            stderr
        } else {
            format!("{}\n{}", stderr, stdout)
        };
        ExecutionResult::failed(Failure::classified(raw))
    }
}

// ── Test backends ─────────────────────────────────────────────
//
// Public so downstream crates can drive tools without a Kaggle account.

/// Backend returning a fixed result for every operation.
pub struct StaticBackend {
    result: ExecutionResult,
}

impl StaticBackend {
    pub fn ok(output: impl Into<String>) -> Self {
        Self { result: ExecutionResult::ok(output, "") }
    }

    pub fn failing(failure: Failure) -> Self {
        Self { result: ExecutionResult::failed(failure) }
    }
}

#[async_trait]
impl KaggleBackend for StaticBackend {
    async fn execute(&self, _op: KaggleOperation) -> ExecutionResult {
        self.result.clone()
    }
}

/// Backend recording every operation it receives.
pub struct RecordingBackend {
    result: ExecutionResult,
    operations: std::sync::Mutex<Vec<KaggleOperation>>,
}

impl RecordingBackend {
    pub fn returning(result: ExecutionResult) -> Self {
        Self { result, operations: std::sync::Mutex::new(Vec::new()) }
    }

    pub fn operations(&self) -> Vec<KaggleOperation> {
        self.operations.lock().map(|ops| ops.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl KaggleBackend for RecordingBackend {
    async fn execute(&self, op: KaggleOperation) -> ExecutionResult {
        if let Ok(mut ops) = self.operations.lock() {
            ops.push(op);
        }
        self.result.clone()
    }
}

/// Backend delegating to a closure, for tests that need to observe the
/// operation mid-call.
pub struct FnBackend<F>(pub F);

#[async_trait]
impl<F> KaggleBackend for FnBackend<F>
where
    F: Fn(&KaggleOperation) -> ExecutionResult + Send + Sync,
{
    async fn execute(&self, op: KaggleOperation) -> ExecutionResult {
        (self.0)(&op)
    }
}
