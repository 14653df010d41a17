use serde::Serialize;
use thiserror::Error;

/// Closed set of failure classes used for user messaging and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCategory {
    Authentication,
    Validation,
    ExternalExecution,
    FileSystem,
    Network,
    Unknown,
}

impl ErrorCategory {
    /// Default user-safe message when no contextual one applies.
    pub fn user_message(&self) -> &'static str {
        match self {
            ErrorCategory::Authentication => {
                "Kaggle authentication failed. Check KAGGLE_USERNAME and KAGGLE_KEY."
            }
            ErrorCategory::Validation => "Invalid input provided.",
            ErrorCategory::ExternalExecution => "Kaggle operation failed.",
            ErrorCategory::FileSystem => "File operation failed.",
            ErrorCategory::Network => "Network error while reaching Kaggle.",
            ErrorCategory::Unknown => "An unexpected error occurred.",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    MissingCredentials,
    InvalidCredentials,
    InvalidInput,
    NotFound,
    AccessDenied,
    Timeout,
    CommandFailed,
    FileNotFound,
    PermissionDenied,
    NetworkError,
}

/// A classified, user-presentable failure. `message` is safe to return to
/// callers; `raw_detail` (stderr, HTTP bodies) is logged only and never
/// serialized into payloads.
#[derive(Debug, Clone, Error, Serialize)]
#[error("{category:?}/{code:?}: {message}")]
pub struct Failure {
    pub category: ErrorCategory,
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip)]
    pub raw_detail: Option<String>,
}

impl Failure {
    pub fn new(category: ErrorCategory, code: ErrorCode, message: impl Into<String>) -> Self {
        Self { category, code, message: message.into(), raw_detail: None }
    }

    /// Classify raw upstream text into a failure carrying that text as detail.
    pub fn classified(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let (category, code) = classify(&raw);
        Self {
            category,
            code,
            message: category.user_message().to_string(),
            raw_detail: Some(raw),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Validation, ErrorCode::InvalidInput, message)
    }

    pub fn missing_credentials() -> Self {
        Self::new(
            ErrorCategory::Authentication,
            ErrorCode::MissingCredentials,
            "Kaggle credentials are not configured. Set KAGGLE_USERNAME and KAGGLE_KEY.",
        )
    }

    pub fn timeout(seconds: u64) -> Self {
        Self::new(
            ErrorCategory::ExternalExecution,
            ErrorCode::Timeout,
            format!("Kaggle operation timed out after {}s.", seconds),
        )
    }

    /// Replace the user-facing message, keeping classification and detail.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Attach raw detail for server-side logging.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.raw_detail = Some(detail.into());
        self
    }

    /// Caller-visible JSON shape. Raw detail stays out of the payload.
    pub fn to_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "success": false,
            "error": {
                "category": self.category,
                "code": self.code,
                "message": self.message,
            },
        })
    }

    /// Log the failure, including raw detail visible server-side only.
    pub fn log(&self) {
        match &self.raw_detail {
            Some(detail) => tracing::warn!(
                category = ?self.category,
                code = ?self.code,
                message = %self.message,
                raw_detail = %detail,
                "tool failure"
            ),
            None => tracing::warn!(
                category = ?self.category,
                code = ?self.code,
                message = %self.message,
                "tool failure"
            ),
        }
    }
}

/// Keyword classification of raw error text, first match wins.
///
/// Pure and total: any input maps to exactly one (category, code) pair, junk
/// falls through to `Unknown`. Scan order is the fixed priority:
/// authentication, validation, execution markers, filesystem, network.
pub fn classify(raw: &str) -> (ErrorCategory, ErrorCode) {
    let text = raw.to_lowercase();
    let has = |needles: &[&str]| needles.iter().any(|n| text.contains(n));

    if has(&["401", "unauthorized", "credential", "api key", "apikey", "authentication", "login"]) {
        let code = if has(&["missing", "required", "not set", "not configured"]) {
            ErrorCode::MissingCredentials
        } else {
            ErrorCode::InvalidCredentials
        };
        return (ErrorCategory::Authentication, code);
    }
    if has(&["invalid input", "validation", "must match", "must be"]) {
        return (ErrorCategory::Validation, ErrorCode::InvalidInput);
    }
    if has(&["404", "not found"]) {
        return (ErrorCategory::ExternalExecution, ErrorCode::NotFound);
    }
    if has(&["403", "forbidden"]) {
        return (ErrorCategory::ExternalExecution, ErrorCode::AccessDenied);
    }
    if has(&["command not found", "exit status", "non-zero"]) {
        return (ErrorCategory::ExternalExecution, ErrorCode::CommandFailed);
    }
    if has(&["no such file", "file not found", "enoent"]) {
        return (ErrorCategory::FileSystem, ErrorCode::FileNotFound);
    }
    if has(&["permission denied", "eacces"]) {
        return (ErrorCategory::FileSystem, ErrorCode::PermissionDenied);
    }
    if has(&["network", "connection", "econn", "dns", "timed out", "timeout"]) {
        return (ErrorCategory::Network, ErrorCode::NetworkError);
    }
    (ErrorCategory::Unknown, ErrorCode::CommandFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn junk_falls_through_to_unknown() {
        assert_eq!(classify("???"), (ErrorCategory::Unknown, ErrorCode::CommandFailed));
        assert_eq!(classify(""), (ErrorCategory::Unknown, ErrorCode::CommandFailed));
    }

    #[test]
    fn classification_is_deterministic() {
        let raw = "403 Forbidden";
        for _ in 0..3 {
            assert_eq!(classify(raw), (ErrorCategory::ExternalExecution, ErrorCode::AccessDenied));
        }
    }

    #[test]
    fn authentication_outranks_later_categories() {
        // "connection" would match the network rule, but auth is scanned first.
        assert_eq!(
            classify("401 Unauthorized: connection closed"),
            (ErrorCategory::Authentication, ErrorCode::InvalidCredentials)
        );
    }

    #[test]
    fn missing_markers_select_missing_credentials() {
        assert_eq!(
            classify("credentials missing from environment"),
            (ErrorCategory::Authentication, ErrorCode::MissingCredentials)
        );
        assert_eq!(
            classify("bad credentials"),
            (ErrorCategory::Authentication, ErrorCode::InvalidCredentials)
        );
    }

    #[test]
    fn execution_markers_outrank_network_words() {
        assert_eq!(
            classify("404 not found while fetching over the network"),
            (ErrorCategory::ExternalExecution, ErrorCode::NotFound)
        );
        assert_eq!(
            classify("process exited with exit status: 1"),
            (ErrorCategory::ExternalExecution, ErrorCode::CommandFailed)
        );
    }

    #[test]
    fn filesystem_and_network_rules() {
        assert_eq!(
            classify("ENOENT: no such file or directory"),
            (ErrorCategory::FileSystem, ErrorCode::FileNotFound)
        );
        assert_eq!(
            classify("EACCES: permission denied"),
            (ErrorCategory::FileSystem, ErrorCode::PermissionDenied)
        );
        assert_eq!(
            classify("request timed out"),
            (ErrorCategory::Network, ErrorCode::NetworkError)
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(
            classify("404 NOT FOUND"),
            (ErrorCategory::ExternalExecution, ErrorCode::NotFound)
        );
    }

    #[test]
    fn payload_omits_raw_detail() {
        let failure = Failure::classified("secret stderr: 404 not found");
        let payload = failure.to_payload();
        assert_eq!(payload["success"], serde_json::json!(false));
        assert_eq!(payload["error"]["category"], serde_json::json!("ExternalExecution"));
        assert_eq!(payload["error"]["code"], serde_json::json!("NotFound"));
        assert!(!payload.to_string().contains("secret stderr"));
    }

    #[test]
    fn with_message_keeps_classification() {
        let failure = Failure::classified("404").with_message("Dataset 'a/b' not found or access denied.");
        assert_eq!(failure.code, ErrorCode::NotFound);
        assert_eq!(failure.message, "Dataset 'a/b' not found or access denied.");
        assert!(failure.raw_detail.is_some());
    }
}
