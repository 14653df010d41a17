//! Input validation, applied strictly before any external execution.
//!
//! Every rejection is a `Failure(Validation, InvalidInput)` with a
//! field-specific message; nothing here touches credentials or the classifier.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use kaggle_core::Failure;

static DATASET_REF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.-]+/[\w.-]+$").expect("dataset ref regex should compile"));

static COMPETITION_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w-]{1,50}$").expect("competition id regex should compile"));

/// Extract a required string field from tool input.
pub fn required_str<'a>(input: &'a Value, field: &str) -> Result<&'a str, Failure> {
    input
        .get(field)
        .and_then(|v| v.as_str())
        .ok_or_else(|| Failure::validation(format!("Missing required field '{}'.", field)))
}

/// Extract an optional string field from tool input.
pub fn optional_str<'a>(input: &'a Value, field: &str) -> Option<&'a str> {
    input.get(field).and_then(|v| v.as_str())
}

pub fn dataset_query(query: &str) -> Result<(), Failure> {
    let len = query.chars().count();
    if len == 0 || len > 100 {
        return Err(Failure::validation("Query must be between 1 and 100 characters."));
    }
    Ok(())
}

/// Competition queries may be empty: an empty query lists everything.
pub fn competition_query(query: &str) -> Result<(), Failure> {
    if query.chars().count() > 100 {
        return Err(Failure::validation("Query must be at most 100 characters."));
    }
    Ok(())
}

pub fn dataset_ref(reference: &str) -> Result<(), Failure> {
    if !DATASET_REF_RE.is_match(reference) {
        return Err(Failure::validation(
            "Dataset reference must match the 'owner/dataset-name' format.",
        ));
    }
    Ok(())
}

pub fn competition_id(id: &str) -> Result<(), Failure> {
    if !COMPETITION_ID_RE.is_match(id) {
        return Err(Failure::validation(
            "Competition ID must be 1-50 characters of letters, digits, underscores, or hyphens.",
        ));
    }
    Ok(())
}

pub fn status(value: &str) -> Result<(), Failure> {
    if !matches!(value, "all" | "active" | "completed") {
        return Err(Failure::validation(
            "Status must be one of 'all', 'active', or 'completed'.",
        ));
    }
    Ok(())
}

pub fn download_path(path: &str) -> Result<(), Failure> {
    if path.is_empty() {
        return Err(Failure::validation("Download path must not be empty."));
    }
    Ok(())
}

/// Submission filenames stay inside the staging directory: no separators,
/// no parent traversal.
pub fn submission_filename(name: &str) -> Result<(), Failure> {
    let len = name.chars().count();
    if len == 0 || len > 255 {
        return Err(Failure::validation("Filename must be between 1 and 255 characters."));
    }
    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(Failure::validation(
            "Filename must not contain path separators or '..'.",
        ));
    }
    Ok(())
}

pub fn file_content(content: &str) -> Result<(), Failure> {
    if content.is_empty() {
        return Err(Failure::validation("File content must not be empty."));
    }
    Ok(())
}
