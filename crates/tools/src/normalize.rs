//! Pure result normalizers: raw CLI text in, JSON-shaped records out.
//!
//! Nothing here fails. Unparseable CSV collapses to an empty row set,
//! missing fields get `"N/A"`/`0` defaults, and file enumeration swallows
//! filesystem errors into an empty list.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value;
use walkdir::WalkDir;

/// Hard cap on rows returned to the caller.
pub const MAX_RESULTS: usize = 10;

/// Deadline format emitted by the Kaggle CLI.
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Extensions surfaced by the post-download scan.
const DATA_EXTENSIONS: &[&str] = &["csv", "json", "txt", "tsv", "zip", "xlsx", "parquet"];

/// Parse `--csv` output into header-keyed rows. Parse failures and ragged
/// rows degrade to fewer (or zero) rows, never an error.
pub fn parse_csv_rows(raw: &str) -> Vec<HashMap<String, String>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(raw.as_bytes());

    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(_) => return Vec::new(),
    };

    reader
        .records()
        .filter_map(|record| record.ok())
        .map(|record| {
            headers
                .iter()
                .zip(record.iter())
                .map(|(header, value)| (header.to_string(), value.to_string()))
                .collect()
        })
        .collect()
}

fn text_or_na(value: Option<&String>) -> String {
    value
        .filter(|s| !s.is_empty())
        .cloned()
        .unwrap_or_else(|| "N/A".to_string())
}

fn count_or_zero(value: Option<&String>) -> u64 {
    value.and_then(|s| s.parse().ok()).unwrap_or(0)
}

fn flag_or_false(value: Option<&String>) -> bool {
    value.map(|s| s.eq_ignore_ascii_case("true")).unwrap_or(false)
}

fn rating_or_na(value: Option<&String>) -> Value {
    value
        .and_then(|s| s.parse::<f64>().ok())
        .map(Value::from)
        .unwrap_or_else(|| Value::String("N/A".to_string()))
}

/// First 200 chars of a present description, with `"..."` appended even when
/// nothing was cut.
pub fn description_snippet(description: &str) -> String {
    let head: String = description.chars().take(200).collect();
    format!("{}...", head)
}

/// Final `/`-segment of a competition ref. Refs arrive both as bare slugs
/// and as full URLs depending on the CLI version.
pub fn competition_slug(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

/// Canonical competition page URL, always derived, never taken from upstream.
pub fn competition_url(reference: &str) -> String {
    format!("https://www.kaggle.com/competitions/{}", competition_slug(reference))
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetRecord {
    #[serde(rename = "ref")]
    pub reference: String,
    pub title: String,
    pub subtitle: String,
    pub download_count: u64,
    pub last_updated: String,
    /// Number when upstream supplied one, `"N/A"` otherwise.
    pub usability_rating: Value,
}

impl DatasetRecord {
    pub fn from_row(row: &HashMap<String, String>) -> Self {
        Self {
            reference: text_or_na(row.get("ref")),
            title: text_or_na(row.get("title")),
            // The CLI's CSV has no subtitle column, so this is routinely "N/A".
            subtitle: text_or_na(row.get("subtitle")),
            download_count: count_or_zero(row.get("downloadCount")),
            last_updated: text_or_na(row.get("lastUpdated")),
            usability_rating: rating_or_na(row.get("usabilityRating")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionRecord {
    #[serde(rename = "ref")]
    pub reference: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub deadline: String,
    pub category: String,
    pub reward: String,
    pub team_count: u64,
    pub user_has_entered: bool,
}

impl CompetitionRecord {
    pub fn from_row(row: &HashMap<String, String>) -> Self {
        let reference = text_or_na(row.get("ref"));
        let description = match row.get("description").filter(|s| !s.is_empty()) {
            Some(d) => description_snippet(d),
            None => "N/A".to_string(),
        };
        Self {
            url: competition_url(&reference),
            reference,
            title: text_or_na(row.get("title")),
            description,
            deadline: text_or_na(row.get("deadline")),
            category: text_or_na(row.get("category")),
            reward: text_or_na(row.get("reward")),
            team_count: count_or_zero(row.get("teamCount")),
            user_has_entered: flag_or_false(row.get("userHasEntered")),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadOutcome {
    pub success: bool,
    pub download_path: String,
    pub downloaded_files: Vec<String>,
    pub file_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DownloadOutcome {
    pub fn completed(path: impl Into<String>, files: Vec<String>) -> Self {
        let file_count = files.len() as u64;
        Self {
            success: true,
            download_path: path.into(),
            downloaded_files: files,
            file_count,
            error: None,
        }
    }
}

/// Best-effort listing of data files under `dir` (depth ≤ 2, sorted names).
/// Enumeration problems collapse to an empty list.
pub fn list_downloaded_files(dir: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(dir)
        .max_depth(2)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            let ext = Path::new(&name).extension()?.to_str()?.to_lowercase();
            DATA_EXTENSIONS.contains(&ext.as_str()).then_some(name)
        })
        .collect();
    files.sort();
    files
}

pub fn deadline_of(row: &HashMap<String, String>) -> Option<NaiveDateTime> {
    row.get("deadline")
        .and_then(|s| NaiveDateTime::parse_from_str(s, DEADLINE_FORMAT).ok())
}

/// Keep rows matching the requested lifecycle status. `active` and
/// `completed` require a parseable deadline in the future/past; rows with
/// unparseable deadlines only survive under `all`.
pub fn filter_by_status(
    rows: Vec<HashMap<String, String>>,
    status: &str,
    now: NaiveDateTime,
) -> Vec<HashMap<String, String>> {
    match status {
        "active" => rows
            .into_iter()
            .filter(|row| deadline_of(row).map_or(false, |d| d > now))
            .collect(),
        "completed" => rows
            .into_iter()
            .filter(|row| deadline_of(row).map_or(false, |d| d <= now))
            .collect(),
        _ => rows,
    }
}

pub fn search_message(noun: &str, count: usize) -> String {
    if count == 0 {
        format!("No {} found matching the query.", noun)
    } else {
        format!("Found {} {} matching the query.", count, noun)
    }
}
