use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use kaggle_tools::{ProbeStatus, ToolRegistry};

/// Shared state behind the HTTP adapter. The registry is read-only after
/// startup; the probe slot is written once by the background probe task.
pub struct AppState {
    pub registry: Arc<ToolRegistry>,
    pub environment: String,
    pub started_at: DateTime<Utc>,
    pub probe: Arc<RwLock<ProbeStatus>>,
}
