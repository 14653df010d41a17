//! Advisory startup credential check against the Kaggle REST API.

use serde::Serialize;
use tracing::warn;

use kaggle_core::KaggleCredentials;

use crate::executor::OperationClass;

/// Outcome of the credential probe. Advisory only: logged at startup and
/// surfaced by /health, never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Unknown,
    Valid,
    Invalid,
}

impl ProbeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProbeStatus::Unknown => "unknown",
            ProbeStatus::Valid => "valid",
            ProbeStatus::Invalid => "invalid",
        }
    }
}

/// One GET against the competitions listing with HTTP Basic auth.
///
/// 2xx proves the credentials work and 401/403 proves they do not. Anything
/// else (transport errors, unexpected statuses) stays `Unknown`, as do
/// unconfigured credentials.
pub async fn validate_credentials(credentials: &KaggleCredentials, api_base: &str) -> ProbeStatus {
    let (username, key) = match credentials.basic_auth() {
        Some(pair) => pair,
        None => return ProbeStatus::Unknown,
    };

    let client = match reqwest::Client::builder()
        .timeout(OperationClass::Search.timeout())
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "credential probe client build failed");
            return ProbeStatus::Unknown;
        }
    };

    let url = format!("{}/competitions/list?page=1", api_base);
    match client.get(&url).basic_auth(username, Some(key)).send().await {
        Ok(resp) if resp.status().is_success() => ProbeStatus::Valid,
        Ok(resp)
            if resp.status() == reqwest::StatusCode::UNAUTHORIZED
                || resp.status() == reqwest::StatusCode::FORBIDDEN =>
        {
            warn!(status = %resp.status(), "kaggle rejected the configured credentials");
            ProbeStatus::Invalid
        }
        Ok(resp) => {
            warn!(status = %resp.status(), "credential probe inconclusive");
            ProbeStatus::Unknown
        }
        Err(e) => {
            warn!(error = %e, "credential probe could not reach kaggle");
            ProbeStatus::Unknown
        }
    }
}
