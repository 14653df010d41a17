//! The Kaggle tool catalogue.
//!
//! Every tool runs the same pipeline: parse and validate input, hand one
//! operation to the shared backend, then normalize the output or return the
//! classified failure.

pub mod search_datasets;
pub mod download_dataset;
pub mod search_competitions;
pub mod competition_details;
pub mod download_competition;
pub mod submit;

pub use search_datasets::SearchDatasetsTool;
pub use download_dataset::DownloadDatasetTool;
pub use search_competitions::SearchCompetitionsTool;
pub use competition_details::CompetitionDetailsTool;
pub use download_competition::DownloadCompetitionTool;
pub use submit::SubmitToCompetitionTool;

use std::sync::Arc;

use crate::executor::KaggleBackend;
use crate::registry::{RegistryError, ToolRegistry};

/// Build the full tool registry over one shared backend.
pub fn default_registry(backend: Arc<dyn KaggleBackend>) -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();
    registry.register(SearchDatasetsTool::new(backend.clone()))?;
    registry.register(DownloadDatasetTool::new(backend.clone()))?;
    registry.register(SearchCompetitionsTool::new(backend.clone()))?;
    registry.register(CompetitionDetailsTool::new(backend.clone()))?;
    registry.register(DownloadCompetitionTool::new(backend.clone()))?;
    registry.register(SubmitToCompetitionTool::new(backend))?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::StaticBackend;

    #[test]
    fn default_registry_exposes_all_six_tools() {
        let backend = Arc::new(StaticBackend::ok(""));
        let registry = default_registry(backend).unwrap();

        let names: Vec<String> = registry.list().into_iter().map(|d| d.name).collect();
        assert_eq!(
            names,
            vec![
                "download_competition_data",
                "download_kaggle_dataset",
                "get_competition_details",
                "search_kaggle_competitions",
                "search_kaggle_datasets",
                "submit_to_competition",
            ]
        );
    }
}
