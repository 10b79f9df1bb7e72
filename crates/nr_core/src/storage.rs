use async_trait::async_trait;
use std::path::PathBuf;
use crate::types::Report;
use crate::Result;

/// Paths of the artifact pair written for one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedReport {
    pub json_path: PathBuf,
    pub markdown_path: PathBuf,
}

#[async_trait]
pub trait ReportStorage: Send + Sync {
    /// Persist a report as a machine-readable and a human-readable artifact
    async fn save(&self, report: &Report) -> Result<SavedReport>;

    /// Return the most recently persisted report, or None if the store
    /// is empty or does not exist yet
    async fn load_latest(&self) -> Result<Option<Report>>;
}
