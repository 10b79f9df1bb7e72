use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;

use nr_core::{Report, ReportStorage, Result, SavedReport};

/// In-memory report store for tests and dry runs. Artifact paths are
/// pseudo-paths under a `memory://` prefix.
#[derive(Default)]
pub struct MemoryReportStore {
    reports: RwLock<Vec<Report>>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.reports.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.reports.read().await.is_empty()
    }
}

#[async_trait]
impl ReportStorage for MemoryReportStore {
    async fn save(&self, report: &Report) -> Result<SavedReport> {
        let key = report.storage_key();
        self.reports.write().await.push(report.clone());
        Ok(SavedReport {
            json_path: PathBuf::from(format!("memory://report_{}.json", key)),
            markdown_path: PathBuf::from(format!("memory://report_{}.md", key)),
        })
    }

    async fn load_latest(&self) -> Result<Option<Report>> {
        Ok(self.reports.read().await.last().cloned())
    }
}
