use std::path::{Path, PathBuf};
use std::time::SystemTime;

use async_trait::async_trait;
use tracing::info;

use nr_core::{Error, Report, ReportStorage, Result, SavedReport};

use crate::markdown::render_markdown;

/// Flat-file report store: one `report_<key>.json` and one
/// `report_<key>.md` per report, keyed by the generation timestamp.
pub struct FsReportStore {
    dir: PathBuf,
}

impl FsReportStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn is_report_artifact(name: &str) -> bool {
        name.starts_with("report_") && name.ends_with(".json")
    }
}

#[async_trait]
impl ReportStorage for FsReportStore {
    async fn save(&self, report: &Report) -> Result<SavedReport> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            Error::Persistence(format!(
                "Failed to create reports directory {}: {}",
                self.dir.display(),
                e
            ))
        })?;

        let key = report.storage_key();
        let json_path = self.dir.join(format!("report_{}.json", key));
        let markdown_path = self.dir.join(format!("report_{}.md", key));

        let json = serde_json::to_string_pretty(report)?;
        tokio::fs::write(&json_path, json).await.map_err(|e| {
            Error::Persistence(format!("Failed to write {}: {}", json_path.display(), e))
        })?;
        tokio::fs::write(&markdown_path, render_markdown(report))
            .await
            .map_err(|e| {
                Error::Persistence(format!(
                    "Failed to write {}: {}",
                    markdown_path.display(),
                    e
                ))
            })?;

        info!("💾 Saved report: {}", json_path.display());
        info!("💾 Saved human-readable report: {}", markdown_path.display());

        Ok(SavedReport {
            json_path,
            markdown_path,
        })
    }

    async fn load_latest(&self) -> Result<Option<Report>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let mut latest: Option<(SystemTime, PathBuf)> = None;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name,
                None => continue,
            };
            if !Self::is_report_artifact(name) {
                continue;
            }

            let modified = entry.metadata().await?.modified()?;
            // Equal mtimes fall back to the lexically greatest key,
            // which sorts chronologically for RFC 3339 timestamps
            let newer = match &latest {
                None => true,
                Some((at, p)) => modified > *at || (modified == *at && path > *p),
            };
            if newer {
                latest = Some((modified, path));
            }
        }

        let Some((_, path)) = latest else {
            return Ok(None);
        };

        let data = tokio::fs::read_to_string(&path).await?;
        let report = serde_json::from_str(&data)?;
        Ok(Some(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use nr_core::Article;
    use tempfile::tempdir;

    fn sample_report(topic: &str) -> Report {
        Report {
            generated_at: Utc::now(),
            topic: topic.to_string(),
            article_count: 1,
            summary: "A summary.".to_string(),
            key_takeaways: vec!["takeaway".to_string()],
            organizations_and_terms: vec!["Acme".to_string()],
            articles: vec![Article {
                source: "test_feed".to_string(),
                url: "http://example.com/a".to_string(),
                title: "A story".to_string(),
                published_at: Some(Utc::now() - Duration::hours(1)),
                text: "A story\n\nbody".to_string(),
            }],
        }
    }

    #[tokio::test]
    async fn test_save_writes_artifact_pair() {
        let dir = tempdir().unwrap();
        let store = FsReportStore::new(dir.path());

        let saved = store.save(&sample_report("AI")).await.unwrap();
        assert!(saved.json_path.exists());
        assert!(saved.markdown_path.exists());

        let md = std::fs::read_to_string(&saved.markdown_path).unwrap();
        assert!(md.starts_with("# Topic: AI"));
    }

    #[tokio::test]
    async fn test_round_trip() {
        let dir = tempdir().unwrap();
        let store = FsReportStore::new(dir.path());
        let report = sample_report("AI");

        store.save(&report).await.unwrap();
        let loaded = store.load_latest().await.unwrap().unwrap();
        assert_eq!(loaded, report);
    }

    #[tokio::test]
    async fn test_load_latest_missing_dir_is_none() {
        let dir = tempdir().unwrap();
        let store = FsReportStore::new(dir.path().join("does-not-exist"));
        assert!(store.load_latest().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_latest_empty_dir_is_none() {
        let dir = tempdir().unwrap();
        let store = FsReportStore::new(dir.path());
        assert!(store.load_latest().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_latest_picks_most_recent() {
        let dir = tempdir().unwrap();
        let store = FsReportStore::new(dir.path());

        let mut first = sample_report("first");
        first.generated_at = Utc::now() - Duration::minutes(1);
        store.save(&first).await.unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        let second = sample_report("second");
        store.save(&second).await.unwrap();

        let loaded = store.load_latest().await.unwrap().unwrap();
        assert_eq!(loaded.topic, "second");
    }

    #[tokio::test]
    async fn test_non_report_files_are_ignored() {
        let dir = tempdir().unwrap();
        let store = FsReportStore::new(dir.path());
        std::fs::write(dir.path().join("notes.txt"), "not a report").unwrap();

        assert!(store.load_latest().await.unwrap().is_none());
    }
}
