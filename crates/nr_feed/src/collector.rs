use async_trait::async_trait;
use chrono::{DateTime, Utc};
use nr_core::{Article, Error, Result};
use tracing::{debug, info};

use crate::html::clean_html;

/// One raw entry from the feed collaborator. Every field is optional;
/// upstream feeds routinely omit any of them.
#[derive(Debug, Clone, Default)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub link: Option<String>,
    pub published: Option<DateTime<Utc>>,
}

/// Feed-retrieval collaborator boundary: fetch and parse one feed into
/// structured entries, in feed order.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<FeedEntry>>;
}

/// RSS 2.0 feed fetched over HTTP.
pub struct RssFeedSource {
    url: String,
    client: reqwest::Client,
}

impl RssFeedSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl FeedSource for RssFeedSource {
    async fn fetch(&self) -> Result<Vec<FeedEntry>> {
        let bytes = self.client.get(&self.url).send().await?.bytes().await?;
        let channel = rss::Channel::read_from(&bytes[..])
            .map_err(|e| Error::Feed(format!("Failed to parse feed {}: {}", self.url, e)))?;

        let entries = channel
            .items()
            .iter()
            .map(|item| FeedEntry {
                title: item.title().map(str::to_string),
                summary: item.description().map(str::to_string),
                link: item.link().map(str::to_string),
                // A malformed pubDate is treated as absent, not an error
                published: item.pub_date().and_then(|d| {
                    DateTime::parse_from_rfc2822(d)
                        .ok()
                        .map(|dt| dt.with_timezone(&Utc))
                }),
            })
            .collect();

        Ok(entries)
    }
}

/// Filters feed entries by topic keyword and normalizes them into
/// `Article` records.
pub struct NewsCollector {
    source: Box<dyn FeedSource>,
    source_name: String,
}

impl NewsCollector {
    pub fn new(source: Box<dyn FeedSource>, source_name: impl Into<String>) -> Self {
        Self {
            source,
            source_name: source_name.into(),
        }
    }

    /// Fetch the feed and return, in feed order, up to `max_articles`
    /// entries whose title or cleaned summary contains `topic`
    /// (case-insensitive). Stops scanning once the cap is reached.
    pub async fn fetch_articles(&self, topic: &str, max_articles: usize) -> Result<Vec<Article>> {
        let topic_lower = topic.to_lowercase();
        let entries = self.source.fetch().await?;
        debug!("Feed returned {} entries", entries.len());

        let mut articles = Vec::new();
        for entry in entries {
            let title = entry.title.unwrap_or_default();
            let summary_text = clean_html(entry.summary.as_deref().unwrap_or(""));

            if !title.to_lowercase().contains(&topic_lower)
                && !summary_text.to_lowercase().contains(&topic_lower)
            {
                continue;
            }

            let text = format!("{}\n\n{}", title, summary_text);
            articles.push(Article {
                source: self.source_name.clone(),
                url: entry.link.unwrap_or_default(),
                title,
                published_at: entry.published,
                text,
            });

            if articles.len() >= max_articles {
                break;
            }
        }

        info!(
            "📰 Collected {} article(s) matching '{}' from {}",
            articles.len(),
            topic,
            self.source_name
        );
        Ok(articles)
    }
}
