use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// One normalized feed entry. `text` is the title and the cleaned
/// summary separated by a blank line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub source: String,
    pub url: String,
    pub title: String,
    pub published_at: Option<DateTime<Utc>>,
    pub text: String,
}

/// A synthesized report over one batch of articles. Immutable after
/// construction; persistence is the terminal step of its lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub topic: String,
    pub article_count: usize,
    pub summary: String,
    pub key_takeaways: Vec<String>,
    pub organizations_and_terms: Vec<String>,
    pub articles: Vec<Article>,
}

impl Report {
    /// Filesystem-safe persistence key derived from `generated_at`.
    /// Colons are not portable in filenames, so they become hyphens.
    pub fn storage_key(&self) -> String {
        self.generated_at
            .to_rfc3339_opts(SecondsFormat::Micros, true)
            .replace(':', "-")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: ChatRole::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: ChatRole::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: ChatRole::Assistant, content: content.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_storage_key_has_no_colons() {
        let report = Report {
            generated_at: Utc.with_ymd_and_hms(2024, 5, 1, 13, 45, 7).unwrap(),
            topic: "AI".to_string(),
            article_count: 0,
            summary: String::new(),
            key_takeaways: vec![],
            organizations_and_terms: vec![],
            articles: vec![],
        };

        let key = report.storage_key();
        assert!(!key.contains(':'));
        assert!(key.starts_with("2024-05-01T13-45-07"));
    }

    #[test]
    fn test_chat_message_constructors() {
        assert_eq!(ChatMessage::system("a").role, ChatRole::System);
        assert_eq!(ChatMessage::user("b").role, ChatRole::User);
        assert_eq!(ChatMessage::assistant("c").role, ChatRole::Assistant);
    }
}
