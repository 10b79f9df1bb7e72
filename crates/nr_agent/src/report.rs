use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use nr_core::{Article, ChatMessage, ChatModel, Error, Report, ReportStorage, Result};

use crate::corpus::{build_corpus, truncate_chars, DEFAULT_MAX_CORPUS_CHARS};

/// Cap on the raw-text summary used when the model output is not JSON.
pub const DEFAULT_FALLBACK_SUMMARY_CHARS: usize = 600;

const GROUNDING_PROMPT: &str = "You are an AI assistant that writes concise news reports.\n\
You will receive a corpus of recent news items about a specific topic.\n\
Your job is to produce a short report with:\n\
1) A 100-150 word summary paragraph.\n\
2) 3-5 concise key takeaways.\n\
3) A list of mentioned organizations, entities, or important terms.\n\
Only use the information in the corpus. Do not invent facts.\n\
Output JSON with keys: 'summary', 'key_takeaways', 'organizations_and_terms'.\n\
Output only that JSON object, nothing else.";

/// Decoded model output: either the structured report fields, or the
/// raw text kept as a degraded best-effort summary.
#[derive(Debug, Clone, PartialEq)]
pub enum Extraction {
    Structured {
        summary: String,
        key_takeaways: Vec<String>,
        organizations_and_terms: Vec<String>,
    },
    Fallback {
        text: String,
    },
}

/// Parse the raw model response. JSON responses yield the structured
/// variant (absent or wrongly-typed keys degrade to empty values);
/// anything else becomes a truncated raw-text fallback. Never errors.
pub fn extract_report_fields(raw: &str, fallback_chars: usize) -> Extraction {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => {
            let string_list = |key: &str| -> Vec<String> {
                value
                    .get(key)
                    .and_then(|v| v.as_array())
                    .map(|items| {
                        items
                            .iter()
                            .filter_map(|v| v.as_str().map(str::to_string))
                            .collect()
                    })
                    .unwrap_or_default()
            };

            Extraction::Structured {
                summary: value
                    .get("summary")
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
                key_takeaways: string_list("key_takeaways"),
                organizations_and_terms: string_list("organizations_and_terms"),
            }
        }
        Err(_) => Extraction::Fallback {
            text: truncate_chars(raw.trim().to_string(), fallback_chars),
        },
    }
}

/// Builds the grounding prompt, invokes the model once, extracts the
/// structured result and persists the report.
pub struct ReportGenerator {
    model: Arc<dyn ChatModel>,
    storage: Arc<dyn ReportStorage>,
    max_corpus_chars: usize,
    fallback_summary_chars: usize,
}

impl ReportGenerator {
    pub fn new(model: Arc<dyn ChatModel>, storage: Arc<dyn ReportStorage>) -> Self {
        Self {
            model,
            storage,
            max_corpus_chars: DEFAULT_MAX_CORPUS_CHARS,
            fallback_summary_chars: DEFAULT_FALLBACK_SUMMARY_CHARS,
        }
    }

    pub fn with_limits(mut self, max_corpus_chars: usize, fallback_summary_chars: usize) -> Self {
        self.max_corpus_chars = max_corpus_chars;
        self.fallback_summary_chars = fallback_summary_chars;
        self
    }

    /// Synthesize and persist one report. A report is never produced
    /// from zero evidence.
    pub async fn generate_report(&self, topic: &str, articles: &[Article]) -> Result<Report> {
        if articles.is_empty() {
            return Err(Error::EmptyInput(
                "No articles available to generate a report".to_string(),
            ));
        }

        let corpus = build_corpus(articles, self.max_corpus_chars);
        let messages = vec![
            ChatMessage::system(GROUNDING_PROMPT),
            ChatMessage::user(format!(
                "Topic: {}\n\nNews corpus (separated by ---):\n\n{}\n\nRemember: output only valid JSON.",
                topic, corpus
            )),
        ];

        info!("🤖 Requesting report from {} for topic '{}'", self.model.name(), topic);
        let raw = self.model.invoke(&messages).await?;

        let (summary, key_takeaways, organizations_and_terms) =
            match extract_report_fields(&raw, self.fallback_summary_chars) {
                Extraction::Structured {
                    summary,
                    key_takeaways,
                    organizations_and_terms,
                } => (summary, key_takeaways, organizations_and_terms),
                Extraction::Fallback { text } => {
                    warn!("Model output was not valid JSON; keeping raw text as summary");
                    (text, Vec::new(), Vec::new())
                }
            };

        let report = Report {
            generated_at: Utc::now(),
            topic: topic.to_string(),
            article_count: articles.len(),
            summary,
            key_takeaways,
            organizations_and_terms,
            articles: articles.to_vec(),
        };

        self.storage.save(&report).await?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use nr_storage::MemoryReportStore;

    struct ScriptedModel {
        response: String,
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn invoke(&self, _messages: &[ChatMessage]) -> Result<String> {
            Ok(self.response.clone())
        }
    }

    fn article(title: &str) -> Article {
        Article {
            source: "test_feed".to_string(),
            url: format!("http://example.com/{}", title),
            title: title.to_string(),
            published_at: Some(Utc::now()),
            text: format!("{}\n\nbody", title),
        }
    }

    fn generator(response: &str, storage: Arc<MemoryReportStore>) -> ReportGenerator {
        ReportGenerator::new(
            Arc::new(ScriptedModel {
                response: response.to_string(),
            }),
            storage,
        )
    }

    #[tokio::test]
    async fn test_structured_response_maps_to_fields() {
        let storage = Arc::new(MemoryReportStore::new());
        let generator = generator(
            r#"{"summary": "  All quiet.  ", "key_takeaways": ["one", "two"], "organizations_and_terms": ["Acme"]}"#,
            storage.clone(),
        );

        let report = generator
            .generate_report("AI", &[article("a"), article("b")])
            .await
            .unwrap();

        assert_eq!(report.summary, "All quiet.");
        assert_eq!(report.key_takeaways, vec!["one", "two"]);
        assert_eq!(report.organizations_and_terms, vec!["Acme"]);
        assert_eq!(report.article_count, 2);
        assert_eq!(report.articles.len(), 2);
        assert_eq!(storage.len().await, 1);
    }

    #[tokio::test]
    async fn test_missing_keys_default_to_empty() {
        let storage = Arc::new(MemoryReportStore::new());
        let generator = generator(r#"{"summary": "short"}"#, storage);

        let report = generator.generate_report("AI", &[article("a")]).await.unwrap();
        assert_eq!(report.summary, "short");
        assert!(report.key_takeaways.is_empty());
        assert!(report.organizations_and_terms.is_empty());
    }

    #[tokio::test]
    async fn test_non_json_response_falls_back() {
        let storage = Arc::new(MemoryReportStore::new());
        let generator = generator("I cannot help with that", storage);

        let report = generator.generate_report("AI", &[article("a")]).await.unwrap();
        assert_eq!(report.summary, "I cannot help with that");
        assert!(report.key_takeaways.is_empty());
        assert!(report.organizations_and_terms.is_empty());
    }

    #[tokio::test]
    async fn test_fallback_is_trimmed_and_capped() {
        let storage = Arc::new(MemoryReportStore::new());
        let long = format!("  {}  ", "x".repeat(1000));
        let generator = generator(&long, storage);

        let report = generator.generate_report("AI", &[article("a")]).await.unwrap();
        assert_eq!(report.summary.chars().count(), DEFAULT_FALLBACK_SUMMARY_CHARS);
        assert!(report.summary.chars().all(|c| c == 'x'));
    }

    #[tokio::test]
    async fn test_empty_articles_error_and_no_write() {
        let storage = Arc::new(MemoryReportStore::new());
        let generator = generator("{}", storage.clone());

        let result = generator.generate_report("AI", &[]).await;
        assert!(matches!(result, Err(Error::EmptyInput(_))));
        assert!(storage.is_empty().await);
    }

    #[test]
    fn test_extraction_ignores_non_string_list_items() {
        let extraction = extract_report_fields(
            r#"{"summary": "s", "key_takeaways": ["ok", 42, null], "organizations_and_terms": []}"#,
            600,
        );
        assert_eq!(
            extraction,
            Extraction::Structured {
                summary: "s".to_string(),
                key_takeaways: vec!["ok".to_string()],
                organizations_and_terms: vec![],
            }
        );
    }

    #[test]
    fn test_extraction_non_string_summary_degrades_to_empty() {
        let extraction = extract_report_fields(r#"{"summary": 7}"#, 600);
        assert_eq!(
            extraction,
            Extraction::Structured {
                summary: String::new(),
                key_takeaways: vec![],
                organizations_and_terms: vec![],
            }
        );
    }
}
