use nr_core::Article;

/// Bound on the concatenated corpus passed as model input.
pub const DEFAULT_MAX_CORPUS_CHARS: usize = 8000;

/// Separator between article blocks, so the model can segment items.
pub const BLOCK_SEPARATOR: &str = "\n\n---\n\n";

/// Concatenate articles into a single bounded text blob. If the joined
/// result exceeds `max_chars` it is hard-cut to exactly that many
/// characters; no attempt is made to cut at a block boundary.
pub fn build_corpus(articles: &[Article], max_chars: usize) -> String {
    let blocks: Vec<String> = articles
        .iter()
        .map(|article| {
            let published = article
                .published_at
                .map(|at| at.to_rfc3339())
                .unwrap_or_else(|| "None".to_string());
            format!(
                "Title: {}\nURL: {}\nPublished: {}\n\n{}",
                article.title, article.url, published, article.text
            )
        })
        .collect();

    truncate_chars(blocks.join(BLOCK_SEPARATOR), max_chars)
}

/// Truncate to `max_chars` characters, never splitting a code point.
pub(crate) fn truncate_chars(s: String, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s,
    }
}
