use scraper::Html;

/// Collapse an HTML fragment to whitespace-joined plain text.
pub fn clean_html(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text: Vec<_> = fragment.root_element().text().collect();
    text.join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
