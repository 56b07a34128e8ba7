use crate::FetchError;

use itertools::Itertools;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use url::Url;

/// Elements whose text never counts as article content.
const STRIPPED_TAGS: [&str; 5] = ["script", "style", "nav", "footer", "header"];

pub struct ArticleExtractor {
    http: Client,
}

impl ArticleExtractor {
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::ConnectionError)?;
        Ok(ArticleExtractor { http })
    }

    /// Downloads `url` and returns its main readable text, one non-blank line per row.
    pub async fn extract_text_from_url(&self, url: &str) -> Result<String, FetchError> {
        let html = self
            .fetch(url)
            .await
            .inspect_err(|e| log::error!("Error: {}", e))?;
        Ok(html_to_text(&html))
    }

    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let url = Url::parse(url).map_err(FetchError::InvalidUrl)?;
        log::debug!("GET {}", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(FetchError::ConnectionError)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        response.text().await.map_err(FetchError::ConnectionError)
    }
}

/// Picks the first `<article>` (or the `<body>`), skips boilerplate elements and flattens the
/// rest into trimmed, non-blank lines.
pub fn html_to_text(html: &str) -> String {
    let doc = Html::parse_document(html);

    let article_sel = Selector::parse("article").expect("valid selector");
    let body_sel = Selector::parse("body").expect("valid selector");

    let content = doc
        .select(&article_sel)
        .find(|article| !inside_stripped(*article))
        .or_else(|| doc.select(&body_sel).next())
        .unwrap_or_else(|| doc.root_element());

    let mut parts = Vec::<String>::new();
    collect_text(content, &mut parts);

    parts
        .join(" ")
        .split(is_line_break)
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .join("\n")
}

fn collect_text(element: ElementRef<'_>, parts: &mut Vec<String>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            parts.push(String::from(&**text));
        } else if let Some(child) = ElementRef::wrap(child) {
            if !is_stripped(child) {
                collect_text(child, parts);
            }
        }
    }
}

fn is_stripped(element: ElementRef<'_>) -> bool {
    STRIPPED_TAGS.contains(&element.value().name())
}

fn inside_stripped(element: ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(is_stripped)
}

/// Line boundaries, including vertical tab, form feed and the Unicode separators.
fn is_line_break(c: char) -> bool {
    matches!(
        c,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}
