//! 通用链接提取：依次请求一组搜索地址，抽取页面中看起来像结果的外部链接

use async_trait::async_trait;
use chatbox_types::SearchHit;
use scraper::Html;
use std::sync::Arc;

use super::{element_text, selector};
use crate::error::EngineError;
use crate::fetcher::{encode_query, HttpFetcher};
use crate::traits::SearchEngine;

const MIN_TEXT_CHARS: usize = 10;
const MAX_TITLE_CHARS: usize = 100;
const IGNORED_PREFIXES: [&str; 2] = [
    "http://webcache.googleusercontent.com",
    "http://www.google.com",
];

pub struct GenericEngine {
    fetcher: Arc<HttpFetcher>,
    base_urls: Vec<String>,
    limit: usize,
}

impl GenericEngine {
    pub fn new(fetcher: Arc<HttpFetcher>, base_urls: Vec<String>, limit: usize) -> Self {
        Self {
            fetcher,
            base_urls,
            limit,
        }
    }
}

#[async_trait]
impl SearchEngine for GenericEngine {
    fn name(&self) -> &str {
        "generic"
    }

    /// 第一个产出链接的地址即返回；全部失败时返回最后一个错误
    async fn fetch_snippets(&self, query: &str) -> Result<Vec<SearchHit>, EngineError> {
        let encoded = encode_query(query);
        let mut last_error = None;

        for base in &self.base_urls {
            let url = format!("{}{}", base, encoded);
            let html = match self.fetcher.get_html(&url).await {
                Ok(html) => html,
                Err(e) => {
                    tracing::debug!("Generic fetch of {} failed: {}", base, e);
                    last_error = Some(e);
                    continue;
                }
            };

            let hits = extract_links(&html, self.limit)?;
            if !hits.is_empty() {
                return Ok(hits);
            }
        }

        match last_error {
            Some(e) => Err(e),
            None => Ok(Vec::new()),
        }
    }
}

pub fn extract_links(html: &str, limit: usize) -> Result<Vec<SearchHit>, EngineError> {
    let document = Html::parse_document(html);
    let anchor_selector = selector("a[href]")?;

    let hits = document
        .select(&anchor_selector)
        .filter_map(|anchor| {
            let href = anchor.value().attr("href")?;
            if !href.starts_with("http") || IGNORED_PREFIXES.iter().any(|p| href.starts_with(p)) {
                return None;
            }

            let text = element_text(&anchor);
            if text.chars().count() <= MIN_TEXT_CHARS {
                return None;
            }

            Some(SearchHit {
                title: text.chars().take(MAX_TITLE_CHARS).collect(),
                url: href.to_string(),
                description: String::new(),
            })
        })
        .take(limit)
        .collect();

    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_links_filters() {
        let page = r#"
<body>
  <a href="/relative/path">Relative link with long text</a>
  <a href="https://short.example">short</a>
  <a href="http://webcache.googleusercontent.com/search?q=cache">Cached copy of the page</a>
  <a href="http://www.google.com/preferences">Google search preferences</a>
  <a href="https://www.rust-lang.org/learn">Learn Rust with the official guides</a>
  <a href="http://example.org/persian">آموزش زبان برنامه‌نویسی راست</a>
</body>
"#;
        let hits = extract_links(page, 5).unwrap();
        let urls: Vec<&str> = hits.iter().map(|h| h.url.as_str()).collect();
        assert_eq!(
            urls,
            vec!["https://www.rust-lang.org/learn", "http://example.org/persian"]
        );
        assert!(hits.iter().all(|h| h.description.is_empty()));
    }

    #[test]
    fn test_extract_links_truncates_title_and_limit() {
        let long_text = "x".repeat(150);
        let page: String = (0..8)
            .map(|i| format!(r#"<a href="https://site{}.example">{}</a>"#, i, long_text))
            .collect();

        let hits = extract_links(&page, 5).unwrap();
        assert_eq!(hits.len(), 5);
        assert!(hits.iter().all(|h| h.title.chars().count() == 100));
    }
}
