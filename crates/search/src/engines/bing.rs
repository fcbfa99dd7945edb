//! Bing 网页搜索

use async_trait::async_trait;
use chatbox_types::SearchHit;
use scraper::Html;
use std::sync::Arc;

use super::{element_text, selector};
use crate::error::EngineError;
use crate::fetcher::{encode_query, HttpFetcher};
use crate::traits::SearchEngine;

const SEARCH_URL: &str = "https://www.bing.com/search?q=";

pub struct BingEngine {
    fetcher: Arc<HttpFetcher>,
}

impl BingEngine {
    pub fn new(fetcher: Arc<HttpFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl SearchEngine for BingEngine {
    fn name(&self) -> &str {
        "bing"
    }

    async fn fetch_snippets(&self, query: &str) -> Result<Vec<SearchHit>, EngineError> {
        let url = format!("{}{}", SEARCH_URL, encode_query(query));
        let html = self.fetcher.get_html(&url).await?;
        parse_results(&html)
    }
}

/// 解析 `li.b_algo` 结果块：标题取 `h2`，链接取第一个 `a`，摘要取第一个 `p`
pub fn parse_results(html: &str) -> Result<Vec<SearchHit>, EngineError> {
    let document = Html::parse_document(html);
    let result_selector = selector("li.b_algo")?;
    let title_selector = selector("h2")?;
    let link_selector = selector("a")?;
    let desc_selector = selector("p")?;

    let mut hits = Vec::new();
    for block in document.select(&result_selector) {
        let Some(title) = block.select(&title_selector).next() else {
            continue;
        };
        let Some(link) = block.select(&link_selector).next() else {
            continue;
        };

        let title = element_text(&title);
        if title.is_empty() {
            continue;
        }

        hits.push(SearchHit {
            title,
            url: link.value().attr("href").unwrap_or_default().to_string(),
            description: block
                .select(&desc_selector)
                .next()
                .map(|p| element_text(&p))
                .unwrap_or_default(),
        });
    }

    Ok(hits)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
<html><body><ol id="b_results">
  <li class="b_algo">
    <h2><a href="https://www.rust-lang.org/">Rust Programming Language</a></h2>
    <div class="b_caption"><p>A language empowering everyone to build reliable software.</p></div>
  </li>
  <li class="b_algo">
    <h2><a href="https://doc.rust-lang.org/book/">The Rust Book</a></h2>
  </li>
  <li class="b_algo"><p>orphan snippet without a title</p></li>
  <li class="b_ad"><h2><a href="https://ads.example">Ad</a></h2></li>
</ol></body></html>
"#;

    #[test]
    fn test_parse_results() {
        let hits = parse_results(PAGE).unwrap();
        assert_eq!(hits.len(), 2);

        assert_eq!(hits[0].title, "Rust Programming Language");
        assert_eq!(hits[0].url, "https://www.rust-lang.org/");
        assert_eq!(
            hits[0].description,
            "A language empowering everyone to build reliable software."
        );

        assert_eq!(hits[1].title, "The Rust Book");
        assert!(hits[1].description.is_empty());
    }

    #[test]
    fn test_unrelated_markup_yields_nothing() {
        let hits = parse_results("<html><body><div>captcha</div></body></html>").unwrap();
        assert!(hits.is_empty());
    }
}
