//! DuckDuckGo HTML 端点（无需 API key）

use async_trait::async_trait;
use chatbox_types::SearchHit;
use scraper::Html;
use std::sync::Arc;

use super::{element_text, selector};
use crate::error::EngineError;
use crate::fetcher::{encode_query, HttpFetcher};
use crate::traits::SearchEngine;

const SEARCH_URL: &str = "https://html.duckduckgo.com/html/?q=";

pub struct DuckDuckGoEngine {
    fetcher: Arc<HttpFetcher>,
}

impl DuckDuckGoEngine {
    pub fn new(fetcher: Arc<HttpFetcher>) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl SearchEngine for DuckDuckGoEngine {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn fetch_snippets(&self, query: &str) -> Result<Vec<SearchHit>, EngineError> {
        let url = format!("{}{}", SEARCH_URL, encode_query(query));
        let html = self.fetcher.get_html(&url).await?;
        parse_results(&html)
    }
}

pub fn parse_results(html: &str) -> Result<Vec<SearchHit>, EngineError> {
    let document = Html::parse_document(html);
    let result_selector = selector("div.result")?;
    let link_selector = selector("a.result__a")?;
    let snippet_selector = selector(".result__snippet")?;

    let mut hits = Vec::new();
    for block in document.select(&result_selector) {
        let Some(link) = block.select(&link_selector).next() else {
            continue;
        };

        let title = element_text(&link);
        if title.is_empty() {
            continue;
        }

        hits.push(SearchHit {
            title,
            url: link.value().attr("href").unwrap_or_default().to_string(),
            description: block
                .select(&snippet_selector)
                .next()
                .map(|s| element_text(&s))
                .unwrap_or_default(),
        });
    }

    Ok(hits)
}
