mod augmenter;
mod cache;
mod config;
mod engines;
mod error;
mod fetcher;
mod mock;
mod traits;

pub use augmenter::{Origin, SearchAugmenter, SearchOutcome};
pub use cache::ResultCache;
pub use config::SearchSettings;
pub use error::EngineError;
pub use fetcher::HttpFetcher;
pub use mock::mock_records;
pub use traits::SearchEngine;

use std::sync::Arc;

/// 按配置顺序创建搜索引擎（共享同一个 HttpFetcher）
pub fn create_engines(settings: &SearchSettings) -> anyhow::Result<Vec<Box<dyn SearchEngine>>> {
    let fetcher = Arc::new(HttpFetcher::new(settings)?);

    settings
        .engines
        .iter()
        .map(|name| create_engine(name, settings, fetcher.clone()))
        .collect()
}

#[allow(unused_variables)]
fn create_engine(
    name: &str,
    settings: &SearchSettings,
    fetcher: Arc<HttpFetcher>,
) -> anyhow::Result<Box<dyn SearchEngine>> {
    match name {
        #[cfg(feature = "bing")]
        "bing" => Ok(Box::new(engines::bing::BingEngine::new(fetcher))),
        #[cfg(feature = "duckduckgo")]
        "duckduckgo" => Ok(Box::new(engines::duckduckgo::DuckDuckGoEngine::new(
            fetcher,
        ))),
        #[cfg(feature = "generic")]
        "generic" => Ok(Box::new(engines::generic::GenericEngine::new(
            fetcher,
            settings.fallback_urls.clone(),
            settings.generic_limit,
        ))),
        other => anyhow::bail!("Unknown or disabled search engine: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_engines_in_configured_order() {
        let settings = SearchSettings {
            engines: vec!["duckduckgo".to_string(), "bing".to_string()],
            ..SearchSettings::default()
        };
        let engines = create_engines(&settings).unwrap();
        let names: Vec<&str> = engines.iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["duckduckgo", "bing"]);
    }

    #[test]
    fn test_unknown_engine_is_rejected() {
        let settings = SearchSettings {
            engines: vec!["altavista".to_string()],
            ..SearchSettings::default()
        };
        let err = create_engines(&settings).err().unwrap();
        assert!(err.to_string().contains("altavista"));
    }
}
