use anyhow::Result;
use chatbox_types::SearchRecord;
use std::path::{Path, PathBuf};

use crate::cache::ResultCache;
use crate::config::SearchSettings;
use crate::mock::mock_records;
use crate::traits::SearchEngine;

/// 结果来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Engine(String),
    Mock,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub records: Vec<SearchRecord>,
    pub origin: Origin,
}

impl SearchOutcome {
    pub fn is_mock(&self) -> bool {
        self.origin == Origin::Mock
    }
}

/// 多引擎回退搜索
///
/// 按顺序尝试各引擎，第一个返回非空结果的引擎胜出；全部失败时返回占位记录，
/// 因此结果永远非空。
pub struct SearchAugmenter {
    engines: Vec<Box<dyn SearchEngine>>,
    cache_path: PathBuf,
}

impl SearchAugmenter {
    pub fn new(engines: Vec<Box<dyn SearchEngine>>, cache_path: impl Into<PathBuf>) -> Self {
        Self {
            engines,
            cache_path: cache_path.into(),
        }
    }

    pub fn from_settings(settings: &SearchSettings, cache_path: impl Into<PathBuf>) -> Result<Self> {
        let engines = crate::create_engines(settings)?;
        Ok(Self::new(engines, cache_path))
    }

    pub fn cache_path(&self) -> &Path {
        &self.cache_path
    }

    pub fn engine_names(&self) -> Vec<&str> {
        self.engines.iter().map(|e| e.name()).collect()
    }

    /// 执行回退链，最多返回 `max_results` 条（至少 1 条）
    pub async fn lookup(&self, text: &str, max_results: usize) -> SearchOutcome {
        let cap = max_results.max(1);
        tracing::info!("Searching for '{}'", text);

        for engine in &self.engines {
            match engine.fetch_snippets(text).await {
                Ok(hits) if !hits.is_empty() => {
                    tracing::debug!("{} returned {} hits", engine.name(), hits.len());
                    let records = hits
                        .into_iter()
                        .take(cap)
                        .map(|hit| SearchRecord::from_hit(hit, text))
                        .collect();
                    return SearchOutcome {
                        records,
                        origin: Origin::Engine(engine.name().to_string()),
                    };
                }
                Ok(_) => tracing::debug!("{} returned no results", engine.name()),
                Err(e) => tracing::warn!("{} search failed: {}", engine.name(), e),
            }
        }

        tracing::warn!("No engine produced results for '{}', using mock data", text);
        let mut records = mock_records(text);
        records.truncate(cap);
        SearchOutcome {
            records,
            origin: Origin::Mock,
        }
    }

    pub async fn query(&self, text: &str, max_results: usize) -> Vec<SearchRecord> {
        self.lookup(text, max_results).await.records
    }

    /// 加载缓存、搜索、追加保存，缓存只在本次调用期间存活
    ///
    /// 保存失败只记录日志，搜索结果照常返回。
    pub async fn search_and_save(&self, text: &str, max_results: usize) -> SearchOutcome {
        let mut outcome = self.lookup(text, max_results).await;

        let mut cache = ResultCache::open(&self.cache_path);
        match cache.persist(text, &outcome.records) {
            Ok(stamped) => outcome.records = stamped,
            Err(e) => tracing::warn!("Failed to save search results: {:#}", e),
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use async_trait::async_trait;
    use chatbox_types::SearchHit;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    enum Behaviour {
        Fail,
        Empty,
        Hits(usize),
    }

    struct FakeEngine {
        name: &'static str,
        behaviour: Behaviour,
        calls: Arc<AtomicUsize>,
    }

    impl FakeEngine {
        fn boxed(name: &'static str, behaviour: Behaviour) -> (Box<dyn SearchEngine>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let engine = Self {
                name,
                behaviour,
                calls: calls.clone(),
            };
            (Box::new(engine), calls)
        }
    }

    #[async_trait]
    impl SearchEngine for FakeEngine {
        fn name(&self) -> &str {
            self.name
        }

        async fn fetch_snippets(&self, query: &str) -> Result<Vec<SearchHit>, EngineError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behaviour {
                Behaviour::Fail => Err(EngineError::Status(503)),
                Behaviour::Empty => Ok(Vec::new()),
                Behaviour::Hits(n) => Ok((0..n)
                    .map(|i| SearchHit {
                        title: format!("{} {} #{}", self.name, query, i),
                        url: format!("https://{}.example/{}", self.name, i),
                        description: String::new(),
                    })
                    .collect()),
            }
        }
    }

    #[tokio::test]
    async fn test_falls_through_to_first_engine_with_results() {
        let (failing, failing_calls) = FakeEngine::boxed("primary", Behaviour::Fail);
        let (empty, empty_calls) = FakeEngine::boxed("secondary", Behaviour::Empty);
        let (good, _) = FakeEngine::boxed("generic", Behaviour::Hits(7));
        let (unused, unused_calls) = FakeEngine::boxed("never", Behaviour::Hits(1));

        let augmenter = SearchAugmenter::new(vec![failing, empty, good, unused], "unused.json");
        let outcome = augmenter.lookup("rust", 3).await;

        assert_eq!(outcome.origin, Origin::Engine("generic".to_string()));
        assert_eq!(outcome.records.len(), 3);
        assert!(outcome.records.iter().all(|r| r.query == "rust"));
        assert_eq!(failing_calls.load(Ordering::SeqCst), 1);
        assert_eq!(empty_calls.load(Ordering::SeqCst), 1);
        assert_eq!(unused_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_total_failure_returns_mock_records() {
        let (a, _) = FakeEngine::boxed("a", Behaviour::Fail);
        let (b, _) = FakeEngine::boxed("b", Behaviour::Empty);

        let augmenter = SearchAugmenter::new(vec![a, b], "unused.json");
        let outcome = augmenter.lookup("rust", 3).await;

        assert!(outcome.is_mock());
        assert!(!outcome.records.is_empty());
    }

    #[tokio::test]
    async fn test_query_never_empty_even_without_engines() {
        let augmenter = SearchAugmenter::new(Vec::new(), "unused.json");
        assert!(!augmenter.query("anything", 0).await.is_empty());
    }

    #[tokio::test]
    async fn test_search_and_save_writes_cache() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("search_results.json");
        let (good, _) = FakeEngine::boxed("bing", Behaviour::Hits(2));

        let augmenter = SearchAugmenter::new(vec![good], &path);
        let outcome = augmenter.search_and_save("what is rust", 3).await;
        assert!(outcome.records.iter().all(|r| !r.search_time.is_empty()));

        let cache = ResultCache::open(&path);
        assert_eq!(cache.get("what is rust"), outcome.records.as_slice());
    }

    #[tokio::test]
    async fn test_search_and_save_survives_unwritable_cache() {
        let dir = TempDir::new().unwrap();
        let (good, _) = FakeEngine::boxed("bing", Behaviour::Hits(1));

        // 缓存路径是一个目录，写入必然失败
        let augmenter = SearchAugmenter::new(vec![good], dir.path());
        let outcome = augmenter.search_and_save("rust", 3).await;

        assert_eq!(outcome.records.len(), 1);
        assert!(outcome.records[0].search_time.is_empty());
    }
}
