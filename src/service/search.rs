use anyhow::Result;
use chatbox_search::{Origin, ResultCache, SearchAugmenter};

use crate::config::AppConfig;
use crate::ui::Output;

/// 直接执行网页搜索并写入缓存（不经过关键词判断）
pub async fn search(query: &str, limit: usize, force_local: bool, force_global: bool) -> Result<()> {
    let output = Output::new();
    let config = AppConfig::load_with_scope(force_local, force_global)?;

    let query = query.trim();
    if query.is_empty() {
        anyhow::bail!("Search query cannot be empty");
    }

    let augmenter = SearchAugmenter::from_settings(&config.search, config.get_search_cache())?;
    output.status("Searching", &format!("web for '{}'", query));

    let outcome = augmenter.search_and_save(query, limit).await;
    match &outcome.origin {
        Origin::Engine(name) => output.status("Found", &format!("results via {}", name)),
        Origin::Mock => output.warning("all search engines failed, showing placeholder results"),
    }

    eprintln!();
    output.search_records(&outcome.records);
    eprintln!();
    let cache = ResultCache::open(augmenter.cache_path());
    output.cache_info(cache.path(), cache.query_count(), cache.record_count());

    Ok(())
}
