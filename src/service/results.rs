use anyhow::{Context, Result};
use chatbox_search::ResultCache;

use crate::config::AppConfig;
use crate::ui::Output;

/// 显示缓存中的搜索结果；指定 query 时只显示该查询词（精确匹配）
pub fn results(
    query: Option<String>,
    json: bool,
    force_local: bool,
    force_global: bool,
) -> Result<()> {
    let output = Output::new();
    let config = AppConfig::load_with_scope(force_local, force_global)?;
    let cache = ResultCache::open(config.get_search_cache());

    if json {
        let content = match &query {
            Some(q) => serde_json::to_string_pretty(cache.get(q)),
            None => serde_json::to_string_pretty(cache.entries()),
        }
        .context("Failed to serialize search results")?;
        println!("{}", content);
        return Ok(());
    }

    output.cache_info(cache.path(), cache.query_count(), cache.record_count());

    match query {
        Some(q) => {
            let records = cache.get(&q);
            if records.is_empty() {
                output.info(&format!("No cached results for '{}'", q));
            } else {
                output.search_records(records);
            }
        }
        None => {
            if cache.query_count() == 0 {
                output.info("No cached results. Use 'chatbox search' to add some!");
                return Ok(());
            }

            for (i, (q, records)) in cache.entries().iter().enumerate() {
                if i > 0 {
                    println!();
                }
                output.status("Query", q);
                output.search_records(records);
            }
        }
    }

    Ok(())
}
