use anyhow::Result;
use chatbox_search::ResultCache;

use crate::config::AppConfig;
use crate::ui::Output;

/// 清空搜索结果缓存并写回空文件
pub fn clear_results(force_local: bool, force_global: bool, skip_confirm: bool) -> Result<()> {
    let output = Output::new();
    let config = AppConfig::load_with_scope(force_local, force_global)?;
    let scope_name = AppConfig::get_scope_name(force_local, force_global);

    let mut cache = ResultCache::open(config.get_search_cache());
    output.cache_info(cache.path(), cache.query_count(), cache.record_count());

    if cache.query_count() == 0 {
        output.info("Cache is empty, nothing to clear.");
        return Ok(());
    }

    output.warning("this will delete all cached search results");
    output.info(&format!("{} records will be deleted", cache.record_count()));

    if !skip_confirm && !output.confirm("yes")? {
        output.info("Operation cancelled");
        return Ok(());
    }

    output.begin_operation("Clearing", "search cache");
    cache.clear();
    cache.save()?;

    output.finish("clearing", scope_name);

    Ok(())
}
