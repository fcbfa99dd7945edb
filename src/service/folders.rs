use anyhow::{Context, Result};

use crate::config::AppConfig;
use crate::ui::Output;

/// 创建并打印归档目录和搜索缓存路径
pub fn folders(force_local: bool, force_global: bool) -> Result<()> {
    let output = Output::new();
    let config = AppConfig::load_with_scope(force_local, force_global)?;

    for (name, dir) in [
        ("chat archive", config.get_archive_folder()),
        ("response archive", config.get_response_folder()),
    ] {
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create folder: {}", dir.display()))?;
        output.resource_action("Using", name, &dir);
        println!("{}", dir.display());
    }

    let cache = config.get_search_cache();
    output.resource_action("Using", "search cache", &cache);
    println!("{}", cache.display());

    Ok(())
}
