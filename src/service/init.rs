use anyhow::{Context, Result};

use crate::config::{AppConfig, RulesConfig};
use crate::ui::Output;

/// 显式初始化（带用户反馈）
/// local: true 表示在本地目录初始化，false 表示在全局目录初始化
pub fn initialize(local: bool) -> Result<()> {
    let output = Output::new();
    let config_dir = AppConfig::get_dir(local);
    let location = AppConfig::get_scope_name(local, !local);

    // 配置文件已存在时不覆盖
    let config_path = AppConfig::path_in(&config_dir);
    if config_path.exists() {
        output.resource_action("Found", "config", &config_path);
    } else {
        let path = AppConfig::default().save_to(&config_dir)?;
        output.resource_action("Creating", "config", &path);
    }

    let rules_path = RulesConfig::path_in(&config_dir);
    if rules_path.exists() {
        output.resource_action("Found", "rules", &rules_path);
    } else {
        let path = RulesConfig::builtin().save_to(&config_dir)?;
        output.resource_action("Creating", "rules", &path);
    }

    // 按刚写入的配置创建归档目录
    let config = AppConfig::load_with_scope(local, !local)?;
    for (name, dir) in [
        ("chat archive", config.get_archive_folder()),
        ("response archive", config.get_response_folder()),
    ] {
        if dir.exists() {
            output.resource_action("Found", name, &dir);
        } else {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create folder: {}", dir.display()))?;
            output.resource_action("Creating", name, &dir);
        }
    }

    eprintln!();
    output.note("Edit rules.toml to customize keywords and replies");
    output.finish("initialization", location);

    Ok(())
}
