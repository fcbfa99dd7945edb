use anyhow::Result;

use crate::archive::ArchiveStore;
use crate::config::AppConfig;
use crate::ui::Output;

/// 列出两个归档目录中的文件（新的在前）
pub fn list(force_local: bool, force_global: bool) -> Result<()> {
    let output = Output::new();
    let config = AppConfig::load_with_scope(force_local, force_global)?;
    let store = ArchiveStore::new();

    let mut total = 0;
    for (name, dir) in [
        ("chat archives", config.get_archive_folder()),
        ("response archives", config.get_response_folder()),
    ] {
        let files = store.list(&dir)?;
        output.resource_action("Listing", name, &dir);
        for file in &files {
            let name = file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            output.info(&name);
        }
        total += files.len();
    }

    if total == 0 {
        output.info("No archives found. Use 'chatbox chat' or 'chatbox send' to start!");
    }

    Ok(())
}
