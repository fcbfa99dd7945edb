use anyhow::Result;
use chatbox_types::ArchiveKind;
use chrono::Local;

use crate::config::AppConfig;
use crate::ui::Output;

/// 预览当前分钟两个归档文件的路径
pub fn files(topic: Option<String>, force_local: bool, force_global: bool) -> Result<()> {
    let output = Output::new();
    let config = AppConfig::load_with_scope(force_local, force_global)?;
    let topic = super::resolve_topic(topic, &config);

    let now = Local::now().naive_local();
    let paths = super::archive_paths(&config);
    output.filenames(
        &topic,
        &paths.path_for(ArchiveKind::Chat, &topic, now),
        &paths.path_for(ArchiveKind::Response, &topic, now),
    );

    Ok(())
}
