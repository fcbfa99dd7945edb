pub mod chat;
pub mod clear_results;
pub mod files;
pub mod folders;
pub mod init;
pub mod list;
pub mod results;
pub mod search;
pub mod send;
pub mod show;

use anyhow::Result;
use chatbox_search::SearchAugmenter;

use crate::archive::ArchivePaths;
use crate::config::{AppConfig, RulesConfig};
use crate::conversation::{Conversation, TurnReport};
use crate::responder::{ReplySource, ResponseSelector};
use crate::ui::Output;

pub(crate) fn archive_paths(config: &AppConfig) -> ArchivePaths {
    ArchivePaths::new(config.get_archive_folder(), config.get_response_folder())
}

/// 未指定 --topic 时使用配置里的默认话题
pub(crate) fn resolve_topic(topic: Option<String>, config: &AppConfig) -> String {
    topic.unwrap_or_else(|| config.default_topic.clone())
}

/// 按配置组装对话：规则表 + 可选的网页搜索
pub(crate) fn build_conversation(config: &AppConfig, rules: RulesConfig) -> Result<Conversation> {
    let mut selector = ResponseSelector::new(rules, &config.responder)?;

    if config.responder.search_enabled {
        let augmenter = SearchAugmenter::from_settings(&config.search, config.get_search_cache())?;
        tracing::debug!("Search engines: {:?}", augmenter.engine_names());
        selector = selector.with_augmenter(augmenter);
    }

    Ok(Conversation::new(archive_paths(config), selector))
}

/// 加载作用域内的 config.toml 和 rules.toml 并组装对话
pub(crate) fn open_conversation(
    force_local: bool,
    force_global: bool,
) -> Result<(AppConfig, Conversation)> {
    let config = AppConfig::load_with_scope(force_local, force_global)?;
    let rules = RulesConfig::load(&AppConfig::config_dir(force_local, force_global))?;
    let conversation = build_conversation(&config, rules)?;
    Ok((config, conversation))
}

/// 打印一轮对话及其归档失败
pub(crate) fn print_report(output: &Output, report: &TurnReport) {
    output.message(&report.user_turn);
    output.message(&report.bot_turn);

    if let ReplySource::Search { records, mock } = &report.reply.source {
        if *mock {
            output.note("search engines unavailable, reply is based on placeholder results");
        } else {
            tracing::debug!("Reply built from {} search records", records);
        }
    }

    for failure in &report.failures {
        output.warning(&format!("archive not written: {}", failure));
    }
    tracing::debug!(
        "Archived to {} and {}",
        report.chat_file.display(),
        report.response_file.display()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_in(dir: &std::path::Path, search_enabled: bool) -> AppConfig {
        let mut config = AppConfig {
            data_dir: Some(dir.to_path_buf()),
            ..AppConfig::default()
        };
        config.responder.search_enabled = search_enabled;
        config
    }

    #[test]
    fn test_resolve_topic_falls_back_to_default() {
        let config = AppConfig::default();
        assert_eq!(resolve_topic(None, &config), "جلسه_عمومی");
        assert_eq!(resolve_topic(Some("rust".to_string()), &config), "rust");
    }

    #[test]
    fn test_build_conversation_without_search() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), false);

        let conversation = build_conversation(&config, RulesConfig::builtin()).unwrap();
        assert!(conversation.selector().augmenter().is_none());
        assert_eq!(
            conversation.paths().chat_dir,
            dir.path().join("chat_archives")
        );
    }

    #[test]
    fn test_build_conversation_with_search() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), true);

        let conversation = build_conversation(&config, RulesConfig::builtin()).unwrap();
        let augmenter = conversation.selector().augmenter().unwrap();
        assert_eq!(
            augmenter.engine_names(),
            vec!["bing", "duckduckgo", "generic"]
        );
        assert_eq!(
            augmenter.cache_path(),
            dir.path().join("search_results.json")
        );
    }

    #[test]
    fn test_unbounded_search_delay_fails_fast() {
        let dir = tempfile::tempdir().unwrap();
        let mut config: AppConfig = toml::from_str(
            r#"
[search]
max_delay_secs = inf
            "#,
        )
        .unwrap();
        config.data_dir = Some(dir.path().to_path_buf());

        let err = build_conversation(&config, RulesConfig::builtin())
            .err()
            .unwrap();
        assert!(format!("{:#}", err).contains("max_delay_secs"));
    }

    #[test]
    fn test_invalid_rules_fail_fast() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path(), false);
        let rules = RulesConfig {
            defaults: Vec::new(),
            ..RulesConfig::builtin()
        };
        assert!(build_conversation(&config, rules).is_err());
    }
}
