use anyhow::Result;
use chatbox_search::SearchAugmenter;
use chatbox_types::SearchRecord;
use rand::seq::SliceRandom;

use crate::config::{ResponderConfig, RulesConfig};

const SUMMARY_RECORDS: usize = 2;
const SUMMARY_DESCRIPTION_CHARS: usize = 80;

/// 回复来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplySource {
    /// 命中的关键词
    Keyword(String),
    Default,
    Search { records: usize, mock: bool },
}

#[derive(Debug, Clone)]
pub struct Reply {
    pub text: String,
    pub source: ReplySource,
}

/// 单步回复选择
///
/// 1. 消息触发搜索条件且启用了搜索：交给 SearchAugmenter，汇总前两条结果
/// 2. 按定义顺序匹配关键词（小写后子串匹配），命中则随机选一条回复
/// 3. 否则随机选一条默认回复
pub struct ResponseSelector {
    rules: RulesConfig,
    augmenter: Option<SearchAugmenter>,
    search_limit: usize,
    min_words_for_search: usize,
}

impl ResponseSelector {
    pub fn new(rules: RulesConfig, config: &ResponderConfig) -> Result<Self> {
        rules.validate()?;
        Ok(Self {
            rules,
            augmenter: None,
            search_limit: config.search_limit,
            min_words_for_search: config.min_words_for_search,
        })
    }

    pub fn with_augmenter(mut self, augmenter: SearchAugmenter) -> Self {
        self.augmenter = Some(augmenter);
        self
    }

    pub fn augmenter(&self) -> Option<&SearchAugmenter> {
        self.augmenter.as_ref()
    }

    /// 词数超过阈值，或包含任一搜索触发词
    pub fn should_search(&self, message: &str) -> bool {
        if message.split_whitespace().count() > self.min_words_for_search {
            return true;
        }

        let lowered = message.to_lowercase();
        self.rules
            .search_triggers
            .iter()
            .any(|trigger| lowered.contains(&trigger.to_lowercase()))
    }

    pub async fn select(&self, message: &str) -> Reply {
        if let Some(augmenter) = &self.augmenter {
            if self.should_search(message) {
                let outcome = augmenter
                    .search_and_save(message, self.search_limit)
                    .await;
                return Reply {
                    text: summarize_results(message, &outcome.records),
                    source: ReplySource::Search {
                        records: outcome.records.len(),
                        mock: outcome.is_mock(),
                    },
                };
            }
        }

        self.pick_rule_reply(message)
    }

    /// 只走关键词表和默认回复，不做搜索
    pub fn pick_rule_reply(&self, message: &str) -> Reply {
        let lowered = message.to_lowercase();
        let mut rng = rand::thread_rng();

        for rule in &self.rules.rules {
            if lowered.contains(&rule.keyword.to_lowercase()) {
                if let Some(reply) = rule.replies.choose(&mut rng) {
                    return Reply {
                        text: reply.clone(),
                        source: ReplySource::Keyword(rule.keyword.clone()),
                    };
                }
            }
        }

        Reply {
            text: self
                .rules
                .defaults
                .choose(&mut rng)
                .cloned()
                .unwrap_or_default(),
            source: ReplySource::Default,
        }
    }
}

/// 把搜索结果汇总成一条回复
pub fn summarize_results(message: &str, records: &[SearchRecord]) -> String {
    if records.is_empty() {
        return format!("متأسفم، نتوانستم اطلاعاتی درباره '{}' پیدا کنم.", message);
    }

    let mut response = format!("🔍 درباره '{}' جستجو کردم:\n\n", message);
    for (i, record) in records.iter().take(SUMMARY_RECORDS).enumerate() {
        response.push_str(&format!("{}. {}\n", i + 1, record.title));
        if !record.description.is_empty() {
            let short: String = record
                .description
                .chars()
                .take(SUMMARY_DESCRIPTION_CHARS)
                .collect();
            response.push_str(&format!("   {}...\n", short));
        }
    }
    response.push_str("\nبرای جزئیات بیشتر دستور 'chatbox results' را اجرا کنید.");

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chatbox_search::{EngineError, SearchEngine};
    use chatbox_types::SearchHit;
    use tempfile::TempDir;

    struct StaticEngine(Vec<SearchHit>);

    #[async_trait]
    impl SearchEngine for StaticEngine {
        fn name(&self) -> &str {
            "static"
        }

        async fn fetch_snippets(&self, _query: &str) -> Result<Vec<SearchHit>, EngineError> {
            Ok(self.0.clone())
        }
    }

    fn selector() -> ResponseSelector {
        ResponseSelector::new(RulesConfig::builtin(), &ResponderConfig::default()).unwrap()
    }

    fn hit(title: &str, description: &str) -> SearchHit {
        SearchHit {
            title: title.to_string(),
            url: "https://example.org".to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_first_keyword_always_wins() {
        let selector = selector();
        let candidates = &RulesConfig::builtin().rules[0].replies;
        for _ in 0..50 {
            let reply = selector.pick_rule_reply("سلام");
            assert!(candidates.contains(&reply.text));
            assert_eq!(reply.source, ReplySource::Keyword("سلام".to_string()));
        }
    }

    #[test]
    fn test_definition_order_beats_position_in_message() {
        // "خداحافظ" 在消息中先出现，但 "سلام" 在规则表中排在前面
        let reply = selector().pick_rule_reply("خداحافظ و سلام");
        assert_eq!(reply.source, ReplySource::Keyword("سلام".to_string()));
    }

    #[test]
    fn test_matching_is_case_folded_substring() {
        let rules: RulesConfig = toml::from_str(
            r#"
defaults = ["default"]

[[rules]]
keyword = "Hello"
replies = ["hi"]
            "#,
        )
        .unwrap();
        let selector = ResponseSelector::new(rules, &ResponderConfig::default()).unwrap();

        assert_eq!(selector.pick_rule_reply("oh HELLO").text, "hi");
        assert_eq!(selector.pick_rule_reply("othello!").text, "hi");
        assert_eq!(selector.pick_rule_reply("bye").text, "default");
    }

    #[tokio::test]
    async fn test_unmatched_short_message_gets_default() {
        let dir = TempDir::new().unwrap();
        let augmenter = SearchAugmenter::new(
            vec![Box::new(StaticEngine(vec![hit("never", "")]))],
            dir.path().join("cache.json"),
        );
        let selector = selector().with_augmenter(augmenter);
        let defaults = RulesConfig::builtin().defaults;

        for message in ["باشه", "ok then", "hmm"] {
            let reply = selector.select(message).await;
            assert_eq!(reply.source, ReplySource::Default);
            assert!(defaults.contains(&reply.text));
        }
        assert!(!dir.path().join("cache.json").exists());
    }

    #[test]
    fn test_should_search_heuristics() {
        let selector = selector();
        assert!(selector.should_search("what is rust"));
        assert!(selector.should_search("WHAT IS rust"));
        assert!(selector.should_search("یادگیری"));
        assert!(selector.should_search("one two three four"));
        assert!(!selector.should_search("one two three"));
        assert!(!selector.should_search("سلام"));
    }

    #[tokio::test]
    async fn test_search_reply_summarizes_two_records() {
        let dir = TempDir::new().unwrap();
        let cache = dir.path().join("cache.json");
        let long = "d".repeat(200);
        let augmenter = SearchAugmenter::new(
            vec![Box::new(StaticEngine(vec![
                hit("First", &long),
                hit("Second", ""),
                hit("Third", "unused"),
            ]))],
            &cache,
        );
        let selector = selector().with_augmenter(augmenter);

        let reply = selector.select("what is rust").await;
        assert_eq!(
            reply.source,
            ReplySource::Search {
                records: 3,
                mock: false
            }
        );
        assert!(reply.text.starts_with("🔍 درباره 'what is rust' جستجو کردم:"));
        assert!(reply.text.contains("1. First\n"));
        assert!(reply.text.contains(&format!("   {}...\n", "d".repeat(80))));
        assert!(reply.text.contains("2. Second\n"));
        assert!(!reply.text.contains("Third"));
        assert!(cache.exists());
    }

    #[tokio::test]
    async fn test_search_disabled_uses_rules() {
        // 没有 augmenter 时即使触发词命中也只走关键词表
        let reply = selector().select("کمک لازم دارم").await;
        assert_eq!(reply.source, ReplySource::Keyword("کمک".to_string()));
    }

    #[test]
    fn test_summary_apology_when_empty() {
        assert_eq!(
            summarize_results("x", &[]),
            "متأسفم، نتوانستم اطلاعاتی درباره 'x' پیدا کنم."
        );
    }

    #[test]
    fn test_invalid_rules_are_rejected() {
        let rules = RulesConfig {
            defaults: Vec::new(),
            ..RulesConfig::builtin()
        };
        assert!(ResponseSelector::new(rules, &ResponderConfig::default()).is_err());
    }
}
