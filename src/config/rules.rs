use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const RULES_FILE: &str = "rules.toml";

/// 单条关键词规则
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResponseRule {
    pub keyword: String,
    pub replies: Vec<String>,
}

/// 回复规则表（rules.toml）
///
/// `rules` 的顺序就是匹配顺序，第一个命中的关键词胜出。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RulesConfig {
    /// 没有关键词命中时的回复
    pub defaults: Vec<String>,

    /// 出现任意一个即触发网页搜索
    #[serde(default)]
    pub search_triggers: Vec<String>,

    #[serde(default)]
    pub rules: Vec<ResponseRule>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RulesConfig {
    /// 内置规则表
    pub fn builtin() -> Self {
        fn rule(keyword: &str, replies: &[&str]) -> ResponseRule {
            ResponseRule {
                keyword: keyword.to_string(),
                replies: replies.iter().map(|r| r.to_string()).collect(),
            }
        }

        Self {
            defaults: [
                "جالب است! می‌خواهید بیشتر بدانید؟",
                "متوجه شدم! ادامه بدهید...",
                "خب، این رو فهمیدم. چی دیگه؟",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            search_triggers: [
                "چیست", "کیست", "چطور", "چگونه", "راهنمایی", "اطلاعات", "درباره", "معنی",
                "تعریف", "آموزش", "یادگیری", "کمک", "پیدا کن", "جستجو", "سرچ", "search",
                "find", "what is", "how to",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            rules: vec![
                rule("سلام", &["سلام! چطور می‌تونم کمک کنم؟", "سلام عزیز! چه خبر؟"]),
                rule("خداحافظ", &["خداحافظ! موفق باشید.", "به امید دیدار!"]),
                rule("تشکر", &["خواهش می‌کنم!", "قابل نداشت!"]),
                rule("سوال", &["چه سوالی دارید؟", "با کمال میل پاسخ می‌دم."]),
                rule("کمک", &["چه کمکی نیاز دارید؟", "در خدمتم!"]),
            ],
        }
    }

    /// 加载 rules.toml，不存在时使用内置规则
    pub fn load(dir: &Path) -> Result<Self> {
        let path = Self::path_in(dir);

        if !path.exists() {
            tracing::debug!("No rules file at {}, using built-in rules", path.display());
            return Ok(Self::builtin());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read rules config: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse rules config: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid rules config: {}", path.display()))?;

        tracing::debug!(
            "Loaded {} rules from: {}",
            config.rules.len(),
            path.display()
        );

        Ok(config)
    }

    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(RULES_FILE)
    }

    pub fn validate(&self) -> Result<()> {
        if self.defaults.is_empty() {
            anyhow::bail!("'defaults' must contain at least one reply");
        }

        for rule in &self.rules {
            if rule.keyword.trim().is_empty() {
                anyhow::bail!("Rule keywords must not be empty");
            }
            if rule.replies.is_empty() {
                anyhow::bail!("Rule '{}' has no replies", rule.keyword);
            }
        }

        Ok(())
    }

    pub fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let path = Self::path_in(dir);
        let content = toml::to_string_pretty(self).context("Failed to serialize rules")?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write rules file: {}", path.display()))?;

        Ok(path)
    }
}
