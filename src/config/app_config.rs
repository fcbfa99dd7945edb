use anyhow::{Context, Result};
use chatbox_search::SearchSettings;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = ".chatbox";
const CONFIG_FILE: &str = "config.toml";

/// 配置作用域
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    Auto,
    Local,
    Global,
}

/// 自动回复配置
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ResponderConfig {
    /// 是否允许调用网页搜索（默认: true）
    #[serde(default = "default_search_enabled")]
    pub search_enabled: bool,

    /// 每次搜索保留的结果数（默认: 3）
    #[serde(default = "default_search_limit")]
    pub search_limit: usize,

    /// 消息词数超过该值时触发搜索（默认: 3）
    #[serde(default = "default_min_words_for_search")]
    pub min_words_for_search: usize,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        Self {
            search_enabled: default_search_enabled(),
            search_limit: default_search_limit(),
            min_words_for_search: default_min_words_for_search(),
        }
    }
}

fn default_search_enabled() -> bool {
    true
}

fn default_search_limit() -> usize {
    3
}

fn default_min_words_for_search() -> usize {
    3
}

/// 应用配置
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AppConfig {
    /// 数据目录（可选，默认: ~/.chatbox 或 ./.chatbox）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// 用户消息归档目录（默认: <data_dir>/chat_archives）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archive_folder: Option<PathBuf>,

    /// 回复归档目录（默认: <data_dir>/response_archives）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_folder: Option<PathBuf>,

    /// 搜索缓存文件（默认: <data_dir>/search_results.json）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_cache: Option<PathBuf>,

    /// 未指定 --topic 时使用的话题
    #[serde(default = "default_topic")]
    pub default_topic: String,

    #[serde(default)]
    pub responder: ResponderConfig,

    #[serde(default)]
    pub search: SearchSettings,
}

fn default_topic() -> String {
    "جلسه_عمومی".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            archive_folder: None,
            response_folder: None,
            search_cache: None,
            default_topic: default_topic(),
            responder: ResponderConfig::default(),
            search: SearchSettings::default(),
        }
    }
}

impl AppConfig {
    /// 全局目录：~/.chatbox/
    pub fn global_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
    }

    /// 本地目录：./.chatbox/
    pub fn local_dir() -> PathBuf {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(APP_DIR)
    }

    /// 检查本地配置是否存在
    /// 注意：如果当前目录是用户主目录，则不认为是本地配置
    pub fn has_local_config() -> bool {
        let current_dir = match std::env::current_dir() {
            Ok(dir) => dir,
            Err(_) => return false,
        };

        if let Some(home) = Self::global_dir().parent().map(|p| p.to_path_buf()) {
            let current_canonical = current_dir.canonicalize().unwrap_or(current_dir.clone());
            let home_canonical = home.canonicalize().unwrap_or(home);

            if current_canonical == home_canonical {
                return false;
            }
        }

        Self::local_dir().join(CONFIG_FILE).exists()
    }

    /// 验证作用域标志（不能同时指定 local 和 global）
    pub fn validate_scope_flags(local: bool, global: bool) -> Result<()> {
        if local && global {
            anyhow::bail!("Cannot specify both --local and --global, please choose one");
        }
        Ok(())
    }

    /// 获取当前作用域名称
    pub fn get_scope_name(force_local: bool, force_global: bool) -> &'static str {
        if force_local {
            "local"
        } else if force_global {
            "global"
        } else if Self::has_local_config() {
            "local"
        } else {
            "global"
        }
    }

    /// 根据 local 标志获取配置目录
    pub fn get_dir(local: bool) -> PathBuf {
        if local {
            Self::local_dir()
        } else {
            Self::global_dir()
        }
    }

    /// 加载配置：根据 local/global 标志或优先级加载
    /// - local = true: 强制使用本地配置
    /// - global = true: 强制使用全局配置
    /// - 两者都为 false: 优先本地配置，其次全局配置，最后默认配置
    pub fn load_with_scope(force_local: bool, force_global: bool) -> Result<Self> {
        Self::validate_scope_flags(force_local, force_global)?;

        let scope = if force_local {
            ConfigScope::Local
        } else if force_global {
            ConfigScope::Global
        } else {
            ConfigScope::Auto
        };

        Self::load_with_scope_internal(scope)
    }

    /// 所选作用域下配置文件所在目录（rules.toml 也放在这里）
    pub fn config_dir(force_local: bool, force_global: bool) -> PathBuf {
        let local = force_local || (!force_global && Self::has_local_config());
        Self::get_dir(local)
    }

    fn load_with_scope_internal(scope: ConfigScope) -> Result<Self> {
        match scope {
            ConfigScope::Auto => {
                if Self::has_local_config() {
                    Self::load_from_path(&Self::local_dir().join(CONFIG_FILE), true)
                } else {
                    Self::load_from_path(&Self::global_dir().join(CONFIG_FILE), false)
                }
            }
            ConfigScope::Local => Self::load_from_path(&Self::local_dir().join(CONFIG_FILE), true),
            ConfigScope::Global => {
                Self::load_from_path(&Self::global_dir().join(CONFIG_FILE), false)
            }
        }
    }

    /// 从指定路径加载配置文件，文件不存在时使用默认配置
    fn load_from_path(path: &Path, is_local: bool) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            let config: Self = toml::from_str(&content)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?;
            tracing::debug!("Loaded app config from: {}", path.display());
            config
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Self::default()
        };

        // 本地配置强制使用本地数据目录
        if is_local {
            config.data_dir = Some(Self::local_dir());
        }

        Ok(config)
    }

    pub fn get_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(Self::global_dir)
    }

    pub fn get_archive_folder(&self) -> PathBuf {
        self.archive_folder
            .clone()
            .unwrap_or_else(|| self.get_data_dir().join("chat_archives"))
    }

    pub fn get_response_folder(&self) -> PathBuf {
        self.response_folder
            .clone()
            .unwrap_or_else(|| self.get_data_dir().join("response_archives"))
    }

    pub fn get_search_cache(&self) -> PathBuf {
        self.search_cache
            .clone()
            .unwrap_or_else(|| self.get_data_dir().join("search_results.json"))
    }

    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE)
    }

    /// 写入指定目录下的 config.toml
    pub fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let config_path = dir.join(CONFIG_FILE);
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_app_config() {
        let toml_str = r#"
data_dir = "/tmp/chatbox"
default_topic = "general"

[responder]
search_enabled = false
search_limit = 5

[search]
engines = ["duckduckgo"]
min_delay_secs = 0.5
max_delay_secs = 1.0
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();

        assert_eq!(config.default_topic, "general");
        assert!(!config.responder.search_enabled);
        assert_eq!(config.responder.search_limit, 5);
        assert_eq!(config.responder.min_words_for_search, 3);
        assert_eq!(config.search.engines, vec!["duckduckgo"]);
        assert_eq!(config.search.timeout_secs, 10);
        assert_eq!(
            config.get_archive_folder(),
            PathBuf::from("/tmp/chatbox/chat_archives")
        );
        assert_eq!(
            config.get_search_cache(),
            PathBuf::from("/tmp/chatbox/search_results.json")
        );
    }

    #[test]
    fn test_default_values() {
        let config: AppConfig = toml::from_str("").unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.default_topic, "جلسه_عمومی");
        assert!(config.responder.search_enabled);
        assert_eq!(config.responder.search_limit, 3);
        assert_eq!(config.search.max_attempts, 2);
    }

    #[test]
    fn test_explicit_folders_override_data_dir() {
        let toml_str = r#"
data_dir = "/data"
archive_folder = "/elsewhere/chats"
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.get_archive_folder(), PathBuf::from("/elsewhere/chats"));
        assert_eq!(
            config.get_response_folder(),
            PathBuf::from("/data/response_archives")
        );
    }

    #[test]
    fn test_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = AppConfig::default().save_to(dir.path()).unwrap();

        let content = std::fs::read_to_string(path).unwrap();
        let config: AppConfig = toml::from_str(&content).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_scope_flags_conflict() {
        assert!(AppConfig::validate_scope_flags(true, true).is_err());
        assert!(AppConfig::validate_scope_flags(true, false).is_ok());
    }
}
