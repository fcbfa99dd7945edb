use serde::{Deserialize, Serialize};

/// 搜索配置（对应 config.toml 中的 `[search]` 段）
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SearchSettings {
    /// 按顺序尝试的引擎（默认: bing, duckduckgo, generic）
    #[serde(default = "default_engines")]
    pub engines: Vec<String>,

    /// generic 引擎依次尝试的查询地址前缀，查询词直接拼接在末尾
    #[serde(default = "default_fallback_urls")]
    pub fallback_urls: Vec<String>,

    /// 单次请求超时（秒，默认: 10）
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// 请求前随机等待的下限（秒，默认: 2.0）
    #[serde(default = "default_min_delay_secs")]
    pub min_delay_secs: f64,

    /// 请求前随机等待的上限（秒，默认: 4.0）
    #[serde(default = "default_max_delay_secs")]
    pub max_delay_secs: f64,

    /// 每个地址最多请求次数（默认: 2）
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// 收到 429 后额外等待的秒数（默认: 10）
    #[serde(default = "default_throttle_backoff_secs")]
    pub throttle_backoff_secs: u64,

    /// generic 引擎每页最多保留的链接数（默认: 5）
    #[serde(default = "default_generic_limit")]
    pub generic_limit: usize,

    #[serde(default = "default_user_agents")]
    pub user_agents: Vec<String>,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            engines: default_engines(),
            fallback_urls: default_fallback_urls(),
            timeout_secs: default_timeout_secs(),
            min_delay_secs: default_min_delay_secs(),
            max_delay_secs: default_max_delay_secs(),
            max_attempts: default_max_attempts(),
            throttle_backoff_secs: default_throttle_backoff_secs(),
            generic_limit: default_generic_limit(),
            user_agents: default_user_agents(),
        }
    }
}

fn default_engines() -> Vec<String> {
    vec![
        "bing".to_string(),
        "duckduckgo".to_string(),
        "generic".to_string(),
    ]
}

fn default_fallback_urls() -> Vec<String> {
    [
        "https://www.bing.com/search?q=",
        "https://search.yahoo.com/search?p=",
        "https://duckduckgo.com/html/?q=",
        "https://www.ask.com/web?q=",
        "https://www.baidu.com/s?wd=",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_min_delay_secs() -> f64 {
    2.0
}

fn default_max_delay_secs() -> f64 {
    4.0
}

fn default_max_attempts() -> u32 {
    2
}

fn default_throttle_backoff_secs() -> u64 {
    10
}

fn default_generic_limit() -> usize {
    5
}

fn default_user_agents() -> Vec<String> {
    [
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:89.0) Gecko/20100101 Firefox/89.0",
        "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.15; rv:89.0) Gecko/20100101 Firefox/89.0",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}
