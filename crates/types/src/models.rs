use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 归档行时间戳格式：`[2024-05-01 09:30:12]`
pub const LINE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 文件名中的分钟级时间戳：`2024-05-01_09-30`
pub const MINUTE_STAMP_FORMAT: &str = "%Y-%m-%d_%H-%M";

/// 对话角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

impl Role {
    /// 归档文件中使用的角色前缀
    pub fn prefix(self) -> &'static str {
        match self {
            Role::User => "کاربر",
            Role::Bot => "ربات",
        }
    }
}

/// 归档类型：用户侧（chat）或机器人侧（response）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveKind {
    Chat,
    Response,
}

impl ArchiveKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ArchiveKind::Chat => "chat",
            ArchiveKind::Response => "response",
        }
    }
}

impl fmt::Display for ArchiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 一轮对话中的一条消息，写入后不可修改
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationTurn {
    pub timestamp: NaiveDateTime,
    pub role: Role,
    pub text: String,
}

impl ConversationTurn {
    pub fn new(role: Role, text: impl Into<String>, timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            role,
            text: text.into(),
        }
    }

    /// 不带时间戳的行内容，如 `کاربر: سلام`
    pub fn body(&self) -> String {
        format!("{}: {}", self.role.prefix(), self.text)
    }

    /// 完整归档行（不含换行符）
    pub fn render(&self) -> String {
        format!(
            "[{}] {}",
            self.timestamp.format(LINE_TIMESTAMP_FORMAT),
            self.body()
        )
    }
}

/// 搜索引擎返回的原始片段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub title: String,
    pub url: String,
    pub description: String,
}

/// 缓存中的搜索记录（片段 + 查询词 + 搜索时间）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRecord {
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub search_time: String,
    #[serde(default)]
    pub query: String,
}

impl SearchRecord {
    /// 由片段构造记录，`search_time` 在持久化时才写入
    pub fn from_hit(hit: SearchHit, query: &str) -> Self {
        Self {
            title: hit.title,
            url: hit.url,
            description: hit.description,
            search_time: String::new(),
            query: query.to_string(),
        }
    }

    pub fn stamp(&mut self, query: &str, search_time: &str) {
        self.query = query.to_string();
        self.search_time = search_time.to_string();
    }
}
