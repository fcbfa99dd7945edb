use chatbox_types::{ArchiveKind, MINUTE_STAMP_FORMAT};
use chrono::NaiveDateTime;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Path, PathBuf};

/// 空话题或清洗后为空时使用的占位名
pub const TOPIC_PLACEHOLDER: &str = "بدون_موضوع";

const JOIN_CHAR: char = '_';
const MAX_TOPIC_CHARS: usize = 50;
const FORBIDDEN_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

static JOIN_RUN: Lazy<Regex> = Lazy::new(|| Regex::new("_+").unwrap());

/// 把任意话题文本清洗成可用作文件名片段的字符串
///
/// 去掉 `<>:"/\|?*` 和控制字符，空白替换为 `_`，合并连续的 `_`，
/// 去掉首尾 `_`，截断到 50 个字符。结果为空时返回占位名。
pub fn sanitize_topic(topic: &str) -> String {
    let mapped: String = topic
        .chars()
        .filter(|c| !FORBIDDEN_CHARS.contains(c))
        .map(|c| if c.is_whitespace() { JOIN_CHAR } else { c })
        .filter(|c| !c.is_control())
        .collect();

    let collapsed = JOIN_RUN.replace_all(&mapped, "_");
    let trimmed: String = collapsed
        .trim_matches(JOIN_CHAR)
        .chars()
        .take(MAX_TOPIC_CHARS)
        .collect();

    // 截断可能留下结尾的 `_`
    let result = trimmed.trim_end_matches(JOIN_CHAR);
    if result.is_empty() {
        TOPIC_PLACEHOLDER.to_string()
    } else {
        result.to_string()
    }
}

/// `{kind}_{YYYY-MM-DD_HH-MM}_{topic}.txt`
///
/// 同一分钟、同一话题的消息写入同一个文件，下一分钟开始新文件。
pub fn archive_filename(kind: ArchiveKind, topic: &str, now: NaiveDateTime) -> String {
    format!(
        "{}_{}_{}.txt",
        kind.as_str(),
        now.format(MINUTE_STAMP_FORMAT),
        sanitize_topic(topic)
    )
}

/// 两个归档目录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivePaths {
    pub chat_dir: PathBuf,
    pub response_dir: PathBuf,
}

impl ArchivePaths {
    pub fn new(chat_dir: impl Into<PathBuf>, response_dir: impl Into<PathBuf>) -> Self {
        Self {
            chat_dir: chat_dir.into(),
            response_dir: response_dir.into(),
        }
    }

    pub fn dir_for(&self, kind: ArchiveKind) -> &Path {
        match kind {
            ArchiveKind::Chat => &self.chat_dir,
            ArchiveKind::Response => &self.response_dir,
        }
    }

    pub fn path_for(&self, kind: ArchiveKind, topic: &str, now: NaiveDateTime) -> PathBuf {
        self.dir_for(kind).join(archive_filename(kind, topic, now))
    }
}
