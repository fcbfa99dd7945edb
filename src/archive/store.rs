use anyhow::{Context, Result};
use chatbox_types::{ConversationTurn, LINE_TIMESTAMP_FORMAT};
use chrono::{Local, NaiveDateTime};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// 回复归档中每轮对话之后的分隔线长度
pub const SEPARATOR_WIDTH: usize = 50;

/// 纯文本追加式归档
///
/// 每次调用打开、追加、关闭文件，不持有句柄；每次调用只做一次 `write_all`，
/// 并发写入同一文件时行可能交错，但单次调用的内容不会被拆开。
#[derive(Debug, Default, Clone, Copy)]
pub struct ArchiveStore;

impl ArchiveStore {
    pub fn new() -> Self {
        Self
    }

    /// 追加一行 `[当前时间] 内容`
    pub fn append(&self, path: &Path, line: &str) -> Result<()> {
        self.append_at(path, line, Local::now().naive_local())
    }

    /// 追加一行 `[timestamp] 内容`
    pub fn append_at(&self, path: &Path, line: &str, timestamp: NaiveDateTime) -> Result<()> {
        self.write_block(path, &stamped_line(line, timestamp))
    }

    /// 追加一条消息，使用消息自身的时间戳
    pub fn append_turn(&self, path: &Path, turn: &ConversationTurn) -> Result<()> {
        self.append_at(path, &turn.body(), turn.timestamp)
    }

    /// 追加一问一答两行，后跟分隔线；三行在一次写入中完成
    pub fn append_exchange(
        &self,
        path: &Path,
        user: &ConversationTurn,
        bot: &ConversationTurn,
    ) -> Result<()> {
        let block = format!(
            "{}{}{}\n",
            stamped_line(&user.body(), user.timestamp),
            stamped_line(&bot.body(), bot.timestamp),
            "-".repeat(SEPARATOR_WIDTH)
        );
        self.write_block(path, &block)
    }

    /// 读取整个文件；文件不存在时返回 `None`
    pub fn read_all(&self, path: &Path) -> Result<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read archive: {}", path.display()))
            }
        }
    }

    /// 列出目录中的 .txt 归档，按文件名倒序（即时间倒序）
    pub fn list(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read archive folder: {}", dir.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "txt"))
            .collect();

        files.sort_by(|a, b| b.file_name().cmp(&a.file_name()));
        Ok(files)
    }

    fn write_block(&self, path: &Path, block: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create archive folder: {}", parent.display())
                })?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Failed to open archive: {}", path.display()))?;

        file.write_all(block.as_bytes())
            .with_context(|| format!("Failed to write archive: {}", path.display()))?;

        Ok(())
    }
}

fn stamped_line(line: &str, timestamp: NaiveDateTime) -> String {
    format!("[{}] {}\n", timestamp.format(LINE_TIMESTAMP_FORMAT), line)
}
