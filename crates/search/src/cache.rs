use anyhow::{Context, Result};
use chatbox_types::{SearchRecord, LINE_TIMESTAMP_FORMAT};
use chrono::{Local, NaiveDateTime};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// 搜索结果缓存：查询词 -> 记录列表，整体保存为一个 JSON 文件
///
/// 查询词按原样作为键（不做大小写或空白规范化），重复查询的记录直接追加。
#[derive(Debug)]
pub struct ResultCache {
    path: PathBuf,
    entries: BTreeMap<String, Vec<SearchRecord>>,
}

impl ResultCache {
    /// 空缓存，不读取文件
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: BTreeMap::new(),
        }
    }

    /// 创建并立即加载
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut cache = Self::new(path);
        cache.load();
        cache
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 用文件内容替换内存中的映射
    ///
    /// 文件不存在或无法解析时映射置空并返回 false（只记录日志，不报错）。
    pub fn load(&mut self) -> bool {
        self.entries.clear();

        if !self.path.exists() {
            tracing::debug!("No search cache at {}", self.path.display());
            return false;
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read search cache {}: {}", self.path.display(), e);
                return false;
            }
        };

        match serde_json::from_str(&content) {
            Ok(entries) => {
                self.entries = entries;
                tracing::debug!(
                    "Loaded {} cached queries from {}",
                    self.entries.len(),
                    self.path.display()
                );
                true
            }
            Err(e) => {
                tracing::warn!(
                    "Ignoring unreadable search cache {}: {}",
                    self.path.display(),
                    e
                );
                false
            }
        }
    }

    /// 追加记录并整体写回文件，返回打上时间戳后的记录
    pub fn persist(&mut self, query: &str, records: &[SearchRecord]) -> Result<Vec<SearchRecord>> {
        self.persist_at(query, records, Local::now().naive_local())
    }

    pub fn persist_at(
        &mut self,
        query: &str,
        records: &[SearchRecord],
        now: NaiveDateTime,
    ) -> Result<Vec<SearchRecord>> {
        let search_time = now.format(LINE_TIMESTAMP_FORMAT).to_string();
        let stamped: Vec<SearchRecord> = records
            .iter()
            .cloned()
            .map(|mut record| {
                record.stamp(query, &search_time);
                record
            })
            .collect();

        self.entries
            .entry(query.to_string())
            .or_default()
            .extend(stamped.iter().cloned());

        self.save()?;
        tracing::info!("Saved {} results for '{}'", stamped.len(), query);

        Ok(stamped)
    }

    /// 整体覆盖写入
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create cache directory: {}", parent.display())
                })?;
            }
        }

        let content = serde_json::to_string_pretty(&self.entries)
            .context("Failed to serialize search cache")?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write search cache: {}", self.path.display()))?;

        Ok(())
    }

    pub fn get(&self, query: &str) -> &[SearchRecord] {
        self.entries.get(query).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn entries(&self) -> &BTreeMap<String, Vec<SearchRecord>> {
        &self.entries
    }

    pub fn query_count(&self) -> usize {
        self.entries.len()
    }

    pub fn record_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
