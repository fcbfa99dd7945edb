//! Engine Traits

use async_trait::async_trait;
use chatbox_types::SearchHit;

use crate::error::EngineError;

/// 搜索引擎 Trait
///
/// `Ok(vec![])` 表示引擎正常返回但没有结果，`Err` 表示请求或响应本身出错。
/// 两者在回退链中都会转向下一个引擎，但日志级别不同。
#[async_trait]
pub trait SearchEngine: Send + Sync {
    /// 引擎名称（用于日志）
    fn name(&self) -> &str;

    /// 获取与查询相关的片段
    async fn fetch_snippets(&self, query: &str) -> Result<Vec<SearchHit>, EngineError>;
}
