use chatbox_types::{ArchiveKind, ConversationTurn, Role};
use chrono::{Local, NaiveDateTime};
use std::path::PathBuf;

use crate::archive::{ArchivePaths, ArchiveStore};
use crate::responder::{Reply, ResponseSelector};

/// 一轮对话的处理结果
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub user_turn: ConversationTurn,
    pub bot_turn: ConversationTurn,
    pub reply: Reply,
    pub chat_file: PathBuf,
    pub response_file: PathBuf,
    /// 归档写入失败的描述；不影响回复
    pub failures: Vec<String>,
}

/// 对话编排：归档用户消息 -> 选择回复 -> 归档问答 -> 返回回复
///
/// 一轮内所有行使用同一个时间戳，因此用户归档和回复归档总是落在同一分钟的文件里。
pub struct Conversation {
    paths: ArchivePaths,
    store: ArchiveStore,
    selector: ResponseSelector,
}

impl Conversation {
    pub fn new(paths: ArchivePaths, selector: ResponseSelector) -> Self {
        Self {
            paths,
            store: ArchiveStore::new(),
            selector,
        }
    }

    pub fn paths(&self) -> &ArchivePaths {
        &self.paths
    }

    pub fn store(&self) -> &ArchiveStore {
        &self.store
    }

    pub fn selector(&self) -> &ResponseSelector {
        &self.selector
    }

    /// 空白消息返回 `None`，不写任何文件
    pub async fn handle(&self, topic: &str, message: &str) -> Option<TurnReport> {
        self.handle_at(topic, message, Local::now().naive_local())
            .await
    }

    pub async fn handle_at(
        &self,
        topic: &str,
        message: &str,
        now: NaiveDateTime,
    ) -> Option<TurnReport> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        let mut failures = Vec::new();
        let user_turn = ConversationTurn::new(Role::User, message, now);

        let chat_file = self.paths.path_for(ArchiveKind::Chat, topic, now);
        if let Err(e) = self.store.append_turn(&chat_file, &user_turn) {
            tracing::warn!("Failed to archive user message: {:#}", e);
            failures.push(format!("{:#}", e));
        }

        let reply = self.selector.select(message).await;
        tracing::debug!("Reply source: {:?}", reply.source);
        let bot_turn = ConversationTurn::new(Role::Bot, reply.text.clone(), now);

        let response_file = self.paths.path_for(ArchiveKind::Response, topic, now);
        if let Err(e) = self
            .store
            .append_exchange(&response_file, &user_turn, &bot_turn)
        {
            tracing::warn!("Failed to archive reply: {:#}", e);
            failures.push(format!("{:#}", e));
        }

        Some(TurnReport {
            user_turn,
            bot_turn,
            reply,
            chat_file,
            response_file,
            failures,
        })
    }
}
