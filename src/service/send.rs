use anyhow::Result;

use crate::ui::Output;

/// 发送单条消息：归档、回复、归档回复
pub async fn send(
    message: &str,
    topic: Option<String>,
    force_local: bool,
    force_global: bool,
) -> Result<()> {
    let output = Output::new();
    let (config, conversation) = super::open_conversation(force_local, force_global)?;
    let topic = super::resolve_topic(topic, &config);

    match conversation.handle(&topic, message).await {
        Some(report) => super::print_report(&output, &report),
        None => output.info("Empty message, nothing sent."),
    }

    Ok(())
}
