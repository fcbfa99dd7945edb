use anyhow::Result;
use chatbox_types::ArchiveKind;
use chrono::Local;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Editor, Input};

use crate::conversation::Conversation;
use crate::ui::Output;

/// 交互会话中的一行输入
#[derive(Debug, Clone, PartialEq, Eq)]
enum ChatCommand {
    Message(String),
    Topic(String),
    Multi,
    Files,
    History,
    Responses,
    Clear,
    Help,
    Quit,
    Unknown(String),
}

fn parse_command(line: &str) -> ChatCommand {
    let line = line.trim();
    let Some(rest) = line.strip_prefix('/') else {
        return ChatCommand::Message(line.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match name {
        "topic" => ChatCommand::Topic(arg.to_string()),
        "multi" => ChatCommand::Multi,
        "files" => ChatCommand::Files,
        "history" => ChatCommand::History,
        "responses" => ChatCommand::Responses,
        "clear" => ChatCommand::Clear,
        "help" => ChatCommand::Help,
        "quit" | "exit" => ChatCommand::Quit,
        _ => ChatCommand::Unknown(name.to_string()),
    }
}

const HELP: &[(&str, &str)] = &[
    ("/topic NAME", "switch topic"),
    ("/multi", "compose a multi-line message in $EDITOR"),
    ("/files", "show the current archive files"),
    ("/history", "show the user message archive"),
    ("/responses", "show the response archive"),
    ("/clear", "clear the screen"),
    ("/quit", "leave the session"),
];

/// 交互式对话
pub async fn chat(topic: Option<String>, force_local: bool, force_global: bool) -> Result<()> {
    let output = Output::new();
    let (config, conversation) = super::open_conversation(force_local, force_global)?;
    let mut topic = super::resolve_topic(topic, &config);
    let theme = ColorfulTheme::default();

    show_files(&output, &conversation, &topic);
    match conversation.selector().augmenter() {
        Some(augmenter) => output.note(&format!(
            "web search enabled ({})",
            augmenter.engine_names().join(", ")
        )),
        None => output.note("web search disabled, replies come from rules.toml"),
    }
    output.note("Type /help for commands, /quit to exit");
    eprintln!();

    loop {
        let line = match Input::<String>::with_theme(&theme)
            .with_prompt(topic.as_str())
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            Err(e) => {
                // 终端关闭或 Ctrl-D
                tracing::debug!("Input closed: {}", e);
                break;
            }
        };

        match parse_command(&line) {
            ChatCommand::Message(text) => send(&output, &conversation, &topic, &text).await,
            ChatCommand::Topic(name) => {
                if name.is_empty() {
                    output.warning("usage: /topic NAME");
                } else {
                    topic = name;
                    show_files(&output, &conversation, &topic);
                }
            }
            ChatCommand::Multi => match Editor::new().edit("") {
                Ok(Some(text)) => send(&output, &conversation, &topic, &text).await,
                Ok(None) => output.info("Message discarded"),
                Err(e) => output.warning(&format!("editor failed: {}", e)),
            },
            ChatCommand::Files => show_files(&output, &conversation, &topic),
            ChatCommand::History => show_archive(&output, &conversation, &topic, ArchiveKind::Chat),
            ChatCommand::Responses => {
                show_archive(&output, &conversation, &topic, ArchiveKind::Response)
            }
            ChatCommand::Clear => Term::stdout().clear_screen()?,
            ChatCommand::Help => {
                for (usage, text) in HELP {
                    output.info(&format!("{:<14} {}", usage, text));
                }
            }
            ChatCommand::Quit => break,
            ChatCommand::Unknown(name) => {
                output.warning(&format!("unknown command '/{}', try /help", name))
            }
        }
    }

    Ok(())
}

async fn send(output: &Output, conversation: &Conversation, topic: &str, text: &str) {
    if let Some(report) = conversation.handle(topic, text).await {
        super::print_report(output, &report);
    }
}

fn show_files(output: &Output, conversation: &Conversation, topic: &str) {
    let now = Local::now().naive_local();
    let paths = conversation.paths();
    output.filenames(
        topic,
        &paths.path_for(ArchiveKind::Chat, topic, now),
        &paths.path_for(ArchiveKind::Response, topic, now),
    );
}

fn show_archive(output: &Output, conversation: &Conversation, topic: &str, kind: ArchiveKind) {
    let path = conversation
        .paths()
        .path_for(kind, topic, Local::now().naive_local());

    match conversation.store().read_all(&path) {
        Ok(Some(content)) => {
            output.archive_info(&path, content.lines().count());
            output.archive_content(&content);
        }
        Ok(None) => output.info(&format!("No {} archive yet: {}", kind, path.display())),
        Err(e) => output.warning(&format!("{:#}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_message() {
        assert_eq!(
            parse_command("  سلام دنیا "),
            ChatCommand::Message("سلام دنیا".to_string())
        );
        assert_eq!(parse_command(""), ChatCommand::Message(String::new()));
    }

    #[test]
    fn test_slash_commands() {
        assert_eq!(
            parse_command("/topic  team sync "),
            ChatCommand::Topic("team sync".to_string())
        );
        assert_eq!(parse_command("/topic"), ChatCommand::Topic(String::new()));
        assert_eq!(parse_command("/multi"), ChatCommand::Multi);
        assert_eq!(parse_command("/files"), ChatCommand::Files);
        assert_eq!(parse_command("/history"), ChatCommand::History);
        assert_eq!(parse_command("/responses"), ChatCommand::Responses);
        assert_eq!(parse_command("/clear"), ChatCommand::Clear);
        assert_eq!(parse_command("/exit"), ChatCommand::Quit);
        assert_eq!(
            parse_command("/nope x"),
            ChatCommand::Unknown("nope".to_string())
        );
    }
}
