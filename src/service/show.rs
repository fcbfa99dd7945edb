use anyhow::{Context, Result};
use chatbox_types::ArchiveKind;
use chrono::{Local, NaiveDateTime};

use crate::archive::ArchiveStore;
use crate::config::AppConfig;
use crate::ui::Output;

const AT_FORMAT: &str = "%Y-%m-%d %H:%M";

/// 显示某个话题在某一分钟的归档文件
pub fn show(
    topic: Option<String>,
    responses: bool,
    at: Option<String>,
    force_local: bool,
    force_global: bool,
) -> Result<()> {
    let output = Output::new();
    let config = AppConfig::load_with_scope(force_local, force_global)?;
    let topic = super::resolve_topic(topic, &config);

    let when = match at {
        Some(text) => parse_minute(&text)?,
        None => Local::now().naive_local(),
    };

    let kind = if responses {
        ArchiveKind::Response
    } else {
        ArchiveKind::Chat
    };
    let path = super::archive_paths(&config).path_for(kind, &topic, when);

    match ArchiveStore::new().read_all(&path)? {
        Some(content) => {
            output.archive_info(&path, content.lines().count());
            output.archive_content(&content);
        }
        None => {
            output.info(&format!("No {} archive yet: {}", kind, path.display()));
        }
    }

    Ok(())
}

/// 解析 "YYYY-MM-DD HH:MM"
fn parse_minute(text: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text.trim(), AT_FORMAT).with_context(|| {
        format!(
            "Invalid --at value '{}', expected format: YYYY-MM-DD HH:MM",
            text
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_minute() {
        let expected = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        assert_eq!(parse_minute("2024-05-01 09:30").unwrap(), expected);
        assert_eq!(parse_minute(" 2024-05-01 09:30 ").unwrap(), expected);
    }

    #[test]
    fn test_parse_minute_rejects_other_formats() {
        assert!(parse_minute("2024-05-01").is_err());
        assert!(parse_minute("09:30").is_err());
        assert!(parse_minute("2024/05/01 09:30").is_err());
    }
}
