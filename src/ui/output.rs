use chatbox_types::{ConversationTurn, Role, SearchRecord, LINE_TIMESTAMP_FORMAT};
use console::Style;
use std::io::{self, Write};
use std::path::Path;

/// 命令行输出格式化工具
/// 提供统一的 Cargo 风格输出；状态信息走 stderr，对话和结果走 stdout
pub struct Output {
    green: Style,
    cyan: Style,
    bold: Style,
    dim: Style,
}

impl Output {
    pub fn new() -> Self {
        Self {
            green: Style::new().green().bold(),
            cyan: Style::new().cyan(),
            bold: Style::new().bold(),
            dim: Style::new().dim(),
        }
    }

    /// 显示状态消息（如 "Searching web"）
    /// 格式: "   Searching web"（动词右对齐到 12 字符）
    pub fn status(&self, action: &str, target: &str) {
        eprintln!("{:>12} {}", self.green.apply_to(action), target);
    }

    /// 开始执行操作的状态消息（会在前面自动添加空行）
    pub fn begin_operation(&self, action: &str, target: &str) {
        eprintln!();
        eprintln!("{:>12} {}", self.green.apply_to(action), target);
    }

    /// 显示创建/查找资源消息
    /// 格式: "    Creating config at /path/to/config"
    pub fn resource_action(&self, action: &str, resource: &str, path: &Path) {
        eprintln!(
            "{:>12} {} at {}",
            self.green.apply_to(action),
            resource,
            path.display()
        );
    }

    /// 显示归档文件信息
    /// 格式: "     Archive /path/to/chat_...txt (12 lines)"
    pub fn archive_info(&self, path: &Path, line_count: usize) {
        eprintln!(
            "{:>12} {} {}",
            self.green.apply_to("Archive"),
            path.display(),
            self.dim.apply_to(format!("({} lines)", line_count))
        );
        eprintln!();
    }

    /// 显示缓存信息
    pub fn cache_info(&self, path: &Path, queries: usize, records: usize) {
        eprintln!(
            "{:>12} {} {}",
            self.green.apply_to("Cache"),
            path.display(),
            self.dim
                .apply_to(format!("({} queries, {} records)", queries, records))
        );
        eprintln!();
    }

    /// 显示完成消息
    /// 格式: "    Finished action for scope"
    pub fn finish(&self, action: &str, scope: &str) {
        eprintln!();
        eprintln!(
            "{:>12} {} for {} scope",
            self.green.apply_to("Finished"),
            action,
            scope
        );
    }

    /// 显示当前话题对应的两个归档文件名
    pub fn filenames(&self, topic: &str, chat: &Path, response: &Path) {
        eprintln!("{:>12} {}", self.green.apply_to("Topic"), topic);
        eprintln!("{:>12} {}", self.dim.apply_to("chat"), chat.display());
        eprintln!("{:>12} {}", self.dim.apply_to("response"), response.display());
    }

    /// 显示一条对话消息
    /// 格式: "[2024-05-01 09:30:12] شما: ..." / "[2024-05-01 09:30:12] ربات: ..."
    pub fn message(&self, turn: &ConversationTurn) {
        let stamp = format!("[{}]", turn.timestamp.format(LINE_TIMESTAMP_FORMAT));
        let (label, style) = match turn.role {
            Role::User => ("شما", &self.bold),
            Role::Bot => ("ربات", &self.cyan),
        };
        println!(
            "{} {}",
            self.dim.apply_to(stamp),
            style.apply_to(format!("{}: {}", label, turn.text))
        );
    }

    /// 显示搜索记录列表
    /// 格式: "[1/3] Title"
    ///       "      https://..."
    ///       "      description"
    pub fn search_records(&self, records: &[SearchRecord]) {
        let total = records.len();
        for (i, record) in records.iter().enumerate() {
            let index_part = format!("{}/{}", i + 1, total);
            println!(
                "[{}] {}",
                self.dim.apply_to(&index_part),
                self.bold.apply_to(&record.title)
            );

            let indent = " ".repeat(index_part.len() + 3);
            println!("{}{}", indent, self.cyan.apply_to(&record.url));
            if !record.description.is_empty() {
                println!("{}{}", indent, record.description);
            }
            if !record.search_time.is_empty() {
                println!("{}{}", indent, self.dim.apply_to(&record.search_time));
            }

            // 只在非最后一个结果后添加空行分隔
            if i < total - 1 {
                println!();
            }
        }
    }

    /// 原样输出归档内容
    pub fn archive_content(&self, content: &str) {
        print!("{}", content);
        if !content.ends_with('\n') {
            println!();
        }
    }

    /// 显示注意事项（右对齐）
    pub fn note(&self, message: &str) {
        eprintln!("{:>12} {}", self.dim.apply_to("Note"), message);
    }

    /// 显示警告（黄色，右对齐）
    pub fn warning(&self, message: &str) {
        eprintln!(
            "{:>12} {}",
            Style::new().yellow().bold().apply_to("Warning"),
            message
        );
    }

    /// 显示错误（红色，右对齐）
    pub fn error(&self, message: &str) {
        eprintln!(
            "{:>12} {}",
            Style::new().red().bold().apply_to("Error"),
            message
        );
    }

    /// 显示提示消息（标准输出，右对齐）
    pub fn info(&self, message: &str) {
        println!("{:>12} {}", "", message);
    }

    /// 显示确认提示并读取用户输入
    /// 返回用户是否输入了期望的文本
    pub fn confirm(&self, expected: &str) -> io::Result<bool> {
        println!();
        print!(
            "{:>12} Type {} to confirm: ",
            "",
            Style::new().green().bold().apply_to(expected)
        );
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        Ok(input.trim() == expected)
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
