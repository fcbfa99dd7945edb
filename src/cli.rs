use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "chatbox")]
#[command(about = "Keyword chat assistant with plain-text archives and web search", long_about = None)]
pub struct Cli {
    /// Print debug logs to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 作用域标志
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct ScopeArgs {
    /// Use local configuration (./.chatbox)
    #[arg(short, long)]
    pub local: bool,

    /// Use global configuration (~/.chatbox)
    #[arg(short, long)]
    pub global: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Write default config.toml and rules.toml")]
    Init {
        /// Initialize in local directory (./.chatbox) instead of global (~/.chatbox)
        #[arg(short, long)]
        local: bool,
    },

    #[command(about = "Start an interactive chat session")]
    Chat {
        /// Conversation topic (defaults to default_topic from config)
        #[arg(short, long)]
        topic: Option<String>,

        #[command(flatten)]
        scope: ScopeArgs,
    },

    #[command(about = "Send a single message and print the reply")]
    Send {
        message: String,

        #[arg(short, long)]
        topic: Option<String>,

        #[command(flatten)]
        scope: ScopeArgs,
    },

    #[command(about = "Show an archive file for a topic")]
    Show {
        #[arg(short, long)]
        topic: Option<String>,

        /// Show the response archive instead of the user message archive
        #[arg(short, long)]
        responses: bool,

        /// Archive minute to show (format: "YYYY-MM-DD HH:MM", default: now)
        #[arg(long)]
        at: Option<String>,

        #[command(flatten)]
        scope: ScopeArgs,
    },

    #[command(about = "Preview the archive filenames for a topic")]
    Files {
        #[arg(short, long)]
        topic: Option<String>,

        #[command(flatten)]
        scope: ScopeArgs,
    },

    #[command(about = "Create and print the archive folders")]
    Folders {
        #[command(flatten)]
        scope: ScopeArgs,
    },

    #[command(about = "List archive files, newest first")]
    List {
        #[command(flatten)]
        scope: ScopeArgs,
    },

    #[command(about = "Search the web and save the results")]
    Search {
        query: String,

        #[arg(short = 'n', long, default_value = "3")]
        limit: usize,

        #[command(flatten)]
        scope: ScopeArgs,
    },

    #[command(about = "Show cached search results")]
    Results {
        /// Only show results for this exact query
        query: Option<String>,

        /// Print the raw JSON mapping
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        scope: ScopeArgs,
    },

    #[command(about = "Clear all cached search results")]
    ClearResults {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,

        #[command(flatten)]
        scope: ScopeArgs,
    },
}
