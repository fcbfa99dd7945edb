mod archive;
mod cli;
mod config;
mod conversation;
mod responder;
mod service;
mod ui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;
use ui::Output;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        Output::new().error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// 日志写到 stderr；RUST_LOG 优先，其次 -v
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init { local } => service::init::initialize(local)?,
        Commands::Chat { topic, scope } => {
            service::chat::chat(topic, scope.local, scope.global).await?
        }
        Commands::Send {
            message,
            topic,
            scope,
        } => service::send::send(&message, topic, scope.local, scope.global).await?,
        Commands::Show {
            topic,
            responses,
            at,
            scope,
        } => service::show::show(topic, responses, at, scope.local, scope.global)?,
        Commands::Files { topic, scope } => {
            service::files::files(topic, scope.local, scope.global)?
        }
        Commands::Folders { scope } => service::folders::folders(scope.local, scope.global)?,
        Commands::List { scope } => service::list::list(scope.local, scope.global)?,
        Commands::Search {
            query,
            limit,
            scope,
        } => service::search::search(&query, limit, scope.local, scope.global).await?,
        Commands::Results { query, json, scope } => {
            service::results::results(query, json, scope.local, scope.global)?
        }
        Commands::ClearResults { force, scope } => {
            service::clear_results::clear_results(scope.local, scope.global, force)?
        }
    }

    Ok(())
}
