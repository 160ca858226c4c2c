mod check;
mod snapshot;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use pricewatch_core::HistoryStore;
use pricewatch_scraper::ListingClient;
use pricewatch_telegram::TelegramClient;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pricewatch")]
#[command(about = "Report price and promotion changes in a store category")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the listing, notify about changes, and update the snapshot (default)
    Check {
        /// Print the notification instead of sending it and leave the snapshot untouched
        #[arg(long)]
        dry_run: bool,

        /// Use this history file instead of PRICEWATCH_HISTORY_PATH
        #[arg(long)]
        history: Option<PathBuf>,
    },
    /// Print the stored price snapshot
    History {
        /// Use this history file instead of PRICEWATCH_HISTORY_PATH
        #[arg(long)]
        history: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    match cli.command.unwrap_or(Commands::Check {
        dry_run: false,
        history: None,
    }) {
        Commands::Check { dry_run, history } => run_check_command(dry_run, history).await,
        Commands::History { history } => {
            init_tracing("warn")?;
            let path = history.unwrap_or_else(pricewatch_core::load_history_path);
            snapshot::run_show_history(&HistoryStore::new(path))
        }
    }
}

async fn run_check_command(dry_run: bool, history: Option<PathBuf>) -> anyhow::Result<()> {
    let mut config = pricewatch_core::load_app_config()?;
    if let Some(path) = history {
        config.history_path = path;
    }
    init_tracing(&config.log_level)?;
    tracing::debug!(?config, "configuration loaded");

    let source = ListingClient::from_config(&config).context("failed to build listing client")?;
    let notifier = TelegramClient::with_base_url(
        &config.telegram_token,
        &config.telegram_chat_id,
        config.request_timeout_secs,
        &config.telegram_api_base,
    )
    .context("failed to build Telegram client")?;
    let store = HistoryStore::new(&config.history_path);

    let summary = check::run_check(&config, &source, &notifier, &store, dry_run).await?;
    tracing::info!(
        category = %config.category,
        products = summary.products,
        events = summary.events,
        notified = summary.notified,
        saved = summary.saved,
        "price check finished"
    );
    Ok(())
}

/// `RUST_LOG` wins; otherwise `default_level` applies.
fn init_tracing(default_level: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    Ok(())
}
