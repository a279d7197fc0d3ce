//! nft-minter: the public-mint page in a terminal.
//!
//! ```text
//!   stdin commands ──▶ MintPage::dispatch ──▶ wallet / chain
//!                            │
//!                            ▼
//!                         UiState ──▶ view::render ──▶ stdout
//! ```
//!
//! The wallet key comes from the environment variable named in the config
//! (`MINTER_PRIVATE_KEY` by default).

use alloy::primitives::utils::format_ether;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use nft_minter::blockchain::{ApprovalPrompt, AutoApprove, ConsolePrompt, EnvWalletConnector};
use nft_minter::config::{load_config, validation::validate_config, ConfigError, MinterConfig};
use nft_minter::console;
use nft_minter::lifecycle::signals;
use nft_minter::observability::{logging, metrics};
use nft_minter::page::{view, ViewState};
use nft_minter::{Intent, MintPage};

const DEFAULT_CONFIG_PATH: &str = "minter.toml";

#[derive(Parser)]
#[command(name = "nft-minter")]
#[command(about = "Connect a wallet, watch the minted count, and mint", long_about = None)]
struct Cli {
    /// Config file (defaults to ./minter.toml when present).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Approve wallet prompts without asking.
    #[arg(short, long)]
    yes: bool,

    /// Print the view state as JSON instead of text.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy)]
enum Commands {
    /// Interactive page (default)
    Run,
    /// Connect, read the minted count once, and exit
    Status,
    /// Connect, mint one token, and exit
    Mint,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = read_config(cli.config.as_deref())?;

    logging::init_logging(&config.observability.log_level);
    tracing::info!(
        rpc_url = %config.network.rpc_url,
        chain_id = config.network.required_chain_id,
        contract = %config.contract.address,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let prompt: Arc<dyn ApprovalPrompt> = if cli.yes || config.wallet.auto_approve {
        Arc::new(AutoApprove)
    } else {
        Arc::new(ConsolePrompt)
    };
    let connector = Arc::new(EnvWalletConnector::new(
        config.wallet.clone(),
        config.network.clone(),
        prompt,
    ));
    let page = MintPage::new(&config, connector)?;

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_interactive(&page, cli.json).await,
        Commands::Status => {
            page.connect().await;
            let wait = Duration::from_secs(config.network.rpc_timeout_secs.saturating_add(1));
            wait_for_count(&page, wait).await;
            print_view(&page.view(), cli.json, true);
        }
        Commands::Mint => {
            page.connect().await;
            page.mint().await;
            print_view(&page.view(), cli.json, true);
        }
    }

    page.teardown().await;
    tracing::info!("Shutdown complete");
    Ok(())
}

fn read_config(path: Option<&Path>) -> Result<MinterConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(Path::new(DEFAULT_CONFIG_PATH)),
        None => {
            let config = MinterConfig::default();
            validate_config(&config).map_err(ConfigError::Validation)?;
            Ok(config)
        }
    }
}

async fn run_interactive(page: &MintPage, json: bool) {
    let mut updates = page.state().subscribe();
    let renderer = tokio::spawn(async move {
        let mut alerted: Option<String> = None;
        loop {
            let state = updates.borrow_and_update().clone();
            let alert = view::fresh_notice(&state, alerted.as_deref()).is_some();
            alerted = state.notice.clone();
            print_view(&state, json, alert);
            if updates.changed().await.is_err() {
                break;
            }
        }
    });

    println!(
        "Mint price: {} | Commands: <enter>/press, connect, mint, quit",
        format_ether(page.mint_price())
    );

    loop {
        let line = tokio::select! {
            line = console::read_line() => line,
            _ = signals::ctrl_c() => break,
        };
        let Some(line) = line else { break };

        let action = match line.trim() {
            "" | "press" => None,
            "connect" => Some(Intent::Connect),
            "mint" => Some(Intent::Mint),
            "quit" | "exit" | "q" => break,
            other => {
                eprintln!("Unknown command '{}'", other);
                continue;
            }
        };

        tokio::select! {
            _ = async {
                match action {
                    Some(intent) => page.dispatch(intent).await,
                    None => page.press().await,
                }
            } => {}
            _ = signals::ctrl_c() => break,
        }
    }

    renderer.abort();
}

async fn wait_for_count(page: &MintPage, wait: Duration) {
    let mut updates = page.state().subscribe();
    let ready = updates.wait_for(|s| s.minted.is_some() || !s.session.connected);
    if tokio::time::timeout(wait, ready).await.is_err() {
        tracing::warn!("Timed out waiting for the minted count");
    }
}

/// Print the page; `alert` rings the bell for a notice not shown before.
fn print_view(state: &ViewState, json: bool, alert: bool) {
    if json {
        match serde_json::to_string(state) {
            Ok(text) => println!("{}", text),
            Err(e) => tracing::error!(error = %e, "Failed to serialize view state"),
        }
        return;
    }

    if let Some(notice) = state.notice.as_deref().filter(|_| alert) {
        eprintln!("\x07ALERT: {}", notice);
    }
    println!("{}\n", view::render(state));
}
