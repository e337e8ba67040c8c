use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod context;
mod db;
mod models;
mod services;
mod utils;

use api::wallet::{JsonRpcWallet, WalletProvider};
use config::Config;
use context::AppContext;
use services::session_service;

async fn print(line: &str) {
    let mut stdout = tokio::io::stdout();
    let mut output = String::with_capacity(line.len() + 1);
    output.push_str(line);
    output.push('\n');

    if let Err(e) = stdout.write_all(output.as_bytes()).await {
        warn!("Failed to write to stdout: {}", e);
        return;
    }
    if let Err(e) = stdout.flush().await {
        warn!("Failed to flush stdout: {}", e);
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env()
            .add_directive("payfi_hub=debug".parse().unwrap())
            .add_directive("sqlx=warn".parse().unwrap()))
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("💸 Starting PayFi Hub...");
    info!("  ____             _____ _   _   _       _     ");
    info!(" |  _ \\ __ _ _   _|  ___(_) | | | |_   _| |__  ");
    info!(" | |_) / _` | | | | |_  | | | |_| | | | | '_ \\ ");
    info!(" |  __/ (_| | |_| |  _| | | |  _  | |_| | |_) |");
    info!(" |_|   \\__,_|\\__, |_|   |_| |_| |_|\\__,_|_.__/ ");
    info!("             |___/                             ");
    info!("  PayFi Hub v{} - peer payments on Shardeum", env!("CARGO_PKG_VERSION"));
    info!("");

    let config = Config::from_env();
    info!("Target network: {} (chain {})", config.chain.name, config.chain.chain_id);

    // Initialize database
    info!("Initializing database...");
    let pool = match db::init_db(&config.database_url).await {
        Ok(p) => {
            info!("Database initialized successfully");
            p
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return;
        }
    };

    let provider: Option<Arc<dyn WalletProvider>> = match &config.wallet_rpc_url {
        Some(url) => {
            info!("Using wallet provider at {}", url);
            let wallet = Arc::new(JsonRpcWallet::new(
                url.clone(),
                Duration::from_millis(config.receipt_poll_ms),
            ));
            wallet.spawn_watcher(Duration::from_millis(config.watch_interval_ms));
            let wallet: Arc<dyn WalletProvider> = wallet;
            Some(wallet)
        }
        None => {
            warn!("PAYFI_WALLET_RPC_URL is empty, payments are disabled");
            None
        }
    };

    let mut ctx = AppContext::new(config, pool, provider);
    let mut events = ctx.subscribe();

    match session_service::restore(&mut ctx.session, ctx.provider.as_ref(), &ctx.config.chain).await {
        Ok(Some(address)) => print(&format!("Reconnected as {}", address.short())).await,
        Ok(None) => debug!("No previously authorized account"),
        Err(e) => warn!("Could not restore wallet session: {}", e),
    }

    print(&commands::help::text(&ctx.config)).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        error!("Failed to read input: {}", e);
                        break;
                    }
                };

                let trimmed = line.trim();
                if trimmed.eq_ignore_ascii_case("quit") || trimmed.eq_ignore_ascii_case("exit") {
                    break;
                }

                if let Some(output) = commands::handle_line(&mut ctx, trimmed).await {
                    print(&output).await;
                }
            }
            event = events.recv() => {
                match event {
                    Ok(event) => {
                        debug!("Provider event: {:?}", event);
                        if let Some(status) = ctx.apply_event(&event) {
                            print(&format!("🔔 {}", status)).await;
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => warn!("Missed {} wallet event(s)", skipped),
                    Err(RecvError::Closed) => {
                        warn!("Wallet event channel closed");
                        events = ctx.subscribe();
                    }
                }
            }
        }
    }

    info!("Goodbye");
}
