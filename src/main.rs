use std::future::Future;
use std::io;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod api;
mod commands;
mod config;
mod models;
mod services;
mod ui;
mod utils;

use api::binance::BinanceClient;
use commands::SiteContext;
use config::SiteConfig;
use services::pricing_service::Calculator;
use services::ticker_service;
use ui::DealBoard;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("tradeblade=debug,reqwest=warn,hyper=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("🗡️ Starting TradeBlade site runtime...");

    let config = match SiteConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return;
        }
    };
    let feed = Arc::new(BinanceClient::with_base_url(config.feed_url.clone()));
    info!("Price feed: {}", feed.base_url());
    let board = Arc::new(DealBoard::new(&config.symbols));
    info!("Deal cards: {}", board.pairs().join(", "));

    tokio::spawn(ticker_service::run_ticker(
        feed,
        board.clone(),
        config.symbols.clone(),
        config.refresh_interval,
    ));

    let mut ctx = SiteContext::new(board, Calculator::new(config.price_table));
    info!("Ready. Type $help for the list of interactions.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line {
                Ok(Some(line)) => {
                    if let Some(output) = commands::handle_event(&mut ctx, &line) {
                        if !output.is_empty() {
                            println!("{}", output);
                        }
                    }
                }
                Ok(None) => {
                    info!("Input closed, ticker keeps running until Ctrl+C");
                    wait_for_interrupt(tokio::signal::ctrl_c()).await;
                    break;
                }
                Err(e) => {
                    warn!("Failed to read input: {}", e);
                    break;
                }
            },
            _ = wait_for_interrupt(tokio::signal::ctrl_c()) => break,
        }
    }
}

/// Wait for Ctrl+C; returns false if the listener could not be installed
async fn wait_for_interrupt<F>(signal: F) -> bool
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => {
            info!("Interrupted, shutting down");
            true
        }
        Err(e) => {
            warn!("Could not listen for Ctrl+C, stopping: {}", e);
            false
        }
    }
}
