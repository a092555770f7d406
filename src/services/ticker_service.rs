use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinSet;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::api::binance::ApiError;
use crate::models::PriceQuote;

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Source of 24h statistics for one instrument
#[async_trait]
pub trait PriceFeed: Send + Sync {
    async fn fetch_quote(&self, symbol: &str) -> Result<PriceQuote, ApiError>;
}

/// Where fetched quotes are rendered; returns false if nothing shows `quote.symbol`
///
/// `refresh_once` always sets `quote.symbol` to the pair its task requested.
pub trait QuoteDisplay: Send + Sync {
    fn render_quote(&self, quote: &PriceQuote) -> bool;
}

/// Outcome of one refresh pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshSummary {
    pub updated: usize,
    pub failed: usize,
}

/// Fetch and render every symbol once
///
/// Each symbol gets its own task so a slow or failing instrument never holds
/// up or skips the others. Failures are logged and leave that card as it was.
pub async fn refresh_once(
    feed: Arc<dyn PriceFeed>,
    display: Arc<dyn QuoteDisplay>,
    symbols: &[String],
) -> RefreshSummary {
    let mut tasks = JoinSet::new();

    for symbol in symbols {
        let feed = Arc::clone(&feed);
        let display = Arc::clone(&display);
        let symbol = symbol.clone();

        tasks.spawn(async move {
            match feed.fetch_quote(&symbol).await {
                Ok(mut quote) => {
                    // the card is picked by the pair this task asked for
                    quote.symbol = symbol.clone();
                    debug!("{} {} ({})", symbol, quote.formatted_change(), quote.last_price);
                    display.render_quote(&quote)
                }
                Err(e) => {
                    warn!("Failed to refresh {}: {}", symbol, e);
                    false
                }
            }
        });
    }

    let mut summary = RefreshSummary::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(true) => summary.updated += 1,
            Ok(false) => summary.failed += 1,
            Err(e) => {
                error!("Refresh task crashed: {}", e);
                summary.failed += 1;
            }
        }
    }

    summary
}

/// Refresh now, then every `every` for as long as the process runs
///
/// Ticks do not wait for the previous pass: a slow response may land after a
/// newer one and the last write to a card wins.
pub async fn run_ticker(
    feed: Arc<dyn PriceFeed>,
    display: Arc<dyn QuoteDisplay>,
    symbols: Vec<String>,
    every: Duration,
) {
    info!(
        "Deals ticker tracking {} pair(s), refreshing every {}s",
        symbols.len(),
        every.as_secs()
    );

    let symbols: Arc<[String]> = symbols.into();
    let mut tick = time::interval(every);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tick.tick().await;

        let feed = Arc::clone(&feed);
        let display = Arc::clone(&display);
        let symbols = Arc::clone(&symbols);
        tokio::spawn(async move {
            let summary = refresh_once(feed, display, &symbols).await;
            debug!(
                "Ticker pass done: {} updated, {} failed",
                summary.updated, summary.failed
            );
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::Utc;

    use crate::ui::DealBoard;

    /// Fixed per-symbol changes; symbols not listed fail with a request error
    struct FakeFeed {
        changes: HashMap<String, f64>,
        answer_as: Option<String>,
        calls: AtomicUsize,
    }

    impl FakeFeed {
        fn new(changes: &[(&str, f64)]) -> Self {
            Self {
                changes: changes.iter().map(|(s, c)| (s.to_string(), *c)).collect(),
                answer_as: None,
                calls: AtomicUsize::new(0),
            }
        }

        /// Label every quote with `symbol` whatever was requested
        fn answering_as(mut self, symbol: &str) -> Self {
            self.answer_as = Some(symbol.to_string());
            self
        }
    }

    #[async_trait]
    impl PriceFeed for FakeFeed {
        async fn fetch_quote(&self, symbol: &str) -> Result<PriceQuote, ApiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let change_percent = *self
                .changes
                .get(symbol)
                .ok_or_else(|| ApiError::RequestError("connection reset".to_string()))?;

            Ok(PriceQuote {
                symbol: self.answer_as.clone().unwrap_or_else(|| symbol.to_string()),
                last_price: 1.0,
                change_percent,
                high_24h: 1.1,
                low_24h: 0.9,
                fetched_at: Utc::now(),
            })
        }
    }

    fn symbols(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn refresh_renders_every_symbol() {
        let feed = Arc::new(FakeFeed::new(&[("BTCUSDT", -1.2345), ("ETHUSDT", 0.5)]));
        let board = Arc::new(DealBoard::new(&["BTCUSDT", "ETHUSDT"]));

        let summary = refresh_once(feed, board.clone(), &symbols(&["BTCUSDT", "ETHUSDT"])).await;

        assert_eq!(summary, RefreshSummary { updated: 2, failed: 0 });
        assert_eq!(board.card("BTCUSDT").expect("card").profit_text, "-1.2345%");
        assert_eq!(board.card("ETHUSDT").expect("card").profit_text, "+0.5000%");
    }

    #[tokio::test]
    async fn failed_symbol_leaves_others_and_itself_untouched() {
        let board = Arc::new(DealBoard::new(&["BTCUSDT", "ETHUSDT"]));
        let first = Arc::new(FakeFeed::new(&[("BTCUSDT", 1.0), ("ETHUSDT", 2.0)]));
        refresh_once(first, board.clone(), &symbols(&["BTCUSDT", "ETHUSDT"])).await;

        // ETH now fails; BTC moves
        let second = Arc::new(FakeFeed::new(&[("BTCUSDT", -3.0)]));
        let summary = refresh_once(second, board.clone(), &symbols(&["BTCUSDT", "ETHUSDT"])).await;

        assert_eq!(summary, RefreshSummary { updated: 1, failed: 1 });
        assert_eq!(board.card("BTCUSDT").expect("card").profit_text, "-3.0000%");
        assert_eq!(board.card("ETHUSDT").expect("card").profit_text, "+2.0000%");
    }

    #[tokio::test]
    async fn quote_without_card_counts_as_not_updated() {
        let feed = Arc::new(FakeFeed::new(&[("SOLUSDT", 4.0)]));
        let board = Arc::new(DealBoard::new(&["BTCUSDT"]));

        let summary = refresh_once(feed, board, &symbols(&["SOLUSDT"])).await;
        assert_eq!(summary, RefreshSummary { updated: 0, failed: 1 });
    }

    #[tokio::test]
    async fn quote_only_lands_on_the_requested_card() {
        let feed = Arc::new(FakeFeed::new(&[("BTCUSDT", -9.0)]).answering_as("ETHUSDT"));
        let board = Arc::new(DealBoard::new(&["BTCUSDT", "ETHUSDT"]));

        let summary = refresh_once(feed, board.clone(), &symbols(&["BTCUSDT"])).await;

        assert_eq!(summary, RefreshSummary { updated: 1, failed: 0 });
        assert_eq!(board.card("BTCUSDT").expect("card").profit_text, "-9.0000%");
        assert!(!board.card("ETHUSDT").expect("card").is_loaded());
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_refreshes_at_start_and_every_interval() {
        let feed = Arc::new(FakeFeed::new(&[("BTCUSDT", 0.1), ("ETHUSDT", 0.2)]));
        let board = Arc::new(DealBoard::new(&["BTCUSDT", "ETHUSDT"]));

        let handle = tokio::spawn(run_ticker(
            feed.clone(),
            board.clone(),
            symbols(&["BTCUSDT", "ETHUSDT"]),
            DEFAULT_REFRESH_INTERVAL,
        ));

        time::sleep(Duration::from_secs(1)).await;
        assert_eq!(feed.calls.load(Ordering::SeqCst), 2);
        assert!(board.card("BTCUSDT").expect("card").is_loaded());

        time::sleep(Duration::from_secs(30)).await;
        assert_eq!(feed.calls.load(Ordering::SeqCst), 4);

        time::sleep(Duration::from_secs(60)).await;
        assert_eq!(feed.calls.load(Ordering::SeqCst), 8);

        handle.abort();
    }
}
