use std::time::Duration;

use crate::api::binance::BinanceClient;
use crate::models::PriceTable;
use crate::services::ticker_service::DEFAULT_REFRESH_INTERVAL;
use crate::utils::SiteError;

pub const DEFAULT_SYMBOLS: [&str; 6] = ["BTCUSDT", "ETHUSDT", "BNBUSDT", "SOLUSDT", "XRPUSDT", "DOGEUSDT"];

/// Runtime settings, read from the environment (and `.env`) at startup
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub feed_url: String,
    pub symbols: Vec<String>,
    pub refresh_interval: Duration,
    pub price_table: PriceTable,
}

impl SiteConfig {
    pub fn from_env() -> Result<Self, SiteError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup
    ///
    /// Keys: `TRADEBLADE_FEED_URL`, `TRADEBLADE_SYMBOLS` (comma separated),
    /// `TRADEBLADE_REFRESH_SECS`, `TRADEBLADE_PRICE_TABLE` (path to JSON).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SiteError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let feed_url = get("TRADEBLADE_FEED_URL").unwrap_or_else(|| BinanceClient::DEFAULT_BASE_URL.to_string());
        if !feed_url.starts_with("http://") && !feed_url.starts_with("https://") {
            return Err(SiteError::Config(format!("TRADEBLADE_FEED_URL must be an http(s) URL, got {}", feed_url)));
        }

        let symbols = match get("TRADEBLADE_SYMBOLS") {
            Some(raw) => parse_symbols(&raw)?,
            None => DEFAULT_SYMBOLS.iter().map(|s| s.to_string()).collect(),
        };

        let refresh_interval = match get("TRADEBLADE_REFRESH_SECS") {
            Some(raw) => {
                let secs: u64 = raw
                    .parse()
                    .map_err(|_| SiteError::Config(format!("TRADEBLADE_REFRESH_SECS is not a number: {}", raw)))?;
                if secs == 0 {
                    return Err(SiteError::Config("TRADEBLADE_REFRESH_SECS must be greater than 0".to_string()));
                }
                Duration::from_secs(secs)
            }
            None => DEFAULT_REFRESH_INTERVAL,
        };

        let price_table = match get("TRADEBLADE_PRICE_TABLE") {
            Some(path) => {
                let json = std::fs::read_to_string(&path)
                    .map_err(|e| SiteError::Config(format!("Failed to read {}: {}", path, e)))?;
                PriceTable::from_json_str(&json)?
            }
            None => PriceTable::default(),
        };

        Ok(Self {
            feed_url,
            symbols,
            refresh_interval,
            price_table,
        })
    }
}

/// Split, upper-case and de-duplicate a symbol list, keeping its order
fn parse_symbols(raw: &str) -> Result<Vec<String>, SiteError> {
    let mut symbols: Vec<String> = Vec::new();

    for symbol in raw.split(',').map(|s| s.trim().to_uppercase()).filter(|s| !s.is_empty()) {
        if !symbol.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(SiteError::Config(format!("Invalid symbol: {}", symbol)));
        }
        if !symbols.contains(&symbol) {
            symbols.push(symbol);
        }
    }

    if symbols.is_empty() {
        return Err(SiteError::Config("TRADEBLADE_SYMBOLS lists no symbols".to_string()));
    }
    Ok(symbols)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use crate::models::Plan;

    fn config(pairs: &[(&str, &str)]) -> Result<SiteConfig, SiteError> {
        let vars: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        SiteConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let cfg = config(&[]).expect("defaults");
        assert_eq!(cfg.feed_url, "https://api.binance.com/api/v3");
        assert_eq!(cfg.symbols.len(), 6);
        assert_eq!(cfg.symbols[0], "BTCUSDT");
        assert_eq!(cfg.refresh_interval, Duration::from_secs(30));
        assert_eq!(cfg.price_table.lookup(Plan::Vip, 1), Some(75));
    }

    #[test]
    fn reads_overrides() {
        let cfg = config(&[
            ("TRADEBLADE_FEED_URL", "http://localhost:8080/api/v3"),
            ("TRADEBLADE_SYMBOLS", " ethusdt, BTCUSDT,,ethusdt "),
            ("TRADEBLADE_REFRESH_SECS", "5"),
        ])
        .expect("config");

        assert_eq!(cfg.feed_url, "http://localhost:8080/api/v3");
        assert_eq!(cfg.symbols, vec!["ETHUSDT".to_string(), "BTCUSDT".to_string()]);
        assert_eq!(cfg.refresh_interval, Duration::from_secs(5));
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let cfg = config(&[("TRADEBLADE_SYMBOLS", "  "), ("TRADEBLADE_REFRESH_SECS", "")]).expect("config");
        assert_eq!(cfg.symbols.len(), 6);
        assert_eq!(cfg.refresh_interval, DEFAULT_REFRESH_INTERVAL);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(config(&[("TRADEBLADE_REFRESH_SECS", "0")]).is_err());
        assert!(config(&[("TRADEBLADE_REFRESH_SECS", "soon")]).is_err());
        assert!(config(&[("TRADEBLADE_SYMBOLS", "BTC/USDT")]).is_err());
        assert!(config(&[("TRADEBLADE_SYMBOLS", ",,")]).is_err());
        assert!(config(&[("TRADEBLADE_FEED_URL", "api.binance.com")]).is_err());
        assert!(config(&[("TRADEBLADE_PRICE_TABLE", "/nonexistent/prices.json")]).is_err());
    }

    #[test]
    fn loads_price_table_file() {
        let path = std::env::temp_dir().join(format!("tradeblade-prices-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"standart": {"1": 40, "12": 250}}"#).expect("write table");

        let cfg = config(&[("TRADEBLADE_PRICE_TABLE", path.to_str().expect("utf-8 path"))]).expect("config");
        let _ = std::fs::remove_file(&path);

        assert_eq!(cfg.price_table.lookup(Plan::Standart, 12), Some(250));
        assert_eq!(cfg.price_table.lookup(Plan::Vip, 12), None);
    }
}
