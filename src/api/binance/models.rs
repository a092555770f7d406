use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::models::PriceQuote;

/// Response from GET /ticker/24hr for a single symbol
///
/// Binance sends every decimal as a string; unused fields are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticker24hrResponse {
    #[serde(default)]
    pub symbol: String,
    pub last_price: String,
    pub price_change_percent: String,
    pub high_price: String,
    pub low_price: String,
}

impl Ticker24hrResponse {
    /// Parse the numeric strings into a quote stamped with `fetched_at`
    pub fn into_quote(self, fetched_at: DateTime<Utc>) -> Result<PriceQuote, ApiError> {
        Ok(PriceQuote {
            last_price: parse_decimal("lastPrice", &self.last_price)?,
            change_percent: parse_decimal("priceChangePercent", &self.price_change_percent)?,
            high_24h: parse_decimal("highPrice", &self.high_price)?,
            low_24h: parse_decimal("lowPrice", &self.low_price)?,
            symbol: self.symbol,
            fetched_at,
        })
    }
}

fn parse_decimal(field: &str, value: &str) -> Result<f64, ApiError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| {
            ApiError::DeserializationError(format!("Field {} is not a number: {:?}", field, value))
        })
}

/// Error body Binance returns with 4xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct BinanceErrorBody {
    pub code: i64,
    pub msg: String,
}

/// Comprehensive error type for price feed requests
#[derive(Debug, Clone)]
pub enum ApiError {
    /// 400 Bad Request, usually an unknown symbol (code -1121)
    BadRequest { code: i64, msg: String },
    /// 404 Not Found
    NotFound(String),
    /// 418 IP auto-banned after ignoring 429s
    IpBanned(String),
    /// 429 Too Many Requests
    RateLimited { retry_after_secs: u64 },
    /// 5xx Server Error
    ServerError(u16, String),
    /// Other HTTP errors
    HttpError(u16, String),
    /// Network/request error
    RequestError(String),
    /// Deserialization error
    DeserializationError(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::BadRequest { code, msg } => write!(f, "Bad Request ({}): {}", code, msg),
            ApiError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            ApiError::IpBanned(msg) => write!(f, "IP banned: {}", msg),
            ApiError::RateLimited { retry_after_secs } => {
                write!(f, "Rate Limited. Retry after {} s", retry_after_secs)
            }
            ApiError::ServerError(code, msg) => write!(f, "Server Error ({}): {}", code, msg),
            ApiError::HttpError(code, msg) => write!(f, "HTTP Error ({}): {}", code, msg),
            ApiError::RequestError(msg) => write!(f, "Request Error: {}", msg),
            ApiError::DeserializationError(msg) => write!(f, "Deserialization Error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    const BTC_TICKER: &str = r#"{
        "symbol": "BTCUSDT",
        "priceChange": "-791.62000000",
        "priceChangePercent": "-1.2345",
        "weightedAvgPrice": "64210.11",
        "lastPrice": "63950.01000000",
        "highPrice": "65120.00000000",
        "lowPrice": "63500.50000000",
        "volume": "20411.5",
        "count": 2891234
    }"#;

    #[test]
    fn parses_binance_payload() {
        let raw: Ticker24hrResponse = serde_json::from_str(BTC_TICKER).expect("payload");
        let quote = raw.into_quote(Utc::now()).expect("numeric fields");

        assert_eq!(quote.symbol, "BTCUSDT");
        assert_eq!(quote.change_percent, -1.2345);
        assert_eq!(quote.last_price, 63950.01);
        assert_eq!(quote.high_24h, 65120.0);
        assert_eq!(quote.low_24h, 63500.5);
    }

    #[test]
    fn rejects_non_numeric_fields() {
        let raw = Ticker24hrResponse {
            symbol: "ETHUSDT".to_string(),
            last_price: "3100.5".to_string(),
            price_change_percent: "n/a".to_string(),
            high_price: "3200".to_string(),
            low_price: "3000".to_string(),
        };
        let err = raw.into_quote(Utc::now()).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(ref m) if m.contains("priceChangePercent")));
    }

    #[test]
    fn rejects_non_finite_values() {
        assert!(parse_decimal("lastPrice", "NaN").is_err());
        assert!(parse_decimal("lastPrice", "inf").is_err());
        assert_eq!(parse_decimal("lastPrice", " 1.5 ").ok(), Some(1.5));
    }

    #[test]
    fn missing_field_fails_to_deserialize() {
        let result = serde_json::from_str::<Ticker24hrResponse>(r#"{"symbol": "BTCUSDT", "lastPrice": "1"}"#);
        assert!(result.is_err());
    }
}
