use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::RETRY_AFTER;
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use super::models::{ApiError, BinanceErrorBody, Ticker24hrResponse};
use crate::models::PriceQuote;
use crate::services::ticker_service::PriceFeed;

/// Binance public market data client used by the deals ticker
pub struct BinanceClient {
    http_client: HttpClient,
    base_url: String,
}

impl BinanceClient {
    pub const DEFAULT_BASE_URL: &'static str = "https://api.binance.com/api/v3";

    /// Create a new client against the public Binance endpoint
    pub fn new() -> Self {
        Self::with_base_url(Self::DEFAULT_BASE_URL.to_string())
    }

    /// Create a new client with custom base URL (mirrors, testnet)
    pub fn with_base_url(base_url: String) -> Self {
        Self::with_http_client(HttpClient::new(), base_url)
    }

    pub fn with_http_client(http_client: HttpClient, base_url: String) -> Self {
        Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Parse error response based on HTTP status code
    async fn handle_error_response(response: reqwest::Response) -> ApiError {
        let status_code = response.status().as_u16();
        let retry_after_secs = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse().ok());
        let body_text = response.text().await.unwrap_or_default();

        match status_code {
            400 => match serde_json::from_str::<BinanceErrorBody>(&body_text) {
                Ok(body) => ApiError::BadRequest {
                    code: body.code,
                    msg: body.msg,
                },
                Err(_) => ApiError::BadRequest {
                    code: 0,
                    msg: body_text,
                },
            },
            404 => ApiError::NotFound(body_text),
            418 => {
                warn!("Price feed banned this IP: {}", body_text);
                ApiError::IpBanned(body_text)
            }
            429 => {
                let retry_after_secs = retry_after_secs.unwrap_or(60);
                warn!("Price feed rate limited, retry after {} s", retry_after_secs);
                ApiError::RateLimited { retry_after_secs }
            }
            500..=599 => {
                warn!("Price feed server error {}: {}", status_code, body_text);
                ApiError::ServerError(status_code, body_text)
            }
            _ => ApiError::HttpError(status_code, body_text),
        }
    }

    /// GET /ticker/24hr?symbol={symbol}
    ///
    /// Rolling 24h statistics for one symbol. No authentication.
    pub async fn get_24hr_ticker(&self, symbol: &str) -> Result<Ticker24hrResponse, ApiError> {
        let url = format!("{}/ticker/24hr", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .query(&[("symbol", symbol)])
            .send()
            .await
            .map_err(|e| ApiError::RequestError(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Self::handle_error_response(response).await);
        }

        response
            .json::<Ticker24hrResponse>()
            .await
            .map_err(|e| ApiError::DeserializationError(format!("Failed to parse response: {}", e)))
    }
}

impl Default for BinanceClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceFeed for BinanceClient {
    async fn fetch_quote(&self, symbol: &str) -> Result<PriceQuote, ApiError> {
        let raw = self.get_24hr_ticker(symbol).await?;
        let mut quote = raw.into_quote(Utc::now())?;
        if !quote.symbol.is_empty() && quote.symbol != symbol {
            warn!("Asked for {} but the feed answered for {}", symbol, quote.symbol);
        }
        quote.symbol = symbol.to_string();
        debug!("Fetched {} at {}", quote.symbol, quote.last_price);
        Ok(quote)
    }
}
