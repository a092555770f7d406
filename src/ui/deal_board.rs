use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{Direction, PriceQuote};
use crate::services::ticker_service::QuoteDisplay;

const PLACEHOLDER: &str = "--";

/// Render state of one deal card (`.deal-card[data-pair]`)
#[derive(Debug, Clone, PartialEq)]
pub struct DealCard {
    pub pair: String,
    pub profit_text: String,
    pub profit_color: Option<&'static str>,
    pub direction: Option<Direction>,
    pub arrow_rotation_deg: u16,
    pub arrow_filter: &'static str,
    pub last_price: Option<f64>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl DealCard {
    fn new(pair: &str) -> Self {
        Self {
            pair: pair.to_string(),
            profit_text: PLACEHOLDER.to_string(),
            profit_color: None,
            direction: None,
            arrow_rotation_deg: 0,
            arrow_filter: "none",
            last_price: None,
            high_24h: None,
            low_24h: None,
            updated_at: None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.updated_at.is_some()
    }
}

/// The deals section: one card per tracked pair
///
/// Each card is written only by its own pair's refresh task.
pub struct DealBoard {
    cards: Mutex<BTreeMap<String, DealCard>>,
}

impl DealBoard {
    pub fn new<S: AsRef<str>>(pairs: &[S]) -> Self {
        let cards = pairs
            .iter()
            .map(|p| (p.as_ref().to_string(), DealCard::new(p.as_ref())))
            .collect();
        Self {
            cards: Mutex::new(cards),
        }
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, DealCard>> {
        self.cards.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn card(&self, pair: &str) -> Option<DealCard> {
        self.lock().get(pair).cloned()
    }

    pub fn snapshot(&self) -> Vec<DealCard> {
        self.lock().values().cloned().collect()
    }

    pub fn pairs(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }
}

impl QuoteDisplay for DealBoard {
    fn render_quote(&self, quote: &PriceQuote) -> bool {
        let mut cards = self.lock();
        let Some(card) = cards.get_mut(&quote.symbol) else {
            debug!("No deal card for {}, skipping", quote.symbol);
            return false;
        };

        let direction = quote.direction();
        card.profit_text = quote.formatted_change();
        card.profit_color = Some(direction.color());
        card.direction = Some(direction);
        card.arrow_rotation_deg = direction.arrow_rotation_deg();
        card.arrow_filter = direction.arrow_filter();
        card.last_price = Some(quote.last_price);
        card.high_24h = Some(quote.high_24h);
        card.low_24h = Some(quote.low_24h);
        card.updated_at = Some(quote.fetched_at);
        true
    }
}
