//! Live quote models for the deals ticker

use chrono::{DateTime, Utc};

/// 24h statistics for one instrument, as fetched from the price feed
#[derive(Debug, Clone, PartialEq)]
pub struct PriceQuote {
    pub symbol: String,
    pub last_price: f64,
    pub change_percent: f64,
    pub high_24h: f64,
    pub low_24h: f64,
    pub fetched_at: DateTime<Utc>,
}

impl PriceQuote {
    pub fn direction(&self) -> Direction {
        Direction::from_change(self.change_percent)
    }

    /// Percent change with four decimals and an explicit sign, e.g. `+0.5000%`
    pub fn formatted_change(&self) -> String {
        format_change_percent(self.change_percent)
    }
}

/// Visual state of a deal card's profit arrow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn from_change(change_percent: f64) -> Self {
        if change_percent < 0.0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }

    pub fn arrow_rotation_deg(&self) -> u16 {
        match self {
            Direction::Up => 0,
            Direction::Down => 180,
        }
    }

    pub fn arrow_filter(&self) -> &'static str {
        match self {
            Direction::Up => "none",
            Direction::Down => "brightness(0) saturate(100%) invert(27%) sepia(100%) saturate(7500%) hue-rotate(0deg) brightness(100%) contrast(100%)",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Direction::Up => "#35FF9E",
            Direction::Down => "#FF4444",
        }
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            Direction::Up => "▲",
            Direction::Down => "▼",
        }
    }
}

pub fn format_change_percent(change_percent: f64) -> String {
    if change_percent < 0.0 {
        format!("{:.4}%", change_percent)
    } else {
        // abs() folds -0.0 into +0.0
        format!("+{:.4}%", change_percent.abs())
    }
}
