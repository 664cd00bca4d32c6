//! Executed order records.

use chrono::NaiveDateTime;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSide {
    BuyEntry,
    SellExit,
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeSide::BuyEntry => write!(f, "BUY ENTRY"),
            TradeSide::SellExit => write!(f, "SELL EXIT"),
        }
    }
}

/// One executed order. Never mutated after creation; the log persists until
/// an explicit reset.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub side: TradeSide,
    pub price: f64,
    pub quantity: f64,
    /// Realized return against the matching entry. `None` on entries.
    pub pnl_pct: Option<f64>,
    /// Which rule fired, human-readable.
    pub reason: String,
    pub time: NaiveDateTime,
    pub candle_index: usize,
}
