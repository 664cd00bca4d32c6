//! Candle supply port trait.
//!
//! The simulation only ever consumes a finite, time-ordered candle sequence
//! resident in memory before a run starts; where it comes from is an adapter
//! concern.

use chrono::NaiveDateTime;

use crate::domain::candle::Candle;
use crate::domain::error::TicklabError;

pub trait CandleSource {
    /// The full candle series, ordered by time.
    fn fetch_candles(&self) -> Result<Vec<Candle>, TicklabError>;

    /// First/last timestamp and count, or `None` when the source is empty.
    fn candle_range(&self) -> Result<Option<(NaiveDateTime, NaiveDateTime, usize)>, TicklabError>;
}
