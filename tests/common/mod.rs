#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use ticklab::domain::candle::Candle;
use ticklab::domain::error::TicklabError;
use ticklab::ports::data_port::CandleSource;

pub struct MockCandleSource {
    pub candles: Vec<Candle>,
    pub error: Option<String>,
}

impl MockCandleSource {
    pub fn new(candles: Vec<Candle>) -> Self {
        Self {
            candles,
            error: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            candles: Vec::new(),
            error: Some(reason.to_string()),
        }
    }
}

impl CandleSource for MockCandleSource {
    fn fetch_candles(&self) -> Result<Vec<Candle>, TicklabError> {
        if let Some(reason) = &self.error {
            return Err(TicklabError::Data {
                reason: reason.clone(),
            });
        }
        Ok(self.candles.clone())
    }

    fn candle_range(&self) -> Result<Option<(NaiveDateTime, NaiveDateTime, usize)>, TicklabError> {
        let candles = self.fetch_candles()?;
        match (candles.first(), candles.last()) {
            (Some(first), Some(last)) => Ok(Some((first.time, last.time, candles.len()))),
            _ => Ok(None),
        }
    }
}

pub fn candle_time(index: usize) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        + chrono::Duration::minutes(index as i64)
}

pub fn make_candle(index: usize, close: f64) -> Candle {
    Candle {
        time: candle_time(index),
        open: close - 0.5,
        high: close + 1.0,
        low: close - 1.0,
        close,
        volume: 1_000.0,
    }
}

/// `count` candles with closes stepping linearly from `start` by `step`.
pub fn ramp_candles(count: usize, start: f64, step: f64) -> Vec<Candle> {
    (0..count)
        .map(|i| make_candle(i, start + i as f64 * step))
        .collect()
}

pub fn flat_candles(count: usize, close: f64) -> Vec<Candle> {
    (0..count).map(|i| make_candle(i, close)).collect()
}
