//! CSV candle-file adapter.
//!
//! Expects a header row and `time,open,high,low,close,volume` columns with
//! timestamps in `YYYY-MM-DD HH:MM:SS`. Rows are sorted by time after
//! parsing, so out-of-order files still produce an ordered series.

use chrono::NaiveDateTime;
use std::fs;
use std::path::PathBuf;

use crate::domain::candle::Candle;
use crate::domain::error::TicklabError;
use crate::ports::data_port::CandleSource;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub struct CsvCandleAdapter {
    path: PathBuf,
}

impl CsvCandleAdapter {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn parse_field(record: &csv::StringRecord, index: usize, name: &str) -> Result<f64, TicklabError> {
        record
            .get(index)
            .ok_or_else(|| TicklabError::Data {
                reason: format!("missing {name} column"),
            })?
            .parse()
            .map_err(|e| TicklabError::Data {
                reason: format!("invalid {name} value: {e}"),
            })
    }
}

impl CandleSource for CsvCandleAdapter {
    fn fetch_candles(&self) -> Result<Vec<Candle>, TicklabError> {
        let content = fs::read_to_string(&self.path).map_err(|e| TicklabError::Data {
            reason: format!("failed to read {}: {}", self.path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut candles = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| TicklabError::Data {
                reason: format!("CSV parse error: {e}"),
            })?;

            let time_str = record.get(0).ok_or_else(|| TicklabError::Data {
                reason: "missing time column".into(),
            })?;
            let time = NaiveDateTime::parse_from_str(time_str, TIME_FORMAT).map_err(|e| {
                TicklabError::Data {
                    reason: format!("invalid time format: {e}"),
                }
            })?;

            candles.push(Candle {
                time,
                open: Self::parse_field(&record, 1, "open")?,
                high: Self::parse_field(&record, 2, "high")?,
                low: Self::parse_field(&record, 3, "low")?,
                close: Self::parse_field(&record, 4, "close")?,
                volume: Self::parse_field(&record, 5, "volume")?,
            });
        }

        candles.sort_by_key(|c| c.time);
        Ok(candles)
    }

    fn candle_range(&self) -> Result<Option<(NaiveDateTime, NaiveDateTime, usize)>, TicklabError> {
        let candles = self.fetch_candles()?;
        match (candles.first(), candles.last()) {
            (Some(first), Some(last)) => Ok(Some((first.time, last.time, candles.len()))),
            _ => Ok(None),
        }
    }
}
