//! Strategy configuration and signal evaluation.
//!
//! A strategy is a closed set of rule variants over the price prefix seen so
//! far. Evaluation yields at most one of BUY/SELL per tick; the warmup gate
//! and any not-yet-ready indicator both degrade to "no signal", never an
//! error.

use std::fmt;

use crate::domain::indicator::{rsi, sma};

/// Bars of history every strategy must see before it may fire, regardless of
/// its own lookbacks.
pub const MIN_WARMUP_BARS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyConfig {
    /// Fast/slow moving-average crossover. Fires on the tick a cross completes.
    SmaCrossover { fast: usize, slow: usize },
    /// Mean reversion on RSI. `threshold` is the oversold bound; the
    /// overbought bound is its mirror, `100 - threshold`.
    RsiReversal { period: usize, threshold: usize },
}

impl StrategyConfig {
    /// The strategy's two raw parameters, in declaration order.
    pub fn params(&self) -> (usize, usize) {
        match *self {
            StrategyConfig::SmaCrossover { fast, slow } => (fast, slow),
            StrategyConfig::RsiReversal { period, threshold } => (period, threshold),
        }
    }

    /// Number of leading bars on which evaluation always yields no signal.
    pub fn warmup_bars(&self) -> usize {
        let (p1, p2) = self.params();
        p1.max(p2).max(MIN_WARMUP_BARS)
    }
}

impl fmt::Display for StrategyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            StrategyConfig::SmaCrossover { fast, slow } => {
                write!(f, "SMA_CROSSOVER({},{})", fast, slow)
            }
            StrategyConfig::RsiReversal { period, threshold } => {
                write!(f, "RSI_REVERSAL({},{})", period, threshold)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
}

/// Outcome of one evaluation. `signal` is `None` for "nothing to do";
/// `reason` names the rule that fired and is empty otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub signal: Option<Signal>,
    pub reason: String,
}

impl Evaluation {
    fn none() -> Self {
        Evaluation {
            signal: None,
            reason: String::new(),
        }
    }
}

/// Evaluate `config` against the closing-price prefix seen so far.
pub fn evaluate(config: &StrategyConfig, prices: &[f64]) -> Evaluation {
    if prices.len() <= config.warmup_bars() {
        return Evaluation::none();
    }

    match *config {
        StrategyConfig::SmaCrossover { fast, slow } => evaluate_crossover(prices, fast, slow),
        StrategyConfig::RsiReversal { period, threshold } => {
            evaluate_reversal(prices, period, threshold)
        }
    }
}

fn evaluate_crossover(prices: &[f64], fast: usize, slow: usize) -> Evaluation {
    let previous = &prices[..prices.len() - 1];

    let (Some(short_now), Some(long_now), Some(short_prev), Some(long_prev)) = (
        sma(prices, fast),
        sma(prices, slow),
        sma(previous, fast),
        sma(previous, slow),
    ) else {
        return Evaluation::none();
    };

    if short_prev <= long_prev && short_now > long_now {
        Evaluation {
            signal: Some(Signal::Buy),
            reason: format!(
                "golden cross: SMA({fast}) {short_now:.2} rose above SMA({slow}) {long_now:.2}"
            ),
        }
    } else if short_prev >= long_prev && short_now < long_now {
        Evaluation {
            signal: Some(Signal::Sell),
            reason: format!(
                "death cross: SMA({fast}) {short_now:.2} fell below SMA({slow}) {long_now:.2}"
            ),
        }
    } else {
        Evaluation::none()
    }
}

fn evaluate_reversal(prices: &[f64], period: usize, threshold: usize) -> Evaluation {
    let value = rsi(prices, period);
    let oversold = threshold as f64;
    let overbought = 100.0 - oversold;

    if value < oversold {
        Evaluation {
            signal: Some(Signal::Buy),
            reason: format!("RSI({period}) {value:.1} below oversold bound {oversold:.0}"),
        }
    } else if value > overbought {
        Evaluation {
            signal: Some(Signal::Sell),
            reason: format!("RSI({period}) {value:.1} above overbought bound {overbought:.0}"),
        }
    } else {
        Evaluation::none()
    }
}
