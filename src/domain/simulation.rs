//! Candle-by-candle simulation loop and ledger.
//!
//! The simulation owns its state exclusively; callers drive it through
//! `start`/`pause`/`step`/`reset` and read snapshots. One candle is consumed
//! per `step`. The ledger holds either cash or units, never both: an entry
//! converts the full balance into units, an exit converts all units back.
//! Nothing in here has a fatal path — contradictory signals are discarded,
//! missing warmup yields no signal, and running off the end of the data is a
//! terminal state, not an error.

use chrono::NaiveDateTime;

use crate::domain::candle::{self, Candle};
use crate::domain::strategy::{self, Signal, StrategyConfig};
use crate::domain::trade::{Trade, TradeSide};

pub const DEFAULT_INITIAL_CASH: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulationStatus {
    Idle,
    Running,
    Paused,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquityPoint {
    pub time: NaiveDateTime,
    pub equity: f64,
}

#[derive(Debug, Clone)]
pub struct Simulation {
    candles: Vec<Candle>,
    // Private: the only way to change it is `reconfigure`, which resets.
    strategy: StrategyConfig,
    initial_cash: f64,
    status: SimulationStatus,
    cursor: usize,
    cash: f64,
    holdings: f64,
    trade_log: Vec<Trade>,
    equity_curve: Vec<EquityPoint>,
    discarded_signals: usize,
}

impl Simulation {
    pub fn new(candles: Vec<Candle>, strategy: StrategyConfig, initial_cash: f64) -> Self {
        Simulation {
            candles,
            strategy,
            initial_cash,
            status: SimulationStatus::Idle,
            cursor: 0,
            cash: initial_cash,
            holdings: 0.0,
            trade_log: Vec::new(),
            equity_curve: Vec::new(),
            discarded_signals: 0,
        }
    }

    pub fn status(&self) -> SimulationStatus {
        self.status
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn holdings(&self) -> f64 {
        self.holdings
    }

    pub fn strategy(&self) -> &StrategyConfig {
        &self.strategy
    }

    pub fn initial_cash(&self) -> f64 {
        self.initial_cash
    }

    pub fn candle_count(&self) -> usize {
        self.candles.len()
    }

    pub fn trade_log(&self) -> &[Trade] {
        &self.trade_log
    }

    pub fn equity_curve(&self) -> &[EquityPoint] {
        &self.equity_curve
    }

    /// Signals that fired but contradicted the current position. Diagnostic
    /// only; never affects the trade log or equity curve.
    pub fn discarded_signals(&self) -> usize {
        self.discarded_signals
    }

    /// Begin or resume ticking. No-op once `Complete`; only `reset` leaves
    /// that state.
    pub fn start(&mut self) {
        if matches!(self.status, SimulationStatus::Idle | SimulationStatus::Paused) {
            self.status = SimulationStatus::Running;
        }
    }

    /// Suspend ticking without touching the ledger. No-op unless `Running`.
    pub fn pause(&mut self) {
        if self.status == SimulationStatus::Running {
            self.status = SimulationStatus::Paused;
        }
    }

    /// Return to the freshly-constructed state. Available from any status.
    pub fn reset(&mut self) {
        self.status = SimulationStatus::Idle;
        self.cursor = 0;
        self.cash = self.initial_cash;
        self.holdings = 0.0;
        self.trade_log.clear();
        self.equity_curve.clear();
        self.discarded_signals = 0;
    }

    /// Swap in a new strategy. Always resets first: indicator warmup and PnL
    /// attribution are only meaningful under a single configuration, so a
    /// changed rule set never re-reads history mid-run.
    pub fn reconfigure(&mut self, strategy: StrategyConfig) {
        self.reset();
        self.strategy = strategy;
    }

    /// Consume one candle. Only meaningful while `Running`; any other status
    /// leaves the state untouched.
    pub fn step(&mut self) {
        if self.status != SimulationStatus::Running {
            return;
        }

        self.cursor += 1;
        if self.cursor >= self.candles.len() {
            self.status = SimulationStatus::Complete;
            return;
        }

        let prices = candle::closes(&self.candles[..=self.cursor]);
        let evaluation = strategy::evaluate(&self.strategy, &prices);

        let current = self.candles[self.cursor];
        if let Some(signal) = evaluation.signal {
            self.execute(signal, &current, evaluation.reason);
        }

        let equity = self.equity();
        self.equity_curve.push(EquityPoint {
            time: current.time,
            equity,
        });
    }

    /// Mark-to-market equity: units at the most recent close while in a
    /// position, cash otherwise.
    pub fn equity(&self) -> f64 {
        if self.holdings > 0.0 {
            let last = self.cursor.min(self.candles.len() - 1);
            self.holdings * self.candles[last].close
        } else {
            self.cash
        }
    }

    fn execute(&mut self, signal: Signal, current: &Candle, reason: String) {
        match signal {
            Signal::Buy if self.holdings == 0.0 => {
                let quantity = self.cash / current.close;
                self.holdings = quantity;
                self.cash = 0.0;
                self.trade_log.push(Trade {
                    side: TradeSide::BuyEntry,
                    price: current.close,
                    quantity,
                    pnl_pct: None,
                    reason,
                    time: current.time,
                    candle_index: self.cursor,
                });
            }
            Signal::Sell if self.holdings > 0.0 => {
                let quantity = self.holdings;
                let pnl_pct = self
                    .last_entry_price()
                    .map(|entry| (current.close - entry) / entry * 100.0);
                self.cash = quantity * current.close;
                self.holdings = 0.0;
                self.trade_log.push(Trade {
                    side: TradeSide::SellExit,
                    price: current.close,
                    quantity,
                    pnl_pct,
                    reason,
                    time: current.time,
                    candle_index: self.cursor,
                });
            }
            // BUY while holding or SELL while flat: discard.
            _ => self.discarded_signals += 1,
        }
    }

    fn last_entry_price(&self) -> Option<f64> {
        self.trade_log
            .iter()
            .rev()
            .find(|t| t.side == TradeSide::BuyEntry)
            .map(|t| t.price)
    }
}
