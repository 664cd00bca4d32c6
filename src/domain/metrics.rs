//! Run summary statistics.
//!
//! Derived from the equity curve and trade log after (or during) a run;
//! never feeds back into the simulation.

use crate::domain::simulation::EquityPoint;
use crate::domain::trade::{Trade, TradeSide};

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub final_equity: f64,
    /// Fractional return on initial cash.
    pub total_return: f64,
    /// Worst peak-to-trough decline as a fraction of the peak.
    pub max_drawdown: f64,
    pub entries: usize,
    pub exits: usize,
    pub wins: usize,
    pub losses: usize,
    /// Wins over exits; 0 when nothing has been closed.
    pub win_rate: f64,
    pub best_exit_pct: f64,
    pub worst_exit_pct: f64,
}

impl Summary {
    pub fn compute(initial_cash: f64, equity_curve: &[EquityPoint], trades: &[Trade]) -> Self {
        let final_equity = equity_curve
            .last()
            .map(|p| p.equity)
            .unwrap_or(initial_cash);

        let total_return = if initial_cash > 0.0 {
            (final_equity - initial_cash) / initial_cash
        } else {
            0.0
        };

        let max_drawdown = compute_drawdown(equity_curve);

        let mut entries = 0usize;
        let mut exits = 0usize;
        let mut wins = 0usize;
        let mut losses = 0usize;
        let mut best_exit_pct = 0.0_f64;
        let mut worst_exit_pct = 0.0_f64;

        for trade in trades {
            match trade.side {
                TradeSide::BuyEntry => entries += 1,
                TradeSide::SellExit => {
                    exits += 1;
                    let pnl = trade.pnl_pct.unwrap_or(0.0);
                    if pnl > 0.0 {
                        wins += 1;
                    } else if pnl < 0.0 {
                        losses += 1;
                    }
                    if pnl > best_exit_pct {
                        best_exit_pct = pnl;
                    }
                    if pnl < worst_exit_pct {
                        worst_exit_pct = pnl;
                    }
                }
            }
        }

        let win_rate = if exits > 0 {
            wins as f64 / exits as f64
        } else {
            0.0
        };

        Summary {
            final_equity,
            total_return,
            max_drawdown,
            entries,
            exits,
            wins,
            losses,
            win_rate,
            best_exit_pct,
            worst_exit_pct,
        }
    }
}

fn compute_drawdown(equity_curve: &[EquityPoint]) -> f64 {
    if equity_curve.is_empty() {
        return 0.0;
    }

    let mut peak = equity_curve[0].equity;
    let mut max_dd = 0.0_f64;

    for point in equity_curve {
        if point.equity > peak {
            peak = point.equity;
        } else if peak > 0.0 {
            let dd = (peak - point.equity) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }

    max_dd
}
