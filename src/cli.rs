//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use crate::adapters::csv_adapter::CsvCandleAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::{
    build_strategy_config, validate_simulation_config, DEFAULT_TICK_INTERVAL_MS,
};
use crate::domain::error::TicklabError;
use crate::domain::metrics::Summary;
use crate::domain::simulation::{Simulation, SimulationStatus, DEFAULT_INITIAL_CASH};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::CandleSource;

#[derive(Parser, Debug)]
#[command(name = "ticklab", about = "Candle-replay strategy simulator")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a simulation to completion
    Run {
        #[arg(short, long)]
        config: PathBuf,
        /// Candle CSV, overriding the configured path
        #[arg(long)]
        candles: Option<PathBuf>,
        /// Milliseconds between ticks, overriding the configured interval
        #[arg(long)]
        tick_interval_ms: Option<u64>,
    },
    /// Validate a configuration without running
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the time range of a candle file
    Info {
        #[arg(long)]
        candles: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Run {
            config,
            candles,
            tick_interval_ms,
        } => run_simulation(&config, candles.as_ref(), tick_interval_ms),
        Command::Validate { config } => run_validate(&config),
        Command::Info { candles } => run_info(&candles),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = TicklabError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn run_simulation(
    config_path: &PathBuf,
    candles_override: Option<&PathBuf>,
    interval_override: Option<u64>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_simulation_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let strategy = match build_strategy_config(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let csv_path = candles_override.cloned().unwrap_or_else(|| {
        PathBuf::from(adapter.get_string("data", "csv_path").unwrap_or_default())
    });

    let source = CsvCandleAdapter::new(csv_path);
    let candles = match source.fetch_candles() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if candles.len() < 2 {
        let e = TicklabError::InsufficientData {
            candles: candles.len(),
            minimum: 2,
        };
        eprintln!("error: {e}");
        return (&e).into();
    }

    let initial_cash = adapter.get_double("simulation", "initial_cash", DEFAULT_INITIAL_CASH);
    let interval_ms = interval_override.unwrap_or_else(|| {
        adapter.get_int("simulation", "tick_interval_ms", DEFAULT_TICK_INTERVAL_MS) as u64
    });

    eprintln!(
        "Replaying {} candles with {} (initial cash {:.2})",
        candles.len(),
        strategy,
        initial_cash,
    );

    let mut sim = Simulation::new(candles, strategy, initial_cash);
    sim.start();
    while sim.status() == SimulationStatus::Running {
        sim.step();

        if let Some(trade) = sim.trade_log().last() {
            if trade.candle_index == sim.cursor() {
                println!(
                    "{} {} {:.6} @ {:.2}{} ({})",
                    trade.time.format("%Y-%m-%d %H:%M:%S"),
                    trade.side,
                    trade.quantity,
                    trade.price,
                    trade
                        .pnl_pct
                        .map(|p| format!(" {:+.2}%", p))
                        .unwrap_or_default(),
                    trade.reason,
                );
            }
        }

        if interval_ms > 0 {
            thread::sleep(Duration::from_millis(interval_ms));
        }
    }

    let summary = Summary::compute(initial_cash, sim.equity_curve(), sim.trade_log());

    eprintln!("\n=== Simulation Summary ===");
    eprintln!("Final Equity:       {:.2}", summary.final_equity);
    eprintln!("Total Return:       {:.2}%", summary.total_return * 100.0);
    eprintln!("Max Drawdown:       -{:.1}%", summary.max_drawdown * 100.0);
    eprintln!("Entries / Exits:    {} / {}", summary.entries, summary.exits);
    eprintln!("Win Rate:           {:.1}%", summary.win_rate * 100.0);
    if summary.exits > 0 {
        eprintln!("Best Exit:          {:+.2}%", summary.best_exit_pct);
        eprintln!("Worst Exit:         {:+.2}%", summary.worst_exit_pct);
    }
    if sim.discarded_signals() > 0 {
        eprintln!("Discarded Signals:  {}", sim.discarded_signals());
    }
    if sim.trade_log().is_empty() {
        eprintln!("No trades executed (awaiting signal for the whole run)");
    }

    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    if let Err(e) = validate_simulation_config(&adapter) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let strategy = match build_strategy_config(&adapter) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("Strategy: {}", strategy);
    eprintln!("Warmup:   {} bars", strategy.warmup_bars());
    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}

fn run_info(candles_path: &PathBuf) -> ExitCode {
    let source = CsvCandleAdapter::new(candles_path.clone());
    match source.candle_range() {
        Ok(Some((first, last, count))) => {
            println!("{}: {} candles, {} to {}", candles_path.display(), count, first, last);
            ExitCode::SUCCESS
        }
        Ok(None) => {
            eprintln!("{}: no candles found", candles_path.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
