//! Configuration validation.
//!
//! Validates the `[data]`, `[simulation]` and `[strategy]` sections before a
//! run, and builds the typed strategy configuration from its raw form.

use crate::domain::error::TicklabError;
use crate::domain::strategy::StrategyConfig;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_TICK_INTERVAL_MS: i64 = 40;

pub fn validate_simulation_config(config: &dyn ConfigPort) -> Result<(), TicklabError> {
    validate_csv_path(config)?;
    validate_initial_cash(config)?;
    validate_tick_interval(config)?;
    Ok(())
}

fn validate_csv_path(config: &dyn ConfigPort) -> Result<(), TicklabError> {
    match config.get_string("data", "csv_path") {
        Some(s) if !s.trim().is_empty() => Ok(()),
        _ => Err(TicklabError::ConfigMissing {
            section: "data".to_string(),
            key: "csv_path".to_string(),
        }),
    }
}

fn validate_initial_cash(config: &dyn ConfigPort) -> Result<(), TicklabError> {
    let value = config.get_double(
        "simulation",
        "initial_cash",
        crate::domain::simulation::DEFAULT_INITIAL_CASH,
    );
    if value <= 0.0 {
        return Err(TicklabError::ConfigInvalid {
            section: "simulation".to_string(),
            key: "initial_cash".to_string(),
            reason: "initial_cash must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_tick_interval(config: &dyn ConfigPort) -> Result<(), TicklabError> {
    let value = config.get_int("simulation", "tick_interval_ms", DEFAULT_TICK_INTERVAL_MS);
    if value < 0 {
        return Err(TicklabError::ConfigInvalid {
            section: "simulation".to_string(),
            key: "tick_interval_ms".to_string(),
            reason: "tick_interval_ms must be non-negative".to_string(),
        });
    }
    Ok(())
}

/// Build the typed strategy from `[strategy]`. Parameter defaults follow the
/// conventional lookbacks for each rule set.
pub fn build_strategy_config(config: &dyn ConfigPort) -> Result<StrategyConfig, TicklabError> {
    let kind = config
        .get_string("strategy", "type")
        .ok_or_else(|| TicklabError::ConfigMissing {
            section: "strategy".to_string(),
            key: "type".to_string(),
        })?;

    match kind.trim().to_lowercase().as_str() {
        "sma_crossover" => {
            let fast = require_positive(config, "param1", 5)?;
            let slow = require_positive(config, "param2", 20)?;
            if fast >= slow {
                return Err(TicklabError::ConfigInvalid {
                    section: "strategy".to_string(),
                    key: "param1".to_string(),
                    reason: "fast period must be shorter than slow period".to_string(),
                });
            }
            Ok(StrategyConfig::SmaCrossover { fast, slow })
        }
        "rsi_reversal" => {
            let period = require_positive(config, "param1", 14)?;
            let threshold = require_positive(config, "param2", 30)?;
            // Above 49 the oversold bound would meet or pass its mirror and
            // both rules could hold at once.
            if threshold > 49 {
                return Err(TicklabError::ConfigInvalid {
                    section: "strategy".to_string(),
                    key: "param2".to_string(),
                    reason: "oversold threshold must be between 1 and 49".to_string(),
                });
            }
            Ok(StrategyConfig::RsiReversal { period, threshold })
        }
        other => Err(TicklabError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "type".to_string(),
            reason: format!("unknown strategy type '{other}'"),
        }),
    }
}

fn require_positive(
    config: &dyn ConfigPort,
    key: &str,
    default: i64,
) -> Result<usize, TicklabError> {
    let value = config.get_int("strategy", key, default);
    if value < 1 {
        return Err(TicklabError::ConfigInvalid {
            section: "strategy".to_string(),
            key: key.to_string(),
            reason: format!("{key} must be at least 1"),
        });
    }
    Ok(value as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    fn adapter(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn valid_simulation_config_passes() {
        let config = adapter(
            "[data]\ncsv_path = candles.csv\n\
             [simulation]\ninitial_cash = 10000\ntick_interval_ms = 40\n",
        );
        assert!(validate_simulation_config(&config).is_ok());
    }

    #[test]
    fn missing_csv_path_rejected() {
        let config = adapter("[simulation]\ninitial_cash = 10000\n");
        let err = validate_simulation_config(&config).unwrap_err();
        assert!(matches!(
            err,
            TicklabError::ConfigMissing { key, .. } if key == "csv_path"
        ));
    }

    #[test]
    fn non_positive_cash_rejected() {
        let config = adapter("[data]\ncsv_path = x.csv\n[simulation]\ninitial_cash = 0\n");
        let err = validate_simulation_config(&config).unwrap_err();
        assert!(matches!(
            err,
            TicklabError::ConfigInvalid { key, .. } if key == "initial_cash"
        ));
    }

    #[test]
    fn negative_tick_interval_rejected() {
        let config = adapter("[data]\ncsv_path = x.csv\n[simulation]\ntick_interval_ms = -1\n");
        let err = validate_simulation_config(&config).unwrap_err();
        assert!(matches!(
            err,
            TicklabError::ConfigInvalid { key, .. } if key == "tick_interval_ms"
        ));
    }

    #[test]
    fn builds_sma_crossover() {
        let config = adapter("[strategy]\ntype = sma_crossover\nparam1 = 5\nparam2 = 20\n");
        let strategy = build_strategy_config(&config).unwrap();
        assert_eq!(strategy, StrategyConfig::SmaCrossover { fast: 5, slow: 20 });
    }

    #[test]
    fn builds_rsi_reversal_with_defaults() {
        let config = adapter("[strategy]\ntype = rsi_reversal\n");
        let strategy = build_strategy_config(&config).unwrap();
        assert_eq!(
            strategy,
            StrategyConfig::RsiReversal {
                period: 14,
                threshold: 30
            }
        );
    }

    #[test]
    fn strategy_type_is_case_insensitive() {
        let config = adapter("[strategy]\ntype = SMA_CROSSOVER\n");
        let strategy = build_strategy_config(&config).unwrap();
        assert_eq!(strategy, StrategyConfig::SmaCrossover { fast: 5, slow: 20 });
    }

    #[test]
    fn missing_type_rejected() {
        let config = adapter("[strategy]\nparam1 = 5\n");
        let err = build_strategy_config(&config).unwrap_err();
        assert!(matches!(
            err,
            TicklabError::ConfigMissing { key, .. } if key == "type"
        ));
    }

    #[test]
    fn unknown_type_rejected() {
        let config = adapter("[strategy]\ntype = macd_momentum\n");
        let err = build_strategy_config(&config).unwrap_err();
        assert!(matches!(
            err,
            TicklabError::ConfigInvalid { key, .. } if key == "type"
        ));
    }

    #[test]
    fn fast_period_must_be_below_slow() {
        let config = adapter("[strategy]\ntype = sma_crossover\nparam1 = 20\nparam2 = 20\n");
        let err = build_strategy_config(&config).unwrap_err();
        assert!(matches!(
            err,
            TicklabError::ConfigInvalid { key, .. } if key == "param1"
        ));
    }

    #[test]
    fn reversal_threshold_must_stay_below_midpoint() {
        let config = adapter("[strategy]\ntype = rsi_reversal\nparam1 = 14\nparam2 = 50\n");
        let err = build_strategy_config(&config).unwrap_err();
        assert!(matches!(
            err,
            TicklabError::ConfigInvalid { key, .. } if key == "param2"
        ));
    }

    #[test]
    fn zero_parameter_rejected() {
        let config = adapter("[strategy]\ntype = rsi_reversal\nparam1 = 0\n");
        let err = build_strategy_config(&config).unwrap_err();
        assert!(matches!(
            err,
            TicklabError::ConfigInvalid { key, .. } if key == "param1"
        ));
    }
}
