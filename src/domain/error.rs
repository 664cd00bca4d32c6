//! Domain error types.
//!
//! The simulation core itself never fails; these cover the edges around it:
//! configuration, candle ingestion, and I/O.

/// Top-level error type for ticklab.
#[derive(Debug, thiserror::Error)]
pub enum TicklabError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("candle data error: {reason}")]
    Data { reason: String },

    #[error("insufficient data: have {candles} candles, need at least {minimum}")]
    InsufficientData { candles: usize, minimum: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TicklabError> for std::process::ExitCode {
    fn from(err: &TicklabError) -> Self {
        let code: u8 = match err {
            TicklabError::Io(_) => 1,
            TicklabError::ConfigParse { .. }
            | TicklabError::ConfigMissing { .. }
            | TicklabError::ConfigInvalid { .. } => 2,
            TicklabError::Data { .. } | TicklabError::InsufficientData { .. } => 3,
        };
        std::process::ExitCode::from(code)
    }
}
