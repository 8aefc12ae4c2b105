//! Domain error types.
//!
//! Order attempts that fail on missing prices or insufficient cash are not
//! errors; they surface as transaction statuses. This enum covers caller
//! contract violations and infrastructure problems only.

/// Top-level error type for tickfolio.
#[derive(Debug, thiserror::Error)]
pub enum TickfolioError {
    #[error("invalid order for {symbol}: {reason}")]
    InvalidOrder { symbol: String, reason: String },

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

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TickfolioError> for std::process::ExitCode {
    fn from(err: &TickfolioError) -> Self {
        let code: u8 = match err {
            TickfolioError::Io(_) => 1,
            TickfolioError::ConfigParse { .. }
            | TickfolioError::ConfigMissing { .. }
            | TickfolioError::ConfigInvalid { .. } => 2,
            TickfolioError::Data { .. } => 3,
            TickfolioError::InvalidOrder { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
