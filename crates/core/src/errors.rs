//! Core error types for the portfolio analytics engine.
//!
//! The engine itself only ever raises `InvalidHolding`, `EmptyPortfolio`,
//! `UnknownSortField` and `Overflow`. The remaining variants belong to the data-access layer
//! that resolves a snapshot before the engine sees it.

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the portfolio analytics core.
#[derive(Error, Debug)]
pub enum Error {
    /// A holding carried malformed numeric fields or an unknown category label.
    #[error("Invalid holding {symbol}: {reason}")]
    InvalidHolding { symbol: String, reason: String },

    /// The operation has no meaningful result over zero holdings.
    #[error("Portfolio is empty: {0}")]
    EmptyPortfolio(String),

    /// The caller asked to sort by a field the engine does not know.
    #[error("Unknown sort field '{0}'")]
    UnknownSortField(String),

    #[error("Invalid sort order '{0}'")]
    UnknownSortOrder(String),

    #[error("Unknown view mode '{0}'")]
    UnknownViewMode(String),

    /// A derived total or ratio does not fit in a `Decimal`.
    #[error("Arithmetic overflow computing {0}")]
    Overflow(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse portfolio document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Remote portfolio request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid configuration value: {0}")]
    Config(String),
}

impl Error {
    pub fn invalid_holding(symbol: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidHolding {
            symbol: symbol.into(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by the caller's input rather than by a data source.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidHolding { .. }
                | Error::UnknownSortField(_)
                | Error::UnknownSortOrder(_)
                | Error::UnknownViewMode(_)
        )
    }
}
