//! Error types for the edit core

use crate::grid::TileKey;
use thiserror::Error;

/// Main error type for the edit core
///
/// Domain failures (`CeilingExceeded`, `TileNotLoaded`, `InvalidTarget`)
/// abort the remaining operation chain; contract violations
/// (`ResumedAfterCancel`, `Exhausted`, `Config`) indicate misuse and
/// surface immediately. Stopping early with a nonzero affected count is
/// not an error.
#[derive(Debug, Error)]
pub enum Error {
    #[error("mutation ceiling of {0} exceeded")]
    CeilingExceeded(usize),

    #[error("tile {0:?} is not loaded")]
    TileNotLoaded(TileKey),

    #[error("invalid edit target: {0}")]
    InvalidTarget(String),

    #[error("operation resumed after cancellation")]
    ResumedAfterCancel,

    #[error("operation resumed after completion")]
    Exhausted,

    #[error("malformed configuration: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error is a contract violation rather than a domain
    /// failure.
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Error::ResumedAfterCancel | Error::Exhausted | Error::Config(_)
        )
    }
}
