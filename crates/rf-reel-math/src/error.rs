//! Error types for reel math

use thiserror::Error;

use crate::symbols::SymbolId;

/// Configuration errors.
///
/// Raised while assembling a paytable, building a reel window or extracting
/// a payline. These are deterministic for a given configuration and are
/// never corrected silently.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Stop count mismatch: reel group has {expected} reels, got {actual} stops")]
    StopCountMismatch { expected: usize, actual: usize },

    #[error("Reel {reel} has an empty strip")]
    EmptyStrip { reel: usize },

    #[error("Reel {reel} has invalid height {height}")]
    InvalidHeight { reel: usize, height: usize },

    #[error("Reel group has no reels")]
    EmptyReelGroup,

    #[error("Payline coordinate ({reel}, {offset}) is outside the reel window")]
    CoordinateOutOfBounds { reel: usize, offset: usize },

    #[error("Pay combo ({symbol}, {count}) defined twice")]
    DuplicatePayCombo { symbol: SymbolId, count: usize },

    #[error("Pay combo count must be at least 1 (symbol {0})")]
    InvalidCount(SymbolId),

    #[error("Invalid payout {payout} for symbol {symbol}")]
    InvalidPayout { symbol: SymbolId, payout: f64 },

    #[error("Unknown symbol id: {0}")]
    UnknownSymbol(SymbolId),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Limit exceeded: {0}")]
    Limit(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Invariant violations found while matching a grid against pay combos
#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error("Payline {payline} has no coordinates")]
    EmptyPayline { payline: usize },
}

/// Top-level error type
#[derive(Error, Debug)]
pub enum MathError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),
}

/// Result type alias
pub type MathResult<T> = Result<T, MathError>;
