//! Error type shared by the measurement pipeline.

use thiserror::Error;

/// Errors raised while generating, persisting, or aggregating trial tables.
#[derive(Debug, Error)]
pub enum GrowthError {
    /// Ragged or empty table, or a field that is not a count.
    #[error("Malformed table: {0}")]
    MalformedTable(String),

    /// Rejected parameter (zero trial size, unknown algorithm, bad plot geometry).
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// The plotting backend failed to draw or write the document.
    #[error("Plot error: {0}")]
    Plot(String),
}

pub type Result<T> = std::result::Result<T, GrowthError>;
