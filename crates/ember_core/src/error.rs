//! Engine error types

use thiserror::Error;

/// Errors surfaced by the engine's fallible entry points
///
/// Runtime DOM problems (missing decorative elements, stale handles) are not
/// errors: handlers skip them. Only configuration loading and selector
/// parsing report failures.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Variant configuration could not be parsed
    #[error("Invalid variant configuration: {0}")]
    Config(String),

    /// Variant configuration file could not be read
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// Selector string is not one of `.class`, `#id` or `[attr]`
    #[error("Unsupported selector: {0}")]
    Selector(String),
}

impl From<toml::de::Error> for EngineError {
    fn from(err: toml::de::Error) -> Self {
        EngineError::Config(err.to_string())
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, EngineError>;
