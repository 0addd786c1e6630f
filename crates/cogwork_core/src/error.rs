//! Error types for cogwork_core

use thiserror::Error;

/// Errors produced while parsing core value types
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A color string was not of the form `#rgb` or `#rrggbb`
    #[error("invalid hex color: {0:?}")]
    InvalidHexColor(String),
}

/// Result type for cogwork_core operations
pub type Result<T> = std::result::Result<T, CoreError>;
