//! Error types for the printer library

use thiserror::Error;

/// Printer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// No printer device is attached
    #[error("Printer not found: {0}")]
    NotFound(String),

    /// The device exists but another process holds it
    #[error("Printer busy: {0}")]
    Busy(String),

    /// The device exists but could not be opened
    #[error("Open failed: {0}")]
    OpenFailed(String),

    /// IO error during printing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid printer configuration
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;
