//! Common error types for VeiligWerk services

use thiserror::Error;

/// Common result type for VeiligWerk operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across VeiligWerk services
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid persisted or incoming data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Outbound transport or provider call failed
    #[error("Transport error: {0}")]
    Transport(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
