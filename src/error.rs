//! Error types for the NimbusDB client
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

use crate::session::SessionState;

/// Result type alias using NimbusError
pub type Result<T> = std::result::Result<T, NimbusError>;

/// Unified error type for NimbusDB client operations
#[derive(Debug, Error)]
pub enum NimbusError {
    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Session State Errors
    // -------------------------------------------------------------------------
    #[error("Invalid session state: {0}")]
    InvalidState(SessionState),
}
