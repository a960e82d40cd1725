//! # NimbusDB Client
//!
//! A synchronous client for NimbusDB, a remote document database, with:
//! - Line-delimited JSON protocol over TCP
//! - LOGIN handshake run at connection time
//! - Strict one-request-one-response pairing, safe across threads
//! - Tolerant response decoding that survives malformed server output
//! - Fluent builders for database, collection, document, and profile operations
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Client                                │
//! │        (fluent operations + advisory database cursor)        │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ command expressions / control commands
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Session                               │
//! │          (handshake, state, request serialization)           │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ encode / decode (protocol)
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     LineTransport                            │
//! │              (TCP socket, one line at a time)                │
//! └─────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod client;
pub mod protocol;
pub mod query;
pub mod session;
pub mod transport;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use client::Client;
pub use config::{ClientConfig, DEFAULT_HOST, DEFAULT_PORT};
pub use error::{NimbusError, Result};
pub use protocol::{Request, Response};
pub use session::{Session, SessionState};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the NimbusDB client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
