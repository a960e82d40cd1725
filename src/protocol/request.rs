//! Request definitions
//!
//! Represents requests sent to the server.

/// A request to send to the server
///
/// `command` is either a named command (see [`crate::protocol::commands`])
/// or a textual command expression such as `collection.create("Inventory")`.
/// `data` is an opaque payload whose meaning depends on the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Command name or command expression
    pub command: String,

    /// Optional payload; omitted from the wire when `None`
    pub data: Option<String>,
}

impl Request {
    /// Create a request with an optional payload
    pub fn new(command: impl Into<String>, data: Option<&str>) -> Self {
        Self {
            command: command.into(),
            data: data.map(str::to_string),
        }
    }

    /// Create a request with no payload
    pub fn bare(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            data: None,
        }
    }
}
