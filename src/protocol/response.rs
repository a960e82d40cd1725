//! Response definitions
//!
//! Represents responses received from the server.

/// A response received from the server
///
/// Every field is optional: the decoder fills in whatever it could extract
/// from the line and leaves the rest absent. A response with no status at
/// all is still a valid value, it just never counts as successful.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    /// Extracted `Status` field (`"ok"` on success)
    pub status: Option<String>,

    /// Extracted `Message` field, the human-readable outcome text
    pub message: Option<String>,

    /// Structured result rows; reserved for server payloads that carry
    /// them, never populated by line extraction
    pub result: Option<Vec<String>>,
}

impl Response {
    /// Whether the server reported success
    ///
    /// True exactly when a status was extracted and it equals `"ok"`
    /// ignoring ASCII case. An absent status is a failure.
    pub fn is_success(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("ok"))
    }

    /// The message text, or an empty string when none was extracted
    pub fn message_text(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}
