//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Protocol Format (Line-Delimited JSON)
//!
//! One JSON object per line, terminated by `\n`. Lines never contain
//! unescaped newlines.
//!
//! ### Request Format
//! ```text
//! {"Command":"<name>","Data":"<payload>"}\n
//! ```
//! The `Data` member is omitted entirely when the request carries no
//! payload (never serialized as `null`).
//!
//! ### Response Format
//! ```text
//! {"Status":"ok","Message":"<text>","Result":[...]}\n
//! ```
//!
//! Responses are not parsed as full JSON documents. Only the `Status` and
//! `Message` string fields are extracted, by pattern match, so that
//! malformed or foreign server output degrades to an empty response
//! instead of an error.

mod codec;
mod request;
mod response;

pub use codec::{decode_response, encode_request, escape_json, login_reply_ok};
pub use request::Request;
pub use response::Response;

/// Command names understood by the server
pub mod commands {
    /// Authenticate the session; data is `"<username>,<password>"`
    pub const LOGIN: &str = "LOGIN";

    /// Retrieve the result stored by the last executed query
    pub const FETCH: &str = "FETCH";

    /// Toggle server-side debug logging; data is `"true"` or `"false"`
    pub const DEBUG: &str = "DEBUG";

    /// Describe the authenticated profile
    pub const PROFILE: &str = "PROFILE";

    /// End the session on the server side
    pub const QUIT: &str = "QUIT";
}
