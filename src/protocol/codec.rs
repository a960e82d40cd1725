//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ### Request
//! ```text
//! {"Command":"<name>"}
//! {"Command":"<name>","Data":"<payload>"}
//! ```
//! Key order is fixed, `Data` is present only when the request carries a
//! payload, and both values pass through [`escape_json`].
//!
//! ### Response
//! ```text
//! {"Status":"ok","Message":"Login successful"}
//! ```
//! Decoding is deliberately tolerant: each field is pulled out of the raw
//! line by pattern match rather than by a full JSON parse, so unexpected
//! members, ordering, or trailing garbage never make a response unreadable.
//! A field that cannot be found is simply absent in the decoded value.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use super::{Request, Response};

/// Extracts the `Status` field value (exact key case)
static STATUS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""Status"\s*:\s*"([^"]+)""#).expect("status pattern compiles")
});

/// Extracts the `Message` field value (exact key case)
static MESSAGE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""Message"\s*:\s*"([^"]+)""#).expect("message pattern compiles")
});

/// Extracts the status under the lowercase `status` key spelling
static LOWER_STATUS_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""status"\s*:\s*"([^"]+)""#).expect("lowercase status pattern compiles")
});

// =============================================================================
// Request Encoding
// =============================================================================

/// Escape a string for embedding in a JSON string literal
///
/// Handles backslash, double quote, newline, carriage return, and tab.
/// Escaping the payload guarantees the encoded request stays on one line.
pub fn escape_json(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Encode a request as a single JSON line (without the trailing newline)
///
/// The `Data` member is omitted entirely when the request has no payload;
/// it is never serialized as `null`.
pub fn encode_request(request: &Request) -> String {
    let mut line = String::with_capacity(32 + request.command.len());
    line.push_str("{\"Command\":\"");
    line.push_str(&escape_json(&request.command));
    line.push('"');

    if let Some(data) = &request.data {
        line.push_str(",\"Data\":\"");
        line.push_str(&escape_json(data));
        line.push('"');
    }

    line.push('}');
    line
}

// =============================================================================
// Response Decoding
// =============================================================================

/// Decode a response line
///
/// Never fails: fields that cannot be extracted are left as `None`, so a
/// malformed line decodes to an empty response (which reads as failure).
/// When a field appears more than once, the first occurrence wins.
pub fn decode_response(line: &str) -> Response {
    Response {
        status: extract(&STATUS_PATTERN, line),
        message: extract(&MESSAGE_PATTERN, line),
        result: None,
    }
}

/// Check a LOGIN reply for success
///
/// The handshake accepts `ok` under either key spelling (`Status` or
/// `status`), unlike [`decode_response`] which matches the exact key only.
/// Servers have shipped both spellings in their login reply, so the two
/// checks are ORed: either one reporting `ok` is enough.
pub fn login_reply_ok(line: &str) -> bool {
    status_is_ok(&STATUS_PATTERN, line) || status_is_ok(&LOWER_STATUS_PATTERN, line)
}

fn status_is_ok(pattern: &Regex, line: &str) -> bool {
    extract(pattern, line).is_some_and(|s| s.eq_ignore_ascii_case("ok"))
}

/// First capture of `pattern` in `line`, if any
fn extract(pattern: &Regex, line: &str) -> Option<String> {
    pattern
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}
