//! Plain-text lane: prefix commands and `[Msg #N]` framing.

pub const UPPER_PREFIX: &str = "UPPER:";
pub const REVERSE_PREFIX: &str = "REVERSE:";

/// How an inbound text frame will be answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFrame<'a> {
    /// JSON object; goes to the command interpreter.
    Command(&'a str),
    /// `UPPER:` remainder.
    Upper(&'a str),
    /// `REVERSE:` remainder.
    Reverse(&'a str),
    /// Anything else, echoed as-is.
    Echo(&'a str),
}

/// Classify a text payload.
///
/// A payload starting with `{` is a command only if it parses as a JSON
/// object; otherwise it is echoed verbatim without prefix handling.
pub fn classify(payload: &str) -> TextFrame<'_> {
    if payload.starts_with('{') {
        return match serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(payload) {
            Ok(_) => TextFrame::Command(payload),
            Err(_) => TextFrame::Echo(payload),
        };
    }

    if let Some(rest) = payload.strip_prefix(UPPER_PREFIX) {
        TextFrame::Upper(rest)
    } else if let Some(rest) = payload.strip_prefix(REVERSE_PREFIX) {
        TextFrame::Reverse(rest)
    } else {
        TextFrame::Echo(payload)
    }
}

/// Unicode-aware uppercase.
pub fn upper(s: &str) -> String {
    s.to_uppercase()
}

/// Reverse by code point (not by byte, not by grapheme).
pub fn reverse(s: &str) -> String {
    s.chars().rev().collect()
}

/// `[Msg #N] <text>`.
pub fn sequenced(seq: u64, text: &str) -> String {
    format!("[Msg #{seq}] {text}")
}
