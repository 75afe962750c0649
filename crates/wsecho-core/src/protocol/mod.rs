//! Protocol modules (command lane + text lane).
//!
//! - Command lane: JSON objects `{command, a, b}` answered with
//!   `{result, command, error}`.
//! - Text lane: `UPPER:` / `REVERSE:` prefixes and plain echo, answered with a
//!   `[Msg #N]` prefix.
//!
//! Everything here is pure and panic-free; the gateway only moves frames.

pub mod command;
pub mod text;

use crate::seq::SequenceCounter;
use text::TextFrame;

/// Reply used when a command result cannot be encoded.
pub const COMMAND_FAILED: &str = "Error processing command";

/// Build the reply for one inbound text frame.
///
/// Draws exactly one value from `seq`, whichever lane the frame takes.
pub fn reply(payload: &str, seq: &SequenceCounter) -> String {
    let n = seq.next();

    match text::classify(payload) {
        TextFrame::Command(json) => match command::interpret(json.as_bytes()) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::warn!(
                    seq = n,
                    code = e.client_code().as_str(),
                    error = %e,
                    "command processing failed"
                );
                text::sequenced(n, COMMAND_FAILED)
            }
        },
        TextFrame::Upper(rest) => text::sequenced(n, &text::upper(rest)),
        TextFrame::Reverse(rest) => text::sequenced(n, &text::reverse(rest)),
        TextFrame::Echo(raw) => text::sequenced(n, raw),
    }
}
