//! Arithmetic command lane (JSON in, JSON out).
//!
//! Requests look like `{"command":"add","a":2,"b":3}`. Replies always carry all
//! three fields: `{"result":5,"command":"add","error":""}`. Decode and
//! domain failures are reported in `error` with a zero `result`; they never
//! end the session.
//!
//! Field names match case-insensitively and a repeated field keeps its last
//! value, so `{"Command":"add","A":1,"a":2}` adds 2 and 0.

use std::fmt;

use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Result, WsEchoError};

pub const INVALID_JSON: &str = "Invalid JSON";
pub const DIVISION_BY_ZERO: &str = "Division by zero";
pub const UNKNOWN_COMMAND: &str = "Unknown command";

/// Divisors with a smaller magnitude are treated as zero.
pub const DIVISOR_EPSILON: f64 = 1e-9;

/// Supported operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Command {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "add" => Some(Command::Add),
            "subtract" => Some(Command::Subtract),
            "multiply" => Some(Command::Multiply),
            "divide" => Some(Command::Divide),
            _ => None,
        }
    }

    /// Apply to operands. `Err` carries the client-visible message.
    pub fn apply(self, a: f64, b: f64) -> std::result::Result<f64, &'static str> {
        match self {
            Command::Add => Ok(a + b),
            Command::Subtract => Ok(a - b),
            Command::Multiply => Ok(a * b),
            Command::Divide if b.abs() < DIVISOR_EPSILON => Err(DIVISION_BY_ZERO),
            Command::Divide => Ok(a / b),
        }
    }
}

/// Largest magnitude below which every integral `f64` is exact.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

/// Inbound command frame. Missing fields fall back to empty/zero; a `null`
/// value leaves the field as it was.
#[derive(Debug, Default)]
pub struct CommandRequest {
    pub command: Option<String>,
    pub a: Option<f64>,
    pub b: Option<f64>,
}

impl<'de> Deserialize<'de> for CommandRequest {
    fn deserialize<D: Deserializer<'de>>(de: D) -> std::result::Result<Self, D::Error> {
        de.deserialize_map(RequestVisitor)
    }
}

struct RequestVisitor;

impl<'de> Visitor<'de> for RequestVisitor {
    type Value = CommandRequest;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a command object")
    }

    fn visit_map<M: MapAccess<'de>>(
        self,
        mut map: M,
    ) -> std::result::Result<CommandRequest, M::Error> {
        let mut req = CommandRequest::default();

        // Keys are applied in document order; later ones overwrite.
        while let Some(key) = map.next_key::<String>()? {
            if key.eq_ignore_ascii_case("command") {
                if let Some(v) = map.next_value::<Option<String>>()? {
                    req.command = Some(v);
                }
            } else if key.eq_ignore_ascii_case("a") {
                if let Some(v) = map.next_value::<Option<f64>>()? {
                    req.a = Some(v);
                }
            } else if key.eq_ignore_ascii_case("b") {
                if let Some(v) = map.next_value::<Option<f64>>()? {
                    req.b = Some(v);
                }
            } else {
                map.next_value::<IgnoredAny>()?;
            }
        }
        Ok(req)
    }
}

impl CommandRequest {
    pub fn name(&self) -> &str {
        self.command.as_deref().unwrap_or_default()
    }
}

/// Outbound command reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResponse {
    #[serde(serialize_with = "serialize_result")]
    pub result: f64,
    pub command: String,
    pub error: String,
}

impl CommandResponse {
    pub fn ok(command: &str, result: f64) -> Self {
        Self {
            result,
            command: command.to_string(),
            error: String::new(),
        }
    }

    pub fn error(command: &str, msg: &str) -> Self {
        Self {
            result: 0.0,
            command: command.to_string(),
            error: msg.to_string(),
        }
    }
}

/// Integral results go out as JSON integers (`5`, not `5.0`).
fn serialize_result<S: Serializer>(v: &f64, s: S) -> std::result::Result<S::Ok, S::Error> {
    if v.fract() == 0.0 && v.abs() <= MAX_EXACT_INT {
        s.serialize_i64(*v as i64)
    } else {
        s.serialize_f64(*v)
    }
}

/// Evaluate a decoded request.
pub fn evaluate(req: &CommandRequest) -> CommandResponse {
    let name = req.name();
    let Some(cmd) = Command::parse(name) else {
        return CommandResponse::error(name, UNKNOWN_COMMAND);
    };

    match cmd.apply(req.a.unwrap_or(0.0), req.b.unwrap_or(0.0)) {
        Ok(result) => CommandResponse::ok(name, result),
        Err(msg) => CommandResponse::error(name, msg),
    }
}

/// Decode, evaluate and encode one command frame.
///
/// Malformed requests become an `Invalid JSON` reply. The only `Err` is a
/// non-finite result (overflow, `0 * inf`), which JSON cannot represent.
pub fn interpret(payload: &[u8]) -> Result<String> {
    let resp = match serde_json::from_slice::<CommandRequest>(payload) {
        Ok(req) => evaluate(&req),
        Err(e) => {
            tracing::debug!(error = %e, "command decode failed");
            CommandResponse::error("", INVALID_JSON)
        }
    };

    if !resp.result.is_finite() {
        return Err(WsEchoError::Internal(format!(
            "non-finite result for command {:?}",
            resp.command
        )));
    }

    serde_json::to_string(&resp)
        .map_err(|e| WsEchoError::Internal(format!("encode command response: {e}")))
}
