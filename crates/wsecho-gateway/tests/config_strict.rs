#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::time::Duration;

use wsecho_gateway::config::{self, SequenceScope};

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
gateway:
  listen: "0.0.0.0:4000"
  idle_timeout: 3000 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}

#[test]
fn ok_minimal_config() {
    let cfg = config::load_from_str("version: 1\n").expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.gateway.path, "/ws");
    assert_eq!(cfg.gateway.max_frame_bytes, 4096);
    assert_eq!(cfg.gateway.idle_timeout(), Duration::from_secs(30));
    assert_eq!(cfg.gateway.ping_interval(), Duration::from_secs(27));
    assert_eq!(cfg.gateway.sequence_scope, SequenceScope::Session);
    assert_eq!(cfg.origins.allowed, vec!["http://localhost:4000".to_string()]);
}

#[test]
fn explicit_ping_and_scope() {
    let ok = r#"
version: 1
gateway:
  idle_timeout_ms: 1000
  ping_interval_ms: 400
  sequence_scope: process
origins:
  allowed: ["https://a.example", "https://b.example"]
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.gateway.ping_interval(), Duration::from_millis(400));
    assert_eq!(cfg.gateway.sequence_scope, SequenceScope::Process);
    assert_eq!(cfg.origins.allowed.len(), 2);
}

#[test]
fn rejects_unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert_eq!(err.client_code().as_str(), "UNSUPPORTED_VERSION");
}

#[test]
fn ping_must_be_shorter_than_idle() {
    let bad = r#"
version: 1
gateway:
  idle_timeout_ms: 1000
  ping_interval_ms: 1000
"#;
    assert!(config::load_from_str(bad).is_err());
}

#[test]
fn rejects_bad_values() {
    for bad in [
        "version: 1\ngateway: { listen: \"nope\" }\n",
        "version: 1\ngateway: { path: \"/\" }\n",
        "version: 1\ngateway: { path: \"ws\" }\n",
        "version: 1\ngateway: { idle_timeout_ms: 50 }\n",
        "version: 1\ngateway: { write_wait_ms: 0 }\n",
        "version: 1\ngateway: { max_frame_bytes: 16 }\n",
        "version: 1\ngateway: { sequence_scope: global }\n",
        "version: 1\norigins: { allowed: [] }\n",
        "version: 1\norigins: { allowed: [\" \"] }\n",
    ] {
        assert!(config::load_from_str(bad).is_err(), "accepted: {bad}");
    }
}
