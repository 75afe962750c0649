//! Origin allow-list compilation and matching.
//!
//! Entries match the declared `Origin` header exactly (scheme + host + port),
//! ignoring ASCII case. There is no wildcard or suffix matching.

use wsecho_core::error::{Result, WsEchoError};

/// Decision for one upgrade request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginDecision {
    Allow,
    /// No `Origin` header, or an empty one.
    RejectMissing,
    /// Origin present but not on the list.
    RejectUnlisted,
}

impl OriginDecision {
    pub fn is_allowed(self) -> bool {
        matches!(self, OriginDecision::Allow)
    }
}

/// Compiled, read-only origin allow-list.
/// Construct once at startup, then share via Arc.
#[derive(Debug, Clone)]
pub struct OriginGuard {
    allowed: Vec<String>,
}

impl OriginGuard {
    pub fn new(raw: &[String]) -> Result<Self> {
        let mut allowed = Vec::with_capacity(raw.len());
        for s in raw {
            let o = s.trim();
            if o.is_empty() {
                return Err(WsEchoError::BadRequest("blank origin in allow-list".into()));
            }
            if !(o.starts_with("http://") || o.starts_with("https://")) {
                tracing::warn!(origin = %o, "allow-list entry has no http(s) scheme");
            }
            allowed.push(o.to_string());
        }
        Ok(Self { allowed })
    }

    pub fn check(&self, origin: Option<&str>) -> OriginDecision {
        match origin {
            None | Some("") => OriginDecision::RejectMissing,
            Some(o) if self.allowed.iter().any(|a| a.eq_ignore_ascii_case(o)) => {
                OriginDecision::Allow
            }
            Some(_) => OriginDecision::RejectUnlisted,
        }
    }

    /// Check and log rejections with the requested path.
    pub fn admit(&self, origin: Option<&str>, path: &str) -> OriginDecision {
        let decision = self.check(origin);
        if !decision.is_allowed() {
            tracing::warn!(?origin, %path, ?decision, "blocked cross-origin websocket");
        }
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guard() -> OriginGuard {
        let raw = ["http://localhost:4000".to_string(), "https://App.example.com".to_string()];
        OriginGuard::new(&raw).unwrap()
    }

    #[test]
    fn exact_match_ignoring_case() {
        let g = guard();
        assert_eq!(g.check(Some("http://localhost:4000")), OriginDecision::Allow);
        assert_eq!(g.check(Some("HTTP://LOCALHOST:4000")), OriginDecision::Allow);
        assert_eq!(g.check(Some("https://app.example.com")), OriginDecision::Allow);
    }

    #[test]
    fn rejects_near_misses() {
        let g = guard();
        assert_eq!(g.check(Some("http://localhost:4001")), OriginDecision::RejectUnlisted);
        assert_eq!(g.check(Some("https://localhost:4000")), OriginDecision::RejectUnlisted);
        assert_eq!(g.check(Some("http://localhost:4000/")), OriginDecision::RejectUnlisted);
        assert_eq!(g.check(Some("http://evil.localhost:4000")), OriginDecision::RejectUnlisted);
        assert_eq!(g.check(Some("null")), OriginDecision::RejectUnlisted);
    }

    #[test]
    fn rejects_missing() {
        let g = guard();
        assert_eq!(g.check(None), OriginDecision::RejectMissing);
        assert_eq!(g.admit(Some(""), "/ws"), OriginDecision::RejectMissing);
    }

    #[test]
    fn entries_keep_their_spelling() {
        let g = guard();
        assert_eq!(g.allowed[1], "https://App.example.com");
        assert_eq!(g.check(Some("HTTPS://APP.EXAMPLE.COM")), OriginDecision::Allow);
    }

    #[test]
    fn blank_entry_fails_compile() {
        assert!(OriginGuard::new(&["  ".to_string()]).is_err());
    }
}
