use chrono::Duration;
use serde::Deserialize;
use serde::Serialize;

/// Registered JWT claims carried by bearer tokens.
///
/// All fields are optional on the wire so that tokens missing a claim still
/// decode and can be rejected with a precise reason.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (the authenticated principal)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Issued at (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expiration time (Unix timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Create new empty claims.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create claims for a subject issued at `now` and expiring after `ttl`.
    ///
    /// # Arguments
    /// * `subject` - Principal the token is issued for
    /// * `now` - Issue instant (Unix timestamp)
    /// * `ttl` - Time to live
    pub fn for_subject(subject: impl ToString, now: i64, ttl: Duration) -> Self {
        Self {
            sub: Some(subject.to_string()),
            iat: Some(now),
            exp: Some(now + ttl.num_seconds()),
        }
    }

    /// Set subject.
    pub fn with_subject(mut self, sub: impl ToString) -> Self {
        self.sub = Some(sub.to_string());
        self
    }

    /// Set issued at (Unix timestamp).
    pub fn with_issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }

    /// Subject, if present and non-empty.
    pub fn subject(&self) -> Option<&str> {
        self.sub.as_deref().filter(|s| !s.is_empty())
    }

    /// Check if the claims are expired at `current_timestamp`.
    ///
    /// Claims without an expiry are always considered expired, and a token
    /// stops being valid at the exact expiry instant.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp.map_or(true, |exp| exp <= current_timestamp)
    }
}
