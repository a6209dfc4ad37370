use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// JWT token handler for issuing and validating bearer tokens.
///
/// Uses HS256 (HMAC with SHA-256). The key and the token lifetime are fixed at
/// construction; the handler holds no other state.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl JwtHandler {
    pub const DEFAULT_TTL_MINUTES: i64 = 15;

    /// Create a new JWT handler.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens (at least 32 bytes for HS256)
    /// * `ttl` - Lifetime of issued tokens
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
            ttl,
        }
    }

    /// Issue a token for `subject`, valid from now until now + ttl.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: &str) -> Result<String, JwtError> {
        self.issue_at(subject, Utc::now().timestamp())
    }

    /// Issue a token for `subject` as if the current time were `now`.
    pub fn issue_at(&self, subject: &str, now: i64) -> Result<String, JwtError> {
        self.encode(&Claims::for_subject(subject, now, self.ttl))
    }

    /// Sign arbitrary claims.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Parse a token and verify its signature.
    ///
    /// Expiry is deliberately not checked here: a well-signed expired token
    /// still yields its claims, so callers can tell "expired" apart from
    /// "malformed" with [`Claims::is_expired`].
    ///
    /// # Errors
    /// * `InvalidToken` - Token is malformed or its signature does not verify
    pub fn extract_claims(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.algorithm);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|token_data| token_data.claims)
            .map_err(|e| JwtError::InvalidToken(e.to_string()))
    }

    /// Check that `token` is well-signed, issued for `expected_subject` and
    /// not yet expired.
    pub fn validate(&self, token: &str, expected_subject: &str) -> bool {
        self.validate_at(token, expected_subject, Utc::now().timestamp())
    }

    /// [`validate`](Self::validate) evaluated at the instant `now`.
    pub fn validate_at(&self, token: &str, expected_subject: &str, now: i64) -> bool {
        if token.is_empty() || expected_subject.is_empty() {
            return false;
        }

        match self.extract_claims(token) {
            Ok(claims) => {
                claims.subject() == Some(expected_subject) && !claims.is_expired(now)
            }
            Err(_) => false,
        }
    }
}
