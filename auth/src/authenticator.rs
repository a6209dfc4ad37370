use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and JWT issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
}

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("jwt error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `token_ttl` - Lifetime of issued tokens
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret, token_ttl),
        }
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Hashing operation failed
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is malformed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: &str,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        if !self.password_hasher.matches(password, stored_hash)? {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.jwt_handler.issue(subject)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Issue a token without password verification.
    ///
    /// Used right after registration, when the credentials were just set.
    pub fn issue_token(&self, subject: &str) -> Result<String, JwtError> {
        self.jwt_handler.issue(subject)
    }

    /// Parse a token and verify its signature, ignoring expiry.
    pub fn extract_claims(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.extract_claims(token)
    }

    /// Check a token against the subject it claims to be issued for.
    pub fn validate_token(&self, token: &str, subject: &str) -> bool {
        self.jwt_handler.validate(token, subject)
    }
}
