use thiserror::Error;

/// Error type for JWT operations.
#[derive(Debug, Clone, Error)]
pub enum JwtError {
    #[error("failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("invalid token: {0}")]
    InvalidToken(String),
}
