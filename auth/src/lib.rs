//! Authentication utilities library
//!
//! Provides the credential and token primitives used by the task service:
//! - Password hashing (Argon2id, fixed work factor)
//! - JWT issuance and validation (HS256, fixed lifetime, subject-bound)
//! - Authentication coordination
//!
//! The library knows nothing about HTTP or storage; the service adapts it.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.matches("my_password", &hash).unwrap());
//! ```
//!
//! ## JWT Tokens
//! ```
//! use auth::JwtHandler;
//! use chrono::Duration;
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(15));
//! let token = handler.issue("alice@example.com").unwrap();
//! assert!(handler.validate(&token, "alice@example.com"));
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::Authenticator;
//! use chrono::Duration;
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!", Duration::minutes(15));
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue token
//! let result = auth.authenticate("password123", &hash, "alice@example.com").unwrap();
//!
//! // Per request: validate token against its subject
//! assert!(auth.validate_token(&result.access_token, "alice@example.com"));
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
