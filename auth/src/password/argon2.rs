use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as Argon2PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PasswordError;

/// Password hashing implementation.
///
/// Argon2id with a fixed work factor. Hashes are stored in PHC string format,
/// so verification always uses the parameters embedded in the stored hash.
pub struct PasswordHasher {
    params: Params,
}

impl PasswordHasher {
    /// Memory cost in KiB.
    pub const MEMORY_COST_KIB: u32 = 19 * 1024;
    /// Number of passes over memory.
    pub const TIME_COST: u32 = 2;
    /// Degree of parallelism.
    pub const PARALLELISM: u32 = 1;

    /// Create a new password hasher with the fixed work factor.
    pub fn new() -> Self {
        let params = Params::new(
            Self::MEMORY_COST_KIB,
            Self::TIME_COST,
            Self::PARALLELISM,
            None,
        )
        .unwrap_or_default();

        Self { params }
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hash a plaintext password.
    ///
    /// A fresh random salt is generated for every call, so hashing the same
    /// password twice yields different strings.
    ///
    /// # Errors
    /// * `HashingFailed` - Underlying hash computation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Check a plaintext password against a stored hash.
    ///
    /// # Returns
    /// `true` if the password matches, `false` on a well-formed mismatch
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is not a valid PHC string
    pub fn matches(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        let parsed_hash = PasswordHash::new(hash).map_err(|e| {
            PasswordError::VerificationFailed(format!("invalid password hash: {}", e))
        })?;

        Ok(self
            .argon2()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}
