use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;

use crate::user::errors::EmailError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Represents a registered user. The password hash never leaves the service.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A user that has not been persisted yet; the store assigns the identifier.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: EmailAddress,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl UserId {
    /// Parse a user ID from string.
    ///
    /// # Arguments
    /// * `s` - Decimal identifier
    ///
    /// # Returns
    /// Parsed UserId
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a positive integer
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        match s.parse::<i64>() {
            Ok(id) if id > 0 => Ok(UserId(id)),
            _ => Err(UserIdError::InvalidFormat(s.to_string())),
        }
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Accepts `local@domain.tld` where the local part uses letters, digits and
/// `._%+-`, the domain uses letters, digits, `.` and `-`, and the top-level
/// domain is 2 to 4 ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not match the accepted pattern
    pub fn new(email: String) -> Result<Self, EmailError> {
        if Self::is_valid(&email) {
            Ok(Self(email))
        } else {
            Err(EmailError::InvalidFormat(email))
        }
    }

    fn is_valid(email: &str) -> bool {
        let Ok(parsed) = email_address::EmailAddress::from_str(email) else {
            return false;
        };
        let Some((host, tld)) = parsed.domain().rsplit_once('.') else {
            return false;
        };

        parsed
            .local_part()
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
            && !host.is_empty()
            && host
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
            && (2..=4).contains(&tld.len())
            && tld.chars().all(|c| c.is_ascii_alphabetic())
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to replace a user's password.
#[derive(Debug)]
pub struct ChangePasswordCommand {
    pub current_password: String,
    pub new_password: String,
    pub new_password_confirmation: String,
}

/// Command to delete a user account, re-confirming its credentials.
#[derive(Debug)]
pub struct DeleteUserCommand {
    pub email: String,
    pub current_password: String,
}
