//! User Password Value Object
//!
//! Domain wrapper around `platform::password`. Hashing and verification are
//! CPU bound (Argon2id), so both run on the blocking thread pool.
//!
//! ## Usage
//! ```rust,ignore
//! use auth::domain::value_object::user_password::UserPassword;
//!
//! let stored = UserPassword::hash("rahasia-banget".to_string()).await?;
//! assert!(stored.matches("rahasia-banget".to_string()).await?);
//! ```

use kernel::error::app_error::{AppResult, ResultExt};
use platform::password::{self, PasswordDigest, PlainPassword};

use crate::error::AuthError;

/// Stored password digest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPassword(PasswordDigest);

impl UserPassword {
    /// Hash a clear text password submitted by the user
    ///
    /// ## Errors
    /// INVALID when the password violates the length / character policy,
    /// INTERNAL when hashing itself fails.
    pub async fn hash(raw: String) -> AppResult<Self> {
        const OP: &str = "UserPassword::hash";

        let plain = PlainPassword::new(raw).map_err(|e| AuthError::from(e).at(OP))?;
        let digest = tokio::task::spawn_blocking(move || password::hash(&plain))
            .await
            .or_internal(OP)?
            .map_err(|e| AuthError::from(e).at(OP))?;

        Ok(Self(digest))
    }

    /// Check a submitted password against this digest
    ///
    /// A submission that could never have been registered simply does not
    /// match.
    pub async fn matches(&self, raw: String) -> AppResult<bool> {
        const OP: &str = "UserPassword::matches";

        let Ok(plain) = PlainPassword::new(raw) else {
            return Ok(false);
        };
        let digest = self.0.clone();
        tokio::task::spawn_blocking(move || password::verify(&digest, &plain))
            .await
            .or_internal(OP)
    }

    /// Create from database value
    pub fn from_db(stored: impl Into<String>) -> Result<Self, AuthError> {
        Ok(Self(PasswordDigest::from_stored(stored)?))
    }

    /// Get the PHC string for storage
    pub fn as_db(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::error::kind::ErrorKind;

    #[tokio::test]
    async fn test_hash_and_match() {
        let stored = UserPassword::hash("rahasia-banget".to_string()).await.unwrap();
        assert!(stored.matches("rahasia-banget".to_string()).await.unwrap());
        assert!(!stored.matches("rahasia-salah".to_string()).await.unwrap());
    }

    #[tokio::test]
    async fn test_policy_violation_is_invalid() {
        let err = UserPassword::hash("pendek".to_string()).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Invalid);
    }

    #[tokio::test]
    async fn test_short_submission_never_matches() {
        let stored = UserPassword::hash("rahasia-banget".to_string()).await.unwrap();
        assert!(!stored.matches("x".to_string()).await.unwrap());
    }

    #[tokio::test]
    async fn test_db_roundtrip() {
        let stored = UserPassword::hash("rahasia-banget".to_string()).await.unwrap();
        let restored = UserPassword::from_db(stored.as_db()).unwrap();
        assert_eq!(restored, stored);
        assert!(UserPassword::from_db("plaintext").is_err());
    }
}
