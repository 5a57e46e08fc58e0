//! Password Hashing and Verification
//!
//! The hashing primitive behind account registration and sign-in:
//! - [`PlainPassword`]: a normalized clear text secret, zeroized on drop
//! - [`PasswordDigest`]: an Argon2id PHC string, safe to persist
//! - [`hash`] / [`verify`]: the only two operations callers need
//!
//! Both operations are CPU bound; async callers should run them on a
//! blocking thread.

use std::fmt;

use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Minimum password length in code points
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length in code points
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("password contains invalid control characters")]
    InvalidCharacter,

    #[error("password hashing failed: {0}")]
    HashingFailed(String),

    #[error("stored password digest is not a valid PHC string")]
    InvalidDigest,
}

// ============================================================================
// Clear text
// ============================================================================

/// Clear text password, NFKC-normalized and erased from memory on drop.
///
/// Not `Clone`, and `Debug` output is redacted.
///
/// ## Examples
/// ```rust
/// use platform::password::PlainPassword;
///
/// let password = PlainPassword::new("correct horse battery".to_string()).unwrap();
/// assert_eq!(password.len(), 21);
/// ```
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PlainPassword(String);

impl PlainPassword {
    pub fn new(mut raw: String) -> Result<Self, PasswordError> {
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();
        let password = Self(normalized);

        let count = password.len();
        if count < MIN_PASSWORD_LENGTH {
            return Err(PasswordError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: count,
            });
        }
        if count > MAX_PASSWORD_LENGTH {
            return Err(PasswordError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: count,
            });
        }
        if password.0.chars().any(|c| c.is_control() && c != '\t') {
            return Err(PasswordError::InvalidCharacter);
        }

        Ok(password)
    }

    /// Length in code points
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlainPassword([REDACTED])")
    }
}

// ============================================================================
// Digest
// ============================================================================

/// Argon2id digest in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap a digest read back from storage.
    pub fn from_stored(s: impl Into<String>) -> Result<Self, PasswordError> {
        let digest = s.into();
        PasswordHash::new(&digest).map_err(|_| PasswordError::InvalidDigest)?;
        Ok(Self(digest))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest([HASH])")
    }
}

// ============================================================================
// Operations
// ============================================================================

/// Hash `password` with a fresh random salt.
pub fn hash(password: &PlainPassword) -> Result<PasswordDigest, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    let digest = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
    Ok(PasswordDigest(digest.to_string()))
}

/// Check `password` against `digest` in constant time.
pub fn verify(digest: &PasswordDigest, password: &PlainPassword) -> bool {
    match PasswordHash::new(&digest.0) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
