//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

/// Default token lifetime (14 days)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(336 * 3600);

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Symmetric key the token service signs and verifies with
    pub jwt_secret: Vec<u8>,
    /// How long an issued token stays valid
    pub token_ttl: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Vec::new(),
            token_ttl: DEFAULT_TOKEN_TTL,
        }
    }
}

impl AuthConfig {
    /// Create config from an explicit signing key
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            ..Default::default()
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .finish()
    }
}
