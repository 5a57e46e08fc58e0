//! Token Service
//!
//! Issues and verifies HS256-signed tokens carrying the identity payload.
//! Verification never touches the store: a token is valid until it expires.

use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use kernel::error::app_error::AppResult;
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::application::config::AuthConfig;
use crate::domain::entity::identity::Identity;
use crate::domain::value_object::user_role::UserRole;
use crate::error::AuthError;

/// Signed claims
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: i64,
    email: String,
    role: String,
    /// Stringified user id
    sub: String,
    iat: i64,
    exp: i64,
}

pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(&config.jwt_secret, config.token_ttl)
    }

    /// Issue a token valid for the configured lifetime
    pub fn issue(&self, identity: &Identity) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(self.ttl.as_secs()).unwrap_or(i64::MAX);
        self.sign(identity, now, now.saturating_add(ttl))
    }

    /// Issue a token expiring at an explicit instant
    pub fn issue_with_expiry(
        &self,
        identity: &Identity,
        expires_at: DateTime<Utc>,
    ) -> AppResult<String> {
        self.sign(identity, Utc::now().timestamp(), expires_at.timestamp())
    }

    /// Verify signature and expiry and return the embedded identity
    ///
    /// Every failure is UNAUTHORIZED.
    pub fn verify(&self, token: &str) -> AppResult<Identity> {
        const OP: &str = "TokenService::verify";

        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|e| {
            tracing::debug!(error = %e, "token rejected");
            AuthError::NotAuthorized.at(OP)
        })?;
        let claims = data.claims;
        let role = UserRole::from_code(&claims.role).map_err(|_| AuthError::NotAuthorized.at(OP))?;

        Ok(Identity {
            user_id: UserId::new(claims.id),
            email: claims.email,
            role,
        })
    }

    fn sign(&self, identity: &Identity, iat: i64, exp: i64) -> AppResult<String> {
        let claims = Claims {
            id: identity.user_id.as_i64(),
            email: identity.email.clone(),
            role: identity.role.code().to_string(),
            sub: identity.user_id.to_string(),
            iat,
            exp,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::Signing(e).at("TokenService::issue"))
    }
}
