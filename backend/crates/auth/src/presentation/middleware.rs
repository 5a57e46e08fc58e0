//! Auth Gate
//!
//! Middleware for requiring a bearer token on protected routes, and the
//! extractor protected handlers read the caller's identity from.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, request::Parts};
use axum::middleware::Next;
use axum::response::Response;
use kernel::error::app_error::AppError;

use crate::application::token::TokenService;
use crate::domain::entity::identity::Identity;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthGate {
    tokens: Arc<TokenService>,
}

impl AuthGate {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

/// Middleware that requires a valid `Authorization: Bearer <token>` header
///
/// On success the verified [`Identity`] is attached to the request
/// extensions; otherwise the request is answered with UNAUTHORIZED and the
/// inner handler never runs.
pub async fn require_auth(
    State(gate): State<AuthGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    const OP: &str = "require_auth";

    let identity = {
        let token = bearer_token(req.headers()).ok_or_else(|| AuthError::NotAuthorized.at(OP))?;
        gate.tokens.verify(token)?
    };

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme == "Bearer" && !token.is_empty() && !token.contains(' ')).then_some(token)
}

/// The authenticated caller
///
/// Only valid behind [`require_auth`]; reaching a handler without an
/// attached identity is an INTERNAL error.
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(CurrentIdentity)
            .ok_or_else(|| AuthError::IdentityMissing.at("CurrentIdentity::from_request_parts"))
    }
}
