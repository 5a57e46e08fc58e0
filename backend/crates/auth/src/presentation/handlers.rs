//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum_extra::extract::WithRejection;
use kernel::db::Store;
use kernel::error::app_error::{AppError, AppResult};
use kernel::response::ApiResponse;
use kernel::validation::validate;

use crate::application::{
    AuthenticatedUser, GetUserUseCase, LoginUseCase, RegisterUseCase, TokenService,
};
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::presentation::dto::{LoginRequest, RegisterRequest};
use crate::presentation::middleware::CurrentIdentity;

/// Shared state for user handlers
pub struct AuthAppState<S> {
    pub store: Arc<S>,
    pub tokens: Arc<TokenService>,
}

impl<S> Clone for AuthAppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/users/register
pub async fn register<S>(
    State(state): State<AuthAppState<S>>,
    WithRejection(Json(req), _): WithRejection<Json<RegisterRequest>, AppError>,
) -> AppResult<ApiResponse<AuthenticatedUser>>
where
    S: Store + Send + Sync + 'static,
    S::Executor: UserRepository,
{
    validate("UserHandler::register", &req)?;

    let use_case = RegisterUseCase::new(state.store.clone(), state.tokens.clone());
    let output = use_case.execute(req.into()).await?;

    Ok(ApiResponse::created(output))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/users/login
pub async fn login<S>(
    State(state): State<AuthAppState<S>>,
    WithRejection(Json(req), _): WithRejection<Json<LoginRequest>, AppError>,
) -> AppResult<ApiResponse<AuthenticatedUser>>
where
    S: Store + Send + Sync + 'static,
    S::Executor: UserRepository,
{
    validate("UserHandler::login", &req)?;

    let use_case = LoginUseCase::new(state.store.clone(), state.tokens.clone());
    let output = use_case.execute(req.into()).await?;

    Ok(ApiResponse::ok(output))
}

// ============================================================================
// Current User (requires authentication)
// ============================================================================

/// GET /api/users
pub async fn current_user<S>(
    State(state): State<AuthAppState<S>>,
    CurrentIdentity(identity): CurrentIdentity,
) -> AppResult<ApiResponse<User>>
where
    S: Store + Send + Sync + 'static,
    S::Executor: UserRepository,
{
    let use_case = GetUserUseCase::new(state.store.clone());
    let user = use_case.execute(&identity).await?;

    Ok(ApiResponse::ok(user))
}
