//! Login Use Case
//!
//! Authenticates a user by email and password.

use std::sync::Arc;

use kernel::db::Store;
use kernel::error::{app_error::AppResult, kind::ErrorKind};

use crate::application::AuthenticatedUser;
use crate::application::token::TokenService;
use crate::domain::repository::UserRepository;
use crate::error::AuthError;

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login use case
pub struct LoginUseCase<S>
where
    S: Store,
    S::Executor: UserRepository,
{
    store: Arc<S>,
    tokens: Arc<TokenService>,
}

impl<S> LoginUseCase<S>
where
    S: Store,
    S::Executor: UserRepository,
{
    pub fn new(store: Arc<S>, tokens: Arc<TokenService>) -> Self {
        Self { store, tokens }
    }

    /// Unknown email and wrong password both fail with the same
    /// INVALID "Invalid Email or Password".
    pub async fn execute(&self, input: LoginInput) -> AppResult<AuthenticatedUser> {
        const OP: &str = "LoginUseCase::execute";

        let user = {
            let mut conn = self.store.acquire().await?;
            match conn.get_by_email(&input.email).await {
                Ok(user) => user,
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    return Err(AuthError::InvalidCredentials.at(OP));
                }
                Err(e) => return Err(e),
            }
        };

        if !user.password.matches(input.password).await? {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(AuthError::InvalidCredentials.at(OP));
        }

        let token = self.tokens.issue(&user.identity())?;

        tracing::info!(user_id = %user.id, "User signed in");

        Ok(AuthenticatedUser { user, token })
    }
}
