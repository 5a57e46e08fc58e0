//! Register Use Case
//!
//! Creates a new user account and signs the user in.

use std::sync::Arc;

use kernel::db::Store;
use kernel::error::app_error::AppResult;

use crate::application::AuthenticatedUser;
use crate::application::token::TokenService;
use crate::domain::entity::user::NewUser;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_password::UserPassword;

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub password: String,
}

/// Register use case
pub struct RegisterUseCase<S>
where
    S: Store,
    S::Executor: UserRepository,
{
    store: Arc<S>,
    tokens: Arc<TokenService>,
}

impl<S> RegisterUseCase<S>
where
    S: Store,
    S::Executor: UserRepository,
{
    pub fn new(store: Arc<S>, tokens: Arc<TokenService>) -> Self {
        Self { store, tokens }
    }

    pub async fn execute(&self, input: RegisterInput) -> AppResult<AuthenticatedUser> {
        const OP: &str = "RegisterUseCase::execute";

        let password = UserPassword::hash(input.password).await?;
        let new_user = NewUser {
            name: input.name,
            phone_number: input.phone_number,
            email: input.email,
            password,
        };

        let user = self
            .store
            .transaction(OP, move |tx| Box::pin(async move { tx.create(new_user).await }))
            .await?;

        let token = self.tokens.issue(&user.identity())?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(AuthenticatedUser { user, token })
    }
}
