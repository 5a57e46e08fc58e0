//! Get User Use Case
//!
//! Loads the profile of the authenticated caller.

use std::sync::Arc;

use kernel::db::Store;
use kernel::error::app_error::AppResult;

use crate::domain::entity::{identity::Identity, user::User};
use crate::domain::repository::UserRepository;

pub struct GetUserUseCase<S>
where
    S: Store,
    S::Executor: UserRepository,
{
    store: Arc<S>,
}

impl<S> GetUserUseCase<S>
where
    S: Store,
    S::Executor: UserRepository,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// NOTFOUND if the account vanished after the token was issued.
    pub async fn execute(&self, identity: &Identity) -> AppResult<User> {
        let mut conn = self.store.acquire().await?;
        conn.get(identity.user_id).await
    }
}
