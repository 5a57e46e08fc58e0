//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//!
//! Operations take `&mut self` on an *executor* (see `kernel::db`), so the
//! same call runs on a bare connection or inside a transaction.

use kernel::error::app_error::AppResult;
use kernel::id::UserId;

use crate::domain::entity::user::{NewUser, User};

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user
    ///
    /// CONFLICT when the email or phone number is already registered.
    async fn create(&mut self, user: NewUser) -> AppResult<User>;

    /// NOTFOUND when no user has this id.
    async fn get(&mut self, id: UserId) -> AppResult<User>;

    /// NOTFOUND when no user has this email.
    async fn get_by_email(&mut self, email: &str) -> AppResult<User>;
}
