//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod get_user;
pub mod login;
pub mod register;
pub mod token;

use serde::Serialize;

use crate::domain::entity::user::User;

// Re-exports
pub use config::AuthConfig;
pub use get_user::GetUserUseCase;
pub use login::{LoginInput, LoginUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use token::TokenService;

/// A user together with a freshly issued token
#[derive(Debug, Clone, Serialize)]
pub struct AuthenticatedUser {
    pub user: User,
    pub token: String,
}
