//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and the token service
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, auth gate, router
//!
//! ## Features
//! - User registration and sign-in with email + password
//! - Stateless HS256 tokens carrying `{id, email, role}`, valid for 14 days
//! - Auth gate middleware shared with other routers
//! - Role check helpers (User, Admin)
//!
//! ## Security Model
//! - Passwords hashed with Argon2id off the async runtime
//! - Unknown email and wrong password are reported identically
//! - Tokens are self-certifying: no store lookup on verification

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{AuthConfig, TokenService};
pub use domain::{Identity, UserRepository, UserRole};
pub use error::AuthError;
pub use presentation::middleware::{AuthGate, CurrentIdentity, require_auth};
pub use presentation::router::user_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
