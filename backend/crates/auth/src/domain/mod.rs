//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    identity::Identity,
    user::{NewUser, User},
};
pub use repository::UserRepository;
pub use value_object::user_role::UserRole;
