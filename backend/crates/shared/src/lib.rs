//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Common error types and result aliases
//! - The response envelope every handler answers with
//! - Typed ids and the pagination cursor
//! - The validation bridge and the executor / transaction capability
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod pagination;
pub mod validation;

#[cfg(feature = "sqlx")]
pub mod db;
#[cfg(feature = "axum")]
pub mod response;

pub use error::app_error::{AppError, AppResult, OptionExt, ResultExt};
pub use error::kind::ErrorKind;
