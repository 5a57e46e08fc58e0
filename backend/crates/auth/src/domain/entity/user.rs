//! User Entity

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::Serialize;

use crate::domain::entity::identity::Identity;
use crate::domain::value_object::{user_password::UserPassword, user_role::UserRole};

/// User entity
///
/// Serialized as the public profile; the password digest and role never
/// leave the service.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub phone_number: String,
    /// Unique
    pub email: String,
    #[serde(skip)]
    pub password: UserPassword,
    #[serde(skip)]
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Identity payload to embed in a token for this user
    pub fn identity(&self) -> Identity {
        Identity {
            user_id: self.id,
            email: self.email.clone(),
            role: self.role,
        }
    }
}

/// A user not yet persisted. Id, role and timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub phone_number: String,
    pub email: String,
    pub password: UserPassword,
}
