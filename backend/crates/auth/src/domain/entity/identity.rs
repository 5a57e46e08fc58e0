//! Identity Payload
//!
//! The authenticated caller, as carried inside a signed token and attached
//! to the request by the auth gate.

use kernel::id::UserId;

use crate::domain::value_object::user_role::UserRole;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub email: String,
    pub role: UserRole,
}

impl Identity {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
