use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::AuthError;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    #[default]
    #[display("USER")]
    User,
    #[display("ADMIN")]
    Admin,
}

impl UserRole {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
        }
    }

    #[inline]
    pub const fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn from_code(code: &str) -> Result<Self, AuthError> {
        match code {
            "USER" => Ok(UserRole::User),
            "ADMIN" => Ok(UserRole::Admin),
            other => Err(AuthError::UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_role_from_code() {
        assert_eq!(UserRole::from_code("USER").unwrap(), UserRole::User);
        assert_eq!(UserRole::from_code("ADMIN").unwrap(), UserRole::Admin);
        assert!(matches!(
            UserRole::from_code("admin"),
            Err(AuthError::UnknownRole(_))
        ));
    }

    #[test]
    fn test_user_role_display() {
        assert_eq!(UserRole::User.to_string(), "USER");
        assert_eq!(UserRole::Admin.to_string(), UserRole::Admin.code());
    }

    #[test]
    fn test_user_role_serde() {
        assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"ADMIN\"");
        let role: UserRole = serde_json::from_str("\"USER\"").unwrap();
        assert_eq!(role, UserRole::User);
    }

    #[test]
    fn test_user_role_checks() {
        assert!(!UserRole::User.is_admin());
        assert!(UserRole::Admin.is_admin());
        assert_eq!(UserRole::default(), UserRole::User);
    }
}
