//! API DTOs (Data Transfer Objects)
//!
//! Absent fields deserialize as empty strings so the validation rules, not
//! the JSON decoder, decide what the caller is told.

use serde::Deserialize;
use validator::Validate;

use crate::application::{LoginInput, RegisterInput};

// ============================================================================
// Register
// ============================================================================

/// Register request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 4, message = "Name must be at least 4 characters in length"))]
    pub name: String,
    #[validate(length(
        min = 10,
        max = 15,
        message = "PhoneNumber must be between 10 and 15 characters in length"
    ))]
    pub phone_number: String,
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters in length"))]
    pub password: String,
}

impl From<RegisterRequest> for RegisterInput {
    fn from(req: RegisterRequest) -> Self {
        Self {
            name: req.name,
            phone_number: req.phone_number,
            email: req.email,
            password: req.password,
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// Login request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct LoginRequest {
    #[validate(email(message = "Email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters in length"))]
    pub password: String,
}

impl From<LoginRequest> for LoginInput {
    fn from(req: LoginRequest) -> Self {
        Self {
            email: req.email,
            password: req.password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_camel_case() {
        let req: RegisterRequest = serde_json::from_str(
            r#"{"name":"Budi","phoneNumber":"081234567890","email":"budi@example.com","password":"rahasia-banget"}"#,
        )
        .unwrap();
        assert_eq!(req.phone_number, "081234567890");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_register_request_missing_fields_fail_validation() {
        let req: RegisterRequest = serde_json::from_str("{}").unwrap();
        let errors = req.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 4);
    }

    #[test]
    fn test_phone_number_bounds() {
        let mut req = RegisterRequest {
            name: "Budi".into(),
            phone_number: "0812".into(),
            email: "budi@example.com".into(),
            password: "rahasia-banget".into(),
        };
        assert!(req.validate().is_err());

        req.phone_number = "0812345678901234".into();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_login_request() {
        let req = LoginRequest {
            email: "not-an-email".into(),
            password: "short".into(),
        };
        assert_eq!(req.validate().unwrap_err().field_errors().len(), 2);
    }
}
