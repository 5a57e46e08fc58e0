//! Auth Error Types
//!
//! Auth-specific failure vocabulary. Every variant is converted into the
//! unified `kernel::error::AppError` at the point it is raised, so use case
//! and handler signatures stay on `AppResult`.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordError;
use thiserror::Error;

/// Auth-specific error variants
///
/// For client-facing variants the `Display` text is the message sent back
/// to the caller.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email already taken")]
    EmailTaken,

    #[error("Phonenumber already taken")]
    PhoneNumberTaken,

    #[error("User Not Found")]
    UserNotFound,

    /// Unknown email and wrong password are deliberately indistinguishable.
    #[error("Invalid Email or Password")]
    InvalidCredentials,

    /// Missing, malformed, forged or expired token
    #[error("Not Authorized")]
    NotAuthorized,

    #[error("Forbidden")]
    Forbidden,

    /// A protected handler ran without the auth gate in front of it
    #[error("no identity attached to the request")]
    IdentityMissing,

    #[error("unknown user role: {0}")]
    UnknownRole(String),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error("token signing failed: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::EmailTaken | AuthError::PhoneNumberTaken => ErrorKind::Conflict,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::InvalidCredentials => ErrorKind::Invalid,
            AuthError::NotAuthorized => ErrorKind::Unauthorized,
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::Password(PasswordError::HashingFailed(_) | PasswordError::InvalidDigest) => {
                ErrorKind::Internal
            }
            AuthError::Password(_) => ErrorKind::Invalid,
            AuthError::IdentityMissing | AuthError::UnknownRole(_) | AuthError::Signing(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Convert to AppError, attributed to `op`
    ///
    /// Server-side variants keep no user message and record the call site.
    #[track_caller]
    pub fn at(self, op: &'static str) -> AppError {
        match self.kind() {
            ErrorKind::Internal => AppError::internal(op, self),
            kind => {
                let message = self.to_string();
                AppError::new(kind, op, message).with_source(self)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_variants_carry_message() {
        let err = AuthError::EmailTaken.at("UserRepository::create");
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.public_messages(), vec!["Email already taken".to_string()]);

        let err = AuthError::InvalidCredentials.at("LoginUseCase::execute");
        assert_eq!(err.status_code(), 400);
        assert_eq!(
            err.public_messages(),
            vec!["Invalid Email or Password".to_string()]
        );
    }

    #[test]
    fn test_server_variants_hide_detail() {
        let err = AuthError::UnknownRole("ROOT".into()).at("UserRow::into_entity");
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(err.messages().next().is_none());
        assert!(err.location().is_some());
    }

    #[test]
    fn test_password_policy_is_invalid() {
        let err = AuthError::from(PasswordError::TooShort { min: 8, actual: 3 });
        assert_eq!(err.kind(), ErrorKind::Invalid);

        let err = AuthError::from(PasswordError::HashingFailed("oom".into()));
        assert_eq!(err.kind(), ErrorKind::Internal);
    }
}
