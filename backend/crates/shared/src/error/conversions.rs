//! Error conversions - Classification of foreign errors
//!
//! Maps database driver faults and framework rejections onto [`AppError`].

#[cfg(feature = "sqlx")]
use std::panic::Location;

use super::app_error::AppError;
#[cfg(feature = "sqlx")]
use super::app_error::AppResult;
#[cfg(feature = "sqlx")]
use super::kind::ErrorKind;

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// データベース系の一時障害に対するメッセージ
#[cfg(feature = "sqlx")]
pub const DATABASE_UNAVAILABLE_MESSAGE: &str = "Database unavailable, Try Again later.";

#[cfg(feature = "sqlx")]
impl AppError {
    /// `sqlx::Error` を分類して `AppError` に変換
    ///
    /// PostgreSQL のエラーコードに基づいて分類します。
    /// https://www.postgresql.org/docs/current/errcodes-appendix.html
    ///
    /// ## Arguments
    /// * `op` - 失敗した操作名
    /// * `err` - ドライバのエラー
    #[track_caller]
    pub fn from_sqlx(op: &'static str, err: sqlx::Error) -> Self {
        let location = Location::caller();
        let kind = classify_sqlx(&err);
        let app_err = match kind {
            ErrorKind::NotFound => AppError::not_found(op, "Record not found").with_source(err),
            ErrorKind::Conflict => {
                AppError::conflict(op, "Duplicate key value").with_source(err)
            }
            ErrorKind::Unavailable => {
                AppError::unavailable(op, DATABASE_UNAVAILABLE_MESSAGE).with_source(err)
            }
            _ => AppError::internal(op, err),
        };
        app_err.with_location(location)
    }
}

/// `sqlx::Error` の種別を判定
#[cfg(feature = "sqlx")]
pub fn classify_sqlx(err: &sqlx::Error) -> ErrorKind {
    match err {
        sqlx::Error::RowNotFound => ErrorKind::NotFound,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
            ErrorKind::Unavailable
        }
        sqlx::Error::Database(db_err) => match db_err.code() {
            Some(code) => match code.as_ref() {
                // Class 23 — Integrity Constraint Violation
                "23505" => ErrorKind::Conflict,
                // Class 53 — Insufficient Resources / Class 57 — Operator Intervention
                c if c.starts_with("53") || c.starts_with("57") => ErrorKind::Unavailable,
                _ => ErrorKind::Internal,
            },
            None => ErrorKind::Internal,
        },
        _ => ErrorKind::Internal,
    }
}

/// 一意制約違反の場合に制約名を返す
///
/// ## Examples
/// ```rust,ignore
/// match kernel::error::conversions::unique_violation(&err) {
///     Some("users_email_key") => AppError::conflict(OP, "Email already taken"),
///     _ => AppError::from_sqlx(OP, err),
/// }
/// ```
#[cfg(feature = "sqlx")]
pub fn unique_violation(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db_err)
            if db_err.kind() == sqlx::error::ErrorKind::UniqueViolation =>
        {
            db_err.constraint()
        }
        _ => None,
    }
}

/// `Result<T, sqlx::Error>` 用の拡張トレイト
#[cfg(feature = "sqlx")]
pub trait SqlxResultExt<T> {
    /// ドライバのエラーを分類し、操作名と呼び出し位置を付与
    fn or_db_err(self, op: &'static str) -> AppResult<T>;
}

#[cfg(feature = "sqlx")]
impl<T> SqlxResultExt<T> for Result<T, sqlx::Error> {
    #[track_caller]
    fn or_db_err(self, op: &'static str) -> AppResult<T> {
        let location = Location::caller();
        self.map_err(|e| AppError::from_sqlx(op, e).with_location(location))
    }
}

// ============================================================================
// Axum rejections (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
mod rejections {
    use axum::extract::multipart::{MultipartError, MultipartRejection};
    use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};

    use super::AppError;

    macro_rules! reject_as_invalid {
        ($($rejection:ty => $op:literal),* $(,)?) => {
            $(
                impl From<$rejection> for AppError {
                    fn from(rejection: $rejection) -> Self {
                        AppError::invalid($op, rejection.body_text())
                    }
                }
            )*
        };
    }

    reject_as_invalid! {
        JsonRejection => "extract::json",
        PathRejection => "extract::path",
        QueryRejection => "extract::query",
        MultipartRejection => "extract::multipart",
        MultipartError => "extract::multipart_field",
    }
}
