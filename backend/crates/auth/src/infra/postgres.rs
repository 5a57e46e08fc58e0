//! PostgreSQL Repository Implementations
//!
//! `UserRepository` for `kernel::db::PgExecutor`, so the same queries run on
//! a pooled connection or inside a transaction.

use chrono::{DateTime, Utc};
use kernel::db::{PgExecutor, with_deadline};
use kernel::error::app_error::{AppError, AppResult, OptionExt};
use kernel::error::conversions::{SqlxResultExt, unique_violation};
use kernel::id::UserId;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_password::UserPassword, user_role::UserRole};
use crate::error::AuthError;

const EMAIL_UNIQUE: &str = "users_email_key";
const PHONE_NUMBER_UNIQUE: &str = "users_phone_number_key";

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgExecutor {
    async fn create(&mut self, user: NewUser) -> AppResult<User> {
        const OP: &str = "UserRepository::create";

        let row = with_deadline(OP, async {
            sqlx::query_as::<_, UserRow>(
                r#"
                INSERT INTO users (name, phone_number, email, password)
                VALUES ($1, $2, $3, $4)
                RETURNING id, name, phone_number, email, password, role, created_at, updated_at
                "#,
            )
            .bind(&user.name)
            .bind(&user.phone_number)
            .bind(&user.email)
            .bind(user.password.as_db())
            .fetch_one(&mut **self)
            .await
            .map_err(|e| insert_error(OP, e))
        })
        .await?;

        row.into_user(OP)
    }

    async fn get(&mut self, id: UserId) -> AppResult<User> {
        const OP: &str = "UserRepository::get";

        let row = with_deadline(OP, async {
            sqlx::query_as::<_, UserRow>(
                r#"
                SELECT id, name, phone_number, email, password, role, created_at, updated_at
                FROM users
                WHERE id = $1
                "#,
            )
            .bind(id.as_i64())
            .fetch_optional(&mut **self)
            .await
            .or_db_err(OP)
        })
        .await?;

        row.ok_or_not_found(OP, AuthError::UserNotFound.to_string())?
            .into_user(OP)
    }

    async fn get_by_email(&mut self, email: &str) -> AppResult<User> {
        const OP: &str = "UserRepository::get_by_email";

        let row = with_deadline(OP, async {
            sqlx::query_as::<_, UserRow>(
                r#"
                SELECT id, name, phone_number, email, password, role, created_at, updated_at
                FROM users
                WHERE email = $1
                "#,
            )
            .bind(email)
            .fetch_optional(&mut **self)
            .await
            .or_db_err(OP)
        })
        .await?;

        row.ok_or_not_found(OP, AuthError::UserNotFound.to_string())?
            .into_user(OP)
    }
}

/// Unique violations name the taken field; anything else is classified generically.
#[track_caller]
fn insert_error(op: &'static str, err: sqlx::Error) -> AppError {
    let taken = match unique_violation(&err) {
        Some(EMAIL_UNIQUE) => Some(AuthError::EmailTaken),
        Some(PHONE_NUMBER_UNIQUE) => Some(AuthError::PhoneNumberTaken),
        _ => None,
    };
    match taken {
        Some(conflict) => conflict.at(op),
        None => AppError::from_sqlx(op, err),
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: i64,
    name: String,
    phone_number: String,
    email: String,
    password: String,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self, op: &'static str) -> AppResult<User> {
        Ok(User {
            id: UserId::new(self.id),
            name: self.name,
            phone_number: self.phone_number,
            email: self.email,
            password: UserPassword::from_db(self.password).map_err(|e| e.at(op))?,
            role: UserRole::from_code(&self.role).map_err(|e| e.at(op))?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
