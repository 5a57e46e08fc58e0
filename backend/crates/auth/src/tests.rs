//! Scenario tests for the auth crate
//! Drives the real router against an in-memory store.

#[cfg(test)]
mod support {
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use chrono::Utc;
    use kernel::db::{Store, TxFuture, UnitOfWork, run_body, settle};
    use kernel::error::app_error::AppResult;
    use kernel::id::UserId;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::application::TokenService;
    use crate::application::config::DEFAULT_TOKEN_TTL;
    use crate::domain::entity::user::{NewUser, User};
    use crate::domain::repository::UserRepository;
    use crate::domain::value_object::user_role::UserRole;
    use crate::error::AuthError;
    use crate::presentation::router::user_router;

    pub const SECRET: &[u8] = b"test-signing-key";

    #[derive(Clone, Default)]
    pub struct Tables {
        pub users: Vec<User>,
        next_id: i64,
    }

    /// Store whose transactions work on a staged copy, published on commit.
    ///
    /// Transactions take turns, so a commit never overwrites another one.
    #[derive(Clone, Default)]
    pub struct MemStore {
        pub tables: Arc<Mutex<Tables>>,
        tx_turn: Arc<tokio::sync::Mutex<()>>,
    }

    impl MemStore {
        pub fn user_count(&self) -> usize {
            self.tables.lock().unwrap().users.len()
        }

        pub fn remove_user(&self, email: &str) {
            self.tables.lock().unwrap().users.retain(|u| u.email != email);
        }
    }

    pub struct MemExecutor {
        shared: Arc<Mutex<Tables>>,
        staged: Option<Tables>,
    }

    impl MemExecutor {
        fn with<R>(&mut self, f: impl FnOnce(&mut Tables) -> R) -> R {
            match &mut self.staged {
                Some(tables) => f(tables),
                None => f(&mut self.shared.lock().unwrap()),
            }
        }
    }

    impl Store for MemStore {
        type Executor = MemExecutor;

        async fn acquire(&self) -> AppResult<MemExecutor> {
            Ok(MemExecutor {
                shared: self.tables.clone(),
                staged: None,
            })
        }

        async fn transaction<T, F>(&self, op: &'static str, f: F) -> AppResult<T>
        where
            T: Send,
            F: for<'e> FnOnce(&'e mut Self::Executor) -> TxFuture<'e, T> + Send,
        {
            let _turn = self.tx_turn.lock().await;
            let staged = self.tables.lock().unwrap().clone();
            let mut tx = MemExecutor {
                shared: self.tables.clone(),
                staged: Some(staged),
            };
            let outcome = run_body(f(&mut tx)).await;
            let unit = Staged {
                shared: tx.shared,
                tables: tx.staged,
            };
            settle(op, unit, outcome).await
        }
    }

    struct Staged {
        shared: Arc<Mutex<Tables>>,
        tables: Option<Tables>,
    }

    impl UnitOfWork for Staged {
        async fn commit(self, _op: &'static str) -> AppResult<()> {
            if let Some(tables) = self.tables {
                *self.shared.lock().unwrap() = tables;
            }
            Ok(())
        }

        async fn rollback(self, _op: &'static str) {}
    }

    impl UserRepository for MemExecutor {
        async fn create(&mut self, user: NewUser) -> AppResult<User> {
            const OP: &str = "MemExecutor::create";
            self.with(|tables| {
                if tables.users.iter().any(|u| u.email == user.email) {
                    return Err(AuthError::EmailTaken.at(OP));
                }
                if tables.users.iter().any(|u| u.phone_number == user.phone_number) {
                    return Err(AuthError::PhoneNumberTaken.at(OP));
                }
                tables.next_id += 1;
                let now = Utc::now();
                let created = User {
                    id: UserId::new(tables.next_id),
                    name: user.name,
                    phone_number: user.phone_number,
                    email: user.email,
                    password: user.password,
                    role: UserRole::User,
                    created_at: now,
                    updated_at: now,
                };
                tables.users.push(created.clone());
                Ok(created)
            })
        }

        async fn get(&mut self, id: UserId) -> AppResult<User> {
            self.with(|tables| tables.users.iter().find(|u| u.id == id).cloned())
                .ok_or_else(|| AuthError::UserNotFound.at("MemExecutor::get"))
        }

        async fn get_by_email(&mut self, email: &str) -> AppResult<User> {
            self.with(|tables| tables.users.iter().find(|u| u.email == email).cloned())
                .ok_or_else(|| AuthError::UserNotFound.at("MemExecutor::get_by_email"))
        }
    }

    pub fn tokens() -> Arc<TokenService> {
        Arc::new(TokenService::new(SECRET, DEFAULT_TOKEN_TTL))
    }

    pub fn app(store: &MemStore) -> Router {
        Router::new().nest(
            "/api/users",
            user_router(Arc::new(store.clone()), tokens()),
        )
    }

    pub fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub fn get_with_token(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    pub async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    pub fn budi() -> Value {
        serde_json::json!({
            "name": "Budi Santoso",
            "phoneNumber": "081234567890",
            "email": "budi@example.com",
            "password": "rahasia-banget",
        })
    }
}

#[cfg(test)]
mod register_tests {
    use axum::http::StatusCode;
    use axum::body::Body;
    use axum::http::Request;

    use super::support::*;

    #[tokio::test]
    async fn test_register_returns_user_and_token() {
        let store = MemStore::default();
        let app = app(&store);

        let (status, body) = send(&app, post_json("/api/users/register", budi())).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], 201);
        assert_eq!(body["message"], "Created");
        assert_eq!(body["data"]["user"]["email"], "budi@example.com");
        assert_eq!(body["data"]["user"]["phoneNumber"], "081234567890");
        assert!(!body["data"]["token"].as_str().unwrap().is_empty());
        assert!(body["data"]["user"].get("password").is_none());
        assert!(body["data"]["user"].get("role").is_none());
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn test_register_same_email_twice_conflicts() {
        let store = MemStore::default();
        let app = app(&store);

        let (status, _) = send(&app, post_json("/api/users/register", budi())).await;
        assert_eq!(status, StatusCode::CREATED);

        let mut again = budi();
        again["phoneNumber"] = "089999999999".into();
        let (status, body) = send(&app, post_json("/api/users/register", again)).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "CONFLICT");
        assert_eq!(body["errors"][0], "Email already taken");
        assert_eq!(store.user_count(), 1);
    }

    #[tokio::test]
    async fn test_register_same_phone_number_conflicts() {
        let store = MemStore::default();
        let app = app(&store);
        send(&app, post_json("/api/users/register", budi())).await;

        let mut again = budi();
        again["email"] = "siti@example.com".into();
        let (status, body) = send(&app, post_json("/api/users/register", again)).await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["errors"][0], "Phonenumber already taken");
    }

    #[tokio::test]
    async fn test_register_validation_failure_lists_every_field() {
        let store = MemStore::default();
        let app = app(&store);

        let body = serde_json::json!({ "name": "Bu", "email": "nope" });
        let (status, body) = send(&app, post_json("/api/users/register", body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "INVALID");
        let errors = body["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[0], "Email must be a valid email address");
        assert_eq!(store.user_count(), 0);
    }

    #[tokio::test]
    async fn test_register_malformed_json_is_invalid() {
        let store = MemStore::default();
        let app = app(&store);

        let req = Request::builder()
            .method("POST")
            .uri("/api/users/register")
            .header("content-type", "application/json")
            .body(Body::from("{\"name\":"))
            .unwrap();
        let (status, body) = send(&app, req).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "INVALID");
        assert_eq!(body["errors"].as_array().unwrap().len(), 1);
    }
}

#[cfg(test)]
mod login_tests {
    use axum::http::StatusCode;

    use super::support::*;

    #[tokio::test]
    async fn test_login_success() {
        let store = MemStore::default();
        let app = app(&store);
        send(&app, post_json("/api/users/register", budi())).await;

        let credentials = serde_json::json!({
            "email": "budi@example.com",
            "password": "rahasia-banget",
        });
        let (status, body) = send(&app, post_json("/api/users/login", credentials)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "OK");
        assert_eq!(body["data"]["user"]["name"], "Budi Santoso");

        let token = body["data"]["token"].as_str().unwrap();
        let identity = tokens().verify(token).unwrap();
        assert_eq!(identity.email, "budi@example.com");
    }

    #[tokio::test]
    async fn test_login_unknown_email_and_wrong_password_look_the_same() {
        let store = MemStore::default();
        let app = app(&store);
        send(&app, post_json("/api/users/register", budi())).await;

        let wrong_password = serde_json::json!({
            "email": "budi@example.com",
            "password": "bukan-rahasia",
        });
        let unknown_email = serde_json::json!({
            "email": "siapa@example.com",
            "password": "rahasia-banget",
        });

        let (status_a, body_a) = send(&app, post_json("/api/users/login", wrong_password)).await;
        let (status_b, body_b) = send(&app, post_json("/api/users/login", unknown_email)).await;

        assert_eq!(status_a, StatusCode::BAD_REQUEST);
        assert_eq!(status_b, StatusCode::BAD_REQUEST);
        assert_eq!(body_a, body_b);
        assert_eq!(body_a["errors"][0], "Invalid Email or Password");
    }

    #[tokio::test]
    async fn test_login_validation() {
        let store = MemStore::default();
        let app = app(&store);

        let (status, body) = send(
            &app,
            post_json("/api/users/login", serde_json::json!({ "email": "budi@example.com" })),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["errors"][0],
            "Password must be at least 8 characters in length"
        );
    }
}

#[cfg(test)]
mod current_user_tests {
    use axum::http::StatusCode;
    use chrono::{Duration, Utc};

    use super::support::*;

    async fn registered_token(app: &axum::Router) -> String {
        let (_, body) = send(app, post_json("/api/users/register", budi())).await;
        body["data"]["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_current_user_with_token() {
        let store = MemStore::default();
        let app = app(&store);
        let token = registered_token(&app).await;

        let (status, body) = send(&app, get_with_token("/api/users", Some(&token))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["email"], "budi@example.com");
        assert!(body["data"]["createdAt"].is_string());
    }

    #[tokio::test]
    async fn test_current_user_without_token() {
        let store = MemStore::default();
        let app = app(&store);

        let (status, body) = send(&app, get_with_token("/api/users", None)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "UNAUTHORIZED");
        assert_eq!(body["errors"][0], "Not Authorized");
    }

    #[tokio::test]
    async fn test_current_user_with_expired_token() {
        let store = MemStore::default();
        let app = app(&store);
        let token = registered_token(&app).await;

        let identity = tokens().verify(&token).unwrap();
        let expired = tokens()
            .issue_with_expiry(&identity, Utc::now() - Duration::minutes(1))
            .unwrap();

        let (status, _) = send(&app, get_with_token("/api/users", Some(&expired))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_current_user_deleted_after_issuance() {
        let store = MemStore::default();
        let app = app(&store);
        let token = registered_token(&app).await;
        store.remove_user("budi@example.com");

        let (status, body) = send(&app, get_with_token("/api/users", Some(&token))).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["errors"][0], "User Not Found");
    }
}
