//! User Router

use std::sync::Arc;

use axum::middleware::from_fn_with_state;
use axum::{
    Router,
    routing::{get, post},
};
use kernel::db::Store;

use crate::application::TokenService;
use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthGate, require_auth};

/// Create the user router, to be nested under `/api/users`
///
/// - `POST /register`
/// - `POST /login`
/// - `GET /` (bearer token required)
pub fn user_router<S>(store: Arc<S>, tokens: Arc<TokenService>) -> Router
where
    S: Store + Send + Sync + 'static,
    S::Executor: UserRepository,
{
    let gate = AuthGate::new(tokens.clone());
    let state = AuthAppState { store, tokens };

    Router::new()
        .route("/register", post(handlers::register::<S>))
        .route("/login", post(handlers::login::<S>))
        .route(
            "/",
            get(handlers::current_user::<S>).route_layer(from_fn_with_state(gate, require_auth)),
        )
        .with_state(state)
}
