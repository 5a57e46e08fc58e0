//! Report Router

use std::sync::Arc;

use auth::{AuthGate, TokenService, UserRepository, require_auth};
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::{
    Router,
    routing::{get, post, put},
};
use kernel::db::Store;

use crate::application::ReportConfig;
use crate::domain::classifier::ImageClassifier;
use crate::domain::repository::ReportRepository;
use crate::presentation::handlers::{self, ReportAppState};

/// Create the report router, to be nested under `/api/reports`
///
/// - `POST /` (bearer token, multipart, body capped at `max_upload_bytes`)
/// - `GET /`
/// - `GET /history` (bearer token)
/// - `PUT /{id}` (bearer token, ADMIN)
pub fn report_router<S, C>(
    store: Arc<S>,
    classifier: Arc<C>,
    tokens: Arc<TokenService>,
    config: &ReportConfig,
) -> Router
where
    S: Store + Send + Sync + 'static,
    S::Executor: UserRepository + ReportRepository,
    C: ImageClassifier + Send + Sync + 'static,
{
    let gate = AuthGate::new(tokens);
    let state = ReportAppState { store, classifier };

    Router::new()
        .route(
            "/",
            post(handlers::create::<S, C>)
                .layer(DefaultBodyLimit::max(config.max_upload_bytes))
                .route_layer(from_fn_with_state(gate.clone(), require_auth))
                .get(handlers::list_all::<S, C>),
        )
        .route(
            "/history",
            get(handlers::history::<S, C>)
                .route_layer(from_fn_with_state(gate.clone(), require_auth)),
        )
        .route(
            "/{id}",
            put(handlers::update_status::<S, C>)
                .route_layer(from_fn_with_state(gate, require_auth)),
        )
        .with_state(state)
}
