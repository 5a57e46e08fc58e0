//! HTTP Handlers

use std::sync::Arc;

use auth::{CurrentIdentity, UserRepository};
use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum_extra::extract::WithRejection;
use kernel::db::Store;
use kernel::error::app_error::{AppError, AppResult};
use kernel::id::ReportId;
use kernel::pagination::CursorQuery;
use kernel::response::ApiResponse;
use kernel::validation::validate;

use crate::application::{CreateReportUseCase, ListReportsUseCase, UpdateReportStatusUseCase};
use crate::domain::classifier::ImageClassifier;
use crate::domain::entity::report::Report;
use crate::domain::repository::ReportRepository;
use crate::domain::value_object::report_status::ReportStatus;
use crate::error::ReportError;
use crate::presentation::dto::{ReportMultipart, UpdateReportRequest};

/// Shared state for report handlers
pub struct ReportAppState<S, C> {
    pub store: Arc<S>,
    pub classifier: Arc<C>,
}

impl<S, C> Clone for ReportAppState<S, C> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            classifier: self.classifier.clone(),
        }
    }
}

// ============================================================================
// Create (requires authentication)
// ============================================================================

/// POST /api/reports
pub async fn create<S, C>(
    State(state): State<ReportAppState<S, C>>,
    CurrentIdentity(identity): CurrentIdentity,
    WithRejection(multipart, _): WithRejection<Multipart, AppError>,
) -> AppResult<ApiResponse<Report>>
where
    S: Store + Send + Sync + 'static,
    S::Executor: UserRepository + ReportRepository,
    C: ImageClassifier + Send + Sync + 'static,
{
    const OP: &str = "ReportHandler::create";

    let form = ReportMultipart::read(multipart)
        .await?
        .into_form()
        .map_err(|e| e.at(OP))?;
    validate(OP, &form)?;
    let input = form.into_input(identity.user_id).map_err(|e| e.at(OP))?;

    let use_case = CreateReportUseCase::new(state.store.clone(), state.classifier.clone());
    let report = use_case.execute(input).await?;

    Ok(ApiResponse::created(report))
}

// ============================================================================
// List
// ============================================================================

/// GET /api/reports?limit=&lastseenid=
pub async fn list_all<S, C>(
    State(state): State<ReportAppState<S, C>>,
    WithRejection(Query(query), _): WithRejection<Query<CursorQuery>, AppError>,
) -> AppResult<ApiResponse<Vec<Report>>>
where
    S: Store + Send + Sync + 'static,
    S::Executor: ReportRepository,
    C: Send + Sync + 'static,
{
    let cursor = query.into_cursor("ReportHandler::list_all")?;

    let use_case = ListReportsUseCase::new(state.store.clone());
    let reports = use_case.all(cursor).await?;

    Ok(ApiResponse::ok(reports))
}

/// GET /api/reports/history?limit=&lastseenid=
pub async fn history<S, C>(
    State(state): State<ReportAppState<S, C>>,
    CurrentIdentity(identity): CurrentIdentity,
    WithRejection(Query(query), _): WithRejection<Query<CursorQuery>, AppError>,
) -> AppResult<ApiResponse<Vec<Report>>>
where
    S: Store + Send + Sync + 'static,
    S::Executor: ReportRepository,
    C: Send + Sync + 'static,
{
    let cursor = query.into_cursor("ReportHandler::history")?;

    let use_case = ListReportsUseCase::new(state.store.clone());
    let reports = use_case.history(&identity, cursor).await?;

    Ok(ApiResponse::ok(reports))
}

// ============================================================================
// Update Status (requires ADMIN)
// ============================================================================

/// PUT /api/reports/{id}
///
/// A non-admin caller is turned away before the id is parsed or the body
/// validated.
pub async fn update_status<S, C>(
    State(state): State<ReportAppState<S, C>>,
    CurrentIdentity(identity): CurrentIdentity,
    WithRejection(Path(raw_id), _): WithRejection<Path<String>, AppError>,
    WithRejection(Json(req), _): WithRejection<Json<UpdateReportRequest>, AppError>,
) -> AppResult<ApiResponse<Report>>
where
    S: Store + Send + Sync + 'static,
    S::Executor: ReportRepository,
    C: Send + Sync + 'static,
{
    const OP: &str = "ReportHandler::update_status";

    UpdateReportStatusUseCase::<S>::authorize(&identity)?;

    let id: ReportId = raw_id
        .parse()
        .map_err(|_| ReportError::InvalidReportId.at(OP))?;
    validate(OP, &req)?;
    let status: ReportStatus = req.status.parse().map_err(|e: ReportError| e.at(OP))?;

    let use_case = UpdateReportStatusUseCase::new(state.store.clone());
    let report = use_case.execute(&identity, id, status).await?;

    Ok(ApiResponse::ok(report))
}
