//! Update Report Status Use Case
//!
//! Administrators move a report through its lifecycle.

use std::sync::Arc;

use auth::Identity;
use kernel::db::Store;
use kernel::error::app_error::AppResult;
use kernel::id::ReportId;

use crate::domain::entity::report::Report;
use crate::domain::repository::ReportRepository;
use crate::domain::value_object::report_status::ReportStatus;
use crate::error::ReportError;

pub struct UpdateReportStatusUseCase<S>
where
    S: Store,
    S::Executor: ReportRepository,
{
    store: Arc<S>,
}

impl<S> UpdateReportStatusUseCase<S>
where
    S: Store,
    S::Executor: ReportRepository,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// FORBIDDEN unless the caller is an administrator.
    pub fn authorize(identity: &Identity) -> AppResult<()> {
        if identity.is_admin() {
            Ok(())
        } else {
            Err(ReportError::Forbidden.at("UpdateReportStatusUseCase::authorize"))
        }
    }

    pub async fn execute(
        &self,
        identity: &Identity,
        id: ReportId,
        status: ReportStatus,
    ) -> AppResult<Report> {
        Self::authorize(identity)?;

        let mut conn = self.store.acquire().await?;
        let report = conn.update_status(id, status).await?;

        tracing::info!(
            report_id = %report.id,
            status = %report.status,
            admin_id = %identity.user_id,
            "Report status updated"
        );

        Ok(report)
    }
}
