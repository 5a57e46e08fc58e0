//! List Reports Use Case
//!
//! Read-only, cursor paginated listings: every report, or the caller's own
//! history.

use std::sync::Arc;

use auth::Identity;
use kernel::db::Store;
use kernel::error::app_error::AppResult;
use kernel::pagination::Cursor;

use crate::domain::entity::report::Report;
use crate::domain::repository::ReportRepository;

pub struct ListReportsUseCase<S>
where
    S: Store,
    S::Executor: ReportRepository,
{
    store: Arc<S>,
}

impl<S> ListReportsUseCase<S>
where
    S: Store,
    S::Executor: ReportRepository,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn all(&self, cursor: Cursor) -> AppResult<Vec<Report>> {
        let mut conn = self.store.acquire().await?;
        conn.get_all(cursor).await
    }

    pub async fn history(&self, identity: &Identity, cursor: Cursor) -> AppResult<Vec<Report>> {
        let mut conn = self.store.acquire().await?;
        conn.get_all_by_user(identity.user_id, cursor).await
    }
}
