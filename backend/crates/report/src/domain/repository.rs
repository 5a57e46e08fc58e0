//! Repository Traits
//!
//! Same executor convention as the auth crate: `&mut self` is either a bare
//! connection or an open transaction.

use kernel::error::app_error::AppResult;
use kernel::id::{ReportId, UserId};
use kernel::pagination::Cursor;

use crate::domain::entity::report::{NewReport, Report};
use crate::domain::value_object::report_status::ReportStatus;

/// Report repository trait
///
/// List operations return reports ordered by id descending, restricted by
/// `cursor`; no match is an empty list.
#[trait_variant::make(ReportRepository: Send)]
pub trait LocalReportRepository {
    /// Insert a report. `reporter_name` of the result is left empty.
    async fn create(&mut self, report: NewReport) -> AppResult<Report>;

    async fn get_all(&mut self, cursor: Cursor) -> AppResult<Vec<Report>>;

    async fn get_all_by_user(&mut self, user_id: UserId, cursor: Cursor) -> AppResult<Vec<Report>>;

    /// NOTFOUND "Report Not Found" when no report has this id.
    async fn update_status(&mut self, id: ReportId, status: ReportStatus) -> AppResult<Report>;
}
