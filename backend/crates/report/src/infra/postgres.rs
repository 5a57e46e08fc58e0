//! PostgreSQL Repository Implementations
//!
//! `ReportRepository` for `kernel::db::PgExecutor`. List and update queries
//! join `users` for the reporter name.

use chrono::{DateTime, Utc};
use kernel::db::{PgExecutor, with_deadline};
use kernel::error::app_error::{AppResult, OptionExt};
use kernel::error::conversions::SqlxResultExt;
use kernel::id::{ReportId, UserId};
use kernel::pagination::Cursor;

use crate::domain::entity::report::{Location, NewReport, Report};
use crate::domain::repository::ReportRepository;
use crate::domain::value_object::report_status::ReportStatus;
use crate::error::ReportError;

// ============================================================================
// Report Repository Implementation
// ============================================================================

impl ReportRepository for PgExecutor {
    async fn create(&mut self, report: NewReport) -> AppResult<Report> {
        const OP: &str = "ReportRepository::create";

        let row = with_deadline(OP, async {
            sqlx::query_as::<_, ReportRow>(
                r#"
                INSERT INTO reports (image_url, classes, note, address, lat, lng, user_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id, user_id, status, image_url, classes, note, address, lat, lng, date_reported
                "#,
            )
            .bind(&report.image_url)
            .bind(&report.classes)
            .bind(&report.note)
            .bind(&report.address)
            .bind(report.location.lat)
            .bind(report.location.lng)
            .bind(report.user_id.as_i64())
            .fetch_one(&mut **self)
            .await
            .or_db_err(OP)
        })
        .await?;

        row.into_report(OP)
    }

    async fn get_all(&mut self, cursor: Cursor) -> AppResult<Vec<Report>> {
        const OP: &str = "ReportRepository::get_all";

        let rows = with_deadline(OP, async {
            sqlx::query_as::<_, ReportRow>(
                r#"
                SELECT r.id, r.user_id, u.name AS reporter_name, r.status, r.image_url,
                       r.classes, r.note, r.address, r.lat, r.lng, r.date_reported
                FROM reports AS r
                JOIN users AS u ON u.id = r.user_id
                WHERE ($1::BIGINT IS NULL OR r.id < $1)
                ORDER BY r.id DESC
                LIMIT $2
                "#,
            )
            .bind(cursor.before())
            .bind(cursor.limit())
            .fetch_all(&mut **self)
            .await
            .or_db_err(OP)
        })
        .await?;

        rows.into_iter().map(|row| row.into_report(OP)).collect()
    }

    async fn get_all_by_user(&mut self, user_id: UserId, cursor: Cursor) -> AppResult<Vec<Report>> {
        const OP: &str = "ReportRepository::get_all_by_user";

        let rows = with_deadline(OP, async {
            sqlx::query_as::<_, ReportRow>(
                r#"
                SELECT r.id, r.user_id, u.name AS reporter_name, r.status, r.image_url,
                       r.classes, r.note, r.address, r.lat, r.lng, r.date_reported
                FROM reports AS r
                JOIN users AS u ON u.id = r.user_id
                WHERE r.user_id = $1
                  AND ($2::BIGINT IS NULL OR r.id < $2)
                ORDER BY r.id DESC
                LIMIT $3
                "#,
            )
            .bind(user_id.as_i64())
            .bind(cursor.before())
            .bind(cursor.limit())
            .fetch_all(&mut **self)
            .await
            .or_db_err(OP)
        })
        .await?;

        rows.into_iter().map(|row| row.into_report(OP)).collect()
    }

    async fn update_status(&mut self, id: ReportId, status: ReportStatus) -> AppResult<Report> {
        const OP: &str = "ReportRepository::update_status";

        let row = with_deadline(OP, async {
            sqlx::query_as::<_, ReportRow>(
                r#"
                WITH updated AS (
                    UPDATE reports
                    SET status = $1
                    WHERE id = $2
                    RETURNING id, user_id, status, image_url, classes, note, address, lat, lng, date_reported
                )
                SELECT r.id, r.user_id, u.name AS reporter_name, r.status, r.image_url,
                       r.classes, r.note, r.address, r.lat, r.lng, r.date_reported
                FROM updated AS r
                JOIN users AS u ON u.id = r.user_id
                "#,
            )
            .bind(status.as_str())
            .bind(id.as_i64())
            .fetch_optional(&mut **self)
            .await
            .or_db_err(OP)
        })
        .await?;

        row.ok_or_not_found(OP, ReportError::ReportNotFound.to_string())?
            .into_report(OP)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ReportRow {
    id: i64,
    user_id: i64,
    /// Absent from `INSERT ... RETURNING`
    #[sqlx(default)]
    reporter_name: String,
    status: String,
    image_url: String,
    classes: Vec<String>,
    note: String,
    address: String,
    lat: f64,
    lng: f64,
    date_reported: DateTime<Utc>,
}

impl ReportRow {
    fn into_report(self, op: &'static str) -> AppResult<Report> {
        Ok(Report {
            id: ReportId::new(self.id),
            user_id: UserId::new(self.user_id),
            reporter_name: self.reporter_name,
            status: self.status.parse().map_err(|e: ReportError| e.at(op))?,
            image_url: self.image_url,
            classes: self.classes,
            note: self.note,
            address: self.address,
            location: Location {
                lat: self.lat,
                lng: self.lng,
            },
            date_reported: self.date_reported,
        })
    }
}
