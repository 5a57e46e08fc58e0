//! Report Entity

use chrono::{DateTime, Utc};
use kernel::id::{ReportId, UserId};
use serde::Serialize;

use crate::domain::value_object::report_status::ReportStatus;

/// Report entity
///
/// `reporter_name` is not stored with the report; it is read from the
/// owning user, so a renamed user shows the new name on every report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: ReportId,
    #[serde(skip)]
    pub user_id: UserId,
    pub reporter_name: String,
    pub status: ReportStatus,
    pub image_url: String,
    pub classes: Vec<String>,
    pub note: String,
    pub address: String,
    pub location: Location,
    pub date_reported: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Location {
    pub lat: f64,
    pub lng: f64,
}

/// A classified report not yet persisted. Id, status and report date are
/// assigned by the store.
#[derive(Debug, Clone)]
pub struct NewReport {
    pub user_id: UserId,
    pub image_url: String,
    pub classes: Vec<String>,
    pub note: String,
    pub address: String,
    pub location: Location,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_json_shape() {
        let report = Report {
            id: ReportId::new(7),
            user_id: UserId::new(3),
            reporter_name: "Budi".into(),
            status: ReportStatus::UnderRepair,
            image_url: "https://storage.example.com/7.jpg".into(),
            classes: vec!["pothole".into()],
            note: String::new(),
            address: "mataram".into(),
            location: Location {
                lat: -7.666369905243495,
                lng: 110.66331442645793,
            },
            date_reported: Utc::now(),
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["reporterName"], "Budi");
        assert_eq!(json["status"], "Under Repair");
        assert_eq!(json["imageUrl"], "https://storage.example.com/7.jpg");
        assert_eq!(json["location"]["lat"], -7.666369905243495);
        assert!(json["dateReported"].is_string());
        assert!(json.get("userId").is_none());
    }
}
