use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Report lifecycle status
///
/// New reports start as `Reported`. An administrator may move a report to
/// any member of the set; no transition order is enforced.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReportStatus {
    #[default]
    #[display("Reported")]
    Reported,
    #[display("Under Repair")]
    #[serde(rename = "Under Repair")]
    UnderRepair,
    #[display("Completed")]
    Completed,
    #[display("Rejected")]
    Rejected,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 4] = [
        ReportStatus::Reported,
        ReportStatus::UnderRepair,
        ReportStatus::Completed,
        ReportStatus::Rejected,
    ];

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Reported => "Reported",
            ReportStatus::UnderRepair => "Under Repair",
            ReportStatus::Completed => "Completed",
            ReportStatus::Rejected => "Rejected",
        }
    }
}

impl FromStr for ReportStatus {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ReportError::UnknownStatus(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_status_from_str() {
        assert_eq!(
            "Under Repair".parse::<ReportStatus>().unwrap(),
            ReportStatus::UnderRepair
        );
        assert_eq!("Rejected".parse::<ReportStatus>().unwrap(), ReportStatus::Rejected);
        assert!(matches!(
            "under repair".parse::<ReportStatus>(),
            Err(ReportError::UnknownStatus(_))
        ));
    }

    #[test]
    fn test_report_status_serde() {
        assert_eq!(
            serde_json::to_string(&ReportStatus::UnderRepair).unwrap(),
            "\"Under Repair\""
        );
        let status: ReportStatus = serde_json::from_str("\"Completed\"").unwrap();
        assert_eq!(status, ReportStatus::Completed);
    }

    #[test]
    fn test_display_matches_wire_name() {
        for status in ReportStatus::ALL {
            assert_eq!(status.to_string(), status.as_str());
        }
        assert_eq!(ReportStatus::default(), ReportStatus::Reported);
    }
}
