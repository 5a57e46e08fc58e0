//! Report Error Types
//!
//! Converted into `kernel::error::AppError` where raised, like the auth
//! crate's `AuthError`.

use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Report-specific error variants
///
/// For client-facing variants the `Display` text is the message sent back
/// to the caller.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Report Not Found")]
    ReportNotFound,

    #[error("Invalid report id")]
    InvalidReportId,

    #[error("Image is Required")]
    ImageRequired,

    #[error("{0} format not supported")]
    UnsupportedFormat(String),

    #[error("Invalid {0} as argument for Latitude. Latitude must be float.")]
    InvalidLatitude(String),

    #[error("Invalid {0} as argument for Longitude. Longitude must be float.")]
    InvalidLongitude(String),

    /// Status updates are reserved for administrators
    #[error("Forbidden")]
    Forbidden,

    #[error("Timed out when trying to predict image. Please Try Again")]
    PredictionTimeout(#[source] reqwest::Error),

    #[error("prediction request failed: {0}")]
    Prediction(#[source] reqwest::Error),

    #[error("prediction service answered {0} instead of 200 OK")]
    PredictionStatus(u16),

    #[error("prediction response could not be decoded: {0}")]
    MalformedPrediction(#[source] serde_json::Error),

    #[error("unknown report status: {0}")]
    UnknownStatus(String),
}

impl ReportError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReportError::ReportNotFound => ErrorKind::NotFound,
            ReportError::InvalidReportId
            | ReportError::ImageRequired
            | ReportError::UnsupportedFormat(_)
            | ReportError::InvalidLatitude(_)
            | ReportError::InvalidLongitude(_) => ErrorKind::Invalid,
            ReportError::Forbidden => ErrorKind::Forbidden,
            ReportError::PredictionTimeout(_) => ErrorKind::Unavailable,
            ReportError::Prediction(_)
            | ReportError::PredictionStatus(_)
            | ReportError::MalformedPrediction(_)
            | ReportError::UnknownStatus(_) => ErrorKind::Internal,
        }
    }

    /// Convert to AppError, attributed to `op`
    #[track_caller]
    pub fn at(self, op: &'static str) -> AppError {
        match self.kind() {
            ErrorKind::Internal => AppError::internal(op, self),
            kind => {
                let message = self.to_string();
                AppError::new(kind, op, message).with_source(self)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ReportError::InvalidLatitude("abc".into()).at("ReportHandler::create");
        assert_eq!(err.kind(), ErrorKind::Invalid);
        assert_eq!(
            err.public_messages(),
            vec!["Invalid abc as argument for Latitude. Latitude must be float.".to_string()]
        );

        let err = ReportError::UnsupportedFormat("gif".into()).at("UploadedImage::new");
        assert_eq!(err.public_messages(), vec!["gif format not supported".to_string()]);
    }

    #[test]
    fn test_server_variants_hide_detail() {
        let err = ReportError::PredictionStatus(502).at("HttpClassifier::classify");
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(err.messages().next().is_none());
        assert!(err.location().is_some());
    }

    #[test]
    fn test_forbidden_and_not_found() {
        assert_eq!(ReportError::Forbidden.at("op").status_code(), 403);
        assert_eq!(ReportError::ReportNotFound.at("op").status_code(), 404);
    }
}
