//! API DTOs (Data Transfer Objects)

use std::borrow::Cow;

use axum::extract::Multipart;
use kernel::error::app_error::AppResult;
use kernel::id::UserId;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::application::CreateReportInput;
use crate::domain::entity::report::Location;
use crate::domain::value_object::{report_status::ReportStatus, uploaded_image::UploadedImage};
use crate::error::ReportError;

// ============================================================================
// Create Report (multipart)
// ============================================================================

/// A file part of the multipart body
///
/// Serializes as its file name only, which is what a failed rule reports.
#[derive(Debug, Clone, Serialize)]
pub struct ImageField {
    pub file_name: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Raw parts of a `POST /api/reports` body, as read off the wire
#[derive(Debug, Default)]
pub struct ReportMultipart {
    pub lat: String,
    pub lng: String,
    pub address: String,
    pub note: String,
    pub image: Option<ImageField>,
}

impl ReportMultipart {
    /// Unknown parts are skipped. An `image` part without a file name is not
    /// a file and counts as missing.
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut parts = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "image" => {
                    let Some(file_name) = field.file_name().map(str::to_string) else {
                        continue;
                    };
                    let bytes = field.bytes().await?;
                    parts.image = Some(ImageField {
                        file_name,
                        bytes: bytes.to_vec(),
                    });
                }
                "lat" => parts.lat = field.text().await?,
                "lng" => parts.lng = field.text().await?,
                "address" => parts.address = field.text().await?,
                "note" => parts.note = field.text().await?,
                _ => {}
            }
        }

        Ok(parts)
    }

    pub fn into_form(self) -> Result<CreateReportForm, ReportError> {
        let image = self.image.ok_or(ReportError::ImageRequired)?;
        Ok(CreateReportForm {
            lat: self.lat,
            lng: self.lng,
            address: self.address,
            note: self.note,
            image,
        })
    }
}

/// Create report form, once an image part is known to be present
#[derive(Debug, Validate)]
pub struct CreateReportForm {
    #[validate(length(min = 1, message = "Lat is a required field"))]
    pub lat: String,
    #[validate(length(min = 1, message = "Lng is a required field"))]
    pub lng: String,
    #[validate(length(min = 4, message = "Address must be at least 4 characters in length"))]
    pub address: String,
    pub note: String,
    #[validate(custom(function = "image_not_empty"))]
    pub image: ImageField,
}

fn image_not_empty(image: &ImageField) -> Result<(), ValidationError> {
    if image.bytes.is_empty() {
        return Err(rule_error("required", "Image is a required field"));
    }
    Ok(())
}

impl CreateReportForm {
    /// Parse coordinates and check the image format.
    pub fn into_input(self, user_id: UserId) -> Result<CreateReportInput, ReportError> {
        let lat = parse_coordinate(&self.lat).ok_or(ReportError::InvalidLatitude(self.lat))?;
        let lng = parse_coordinate(&self.lng).ok_or(ReportError::InvalidLongitude(self.lng))?;
        let image = UploadedImage::new(self.image.file_name, self.image.bytes)?;

        Ok(CreateReportInput {
            user_id,
            note: self.note,
            address: self.address,
            location: Location { lat, lng },
            image,
        })
    }
}

fn parse_coordinate(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|value| value.is_finite())
}

// ============================================================================
// Update Report Status
// ============================================================================

/// Update report status request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct UpdateReportRequest {
    #[validate(custom(function = "known_status"))]
    pub status: String,
}

fn known_status(status: &str) -> Result<(), ValidationError> {
    match status.parse::<ReportStatus>() {
        Ok(_) => Ok(()),
        Err(_) => Err(rule_error(
            "oneof",
            "Status must be one of ['Reported' 'Under Repair' 'Completed' 'Rejected']",
        )),
    }
}

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}
