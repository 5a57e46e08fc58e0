//! Image Classification
//!
//! The external service that stores an uploaded photo and labels the road
//! damage on it.

use kernel::error::app_error::AppResult;

use crate::domain::value_object::uploaded_image::UploadedImage;

/// Outcome of classifying one image
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Canonical URL of the stored image
    pub image_url: String,
    /// Damage labels, most relevant first
    pub classes: Vec<String>,
    pub score: f64,
}

/// Image classifier trait
///
/// Failures keep their own kind: UNAVAILABLE on timeout, INTERNAL when the
/// service misbehaves.
#[trait_variant::make(ImageClassifier: Send)]
pub trait LocalImageClassifier {
    async fn classify(&self, image: UploadedImage) -> AppResult<Classification>;
}
