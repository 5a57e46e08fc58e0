//! Domain Layer
//!
//! Contains entities, value objects, the repository trait and the
//! classifier capability.

pub mod classifier;
pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use classifier::{Classification, ImageClassifier};
pub use entity::report::{Location, NewReport, Report};
pub use repository::ReportRepository;
pub use value_object::{
    report_status::ReportStatus,
    uploaded_image::{ImageFormat, UploadedImage},
};
