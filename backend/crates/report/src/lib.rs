//! Report Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Report entity, status, uploaded image, repository and
//!   classifier traits
//! - `application/` - Use cases and configuration
//! - `infra/` - PostgreSQL gateway, HTTP prediction client
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Geo-tagged photo reports, classified by an external prediction service
//! - Cursor pagination over all reports and over the caller's own history
//! - Status lifecycle (`Reported`, `Under Repair`, `Completed`, `Rejected`)
//!   driven by administrators

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::ReportConfig;
pub use domain::{ImageClassifier, Report, ReportRepository, ReportStatus};
pub use error::ReportError;
pub use infra::HttpClassifier;
pub use presentation::report_router;
