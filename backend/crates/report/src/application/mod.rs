//! Application Layer
//!
//! Use cases and configuration.

pub mod config;
pub mod create_report;
pub mod list_reports;
pub mod update_status;

// Re-exports
pub use config::ReportConfig;
pub use create_report::{CreateReportInput, CreateReportUseCase};
pub use list_reports::ListReportsUseCase;
pub use update_status::UpdateReportStatusUseCase;
