//! Value Object Module

pub mod report_status;
pub mod uploaded_image;
