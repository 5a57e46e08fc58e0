//! Entities

pub mod report;
