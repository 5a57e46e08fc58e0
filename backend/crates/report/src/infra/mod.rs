//! Infrastructure Layer
//!
//! PostgreSQL gateway and the HTTP prediction client.

pub mod classifier;
pub mod postgres;

pub use classifier::HttpClassifier;
