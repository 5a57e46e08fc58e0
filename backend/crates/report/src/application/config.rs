//! Application Configuration
//!
//! Configuration for the Report application layer.

use std::time::Duration;

/// Upper bound on one call to the prediction service
pub const DEFAULT_CLASSIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Largest accepted multipart body for a new report (10 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 << 20;

/// Report application configuration
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Endpoint the uploaded image is posted to for classification
    pub predict_api_url: String,
    pub classify_timeout: Duration,
    pub max_upload_bytes: usize,
}

impl ReportConfig {
    pub fn new(predict_api_url: impl Into<String>) -> Self {
        Self {
            predict_api_url: predict_api_url.into(),
            classify_timeout: DEFAULT_CLASSIFY_TIMEOUT,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ReportConfig::new("http://localhost:5000/predict");
        assert_eq!(config.classify_timeout, Duration::from_secs(10));
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
    }
}
