//! HTTP Prediction Client
//!
//! Posts the uploaded image as multipart field `image` and reads back
//! `{"data": {"imageUrl", "classes", "score"}}`.

use std::time::Duration;

use kernel::error::app_error::{AppError, AppResult, ResultExt};
use reqwest::StatusCode;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::application::config::ReportConfig;
use crate::domain::classifier::{Classification, ImageClassifier};
use crate::domain::value_object::uploaded_image::UploadedImage;
use crate::error::ReportError;

/// [`ImageClassifier`] backed by the prediction service
#[derive(Debug, Clone)]
pub struct HttpClassifier {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl HttpClassifier {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .or_internal("HttpClassifier::new")?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout,
        })
    }

    pub fn from_config(config: &ReportConfig) -> AppResult<Self> {
        Self::new(config.predict_api_url.clone(), config.classify_timeout)
    }
}

impl ImageClassifier for HttpClassifier {
    async fn classify(&self, image: UploadedImage) -> AppResult<Classification> {
        const OP: &str = "HttpClassifier::classify";

        let (file_name, format, bytes) = image.into_parts();
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(format.mime())
            .map_err(|e| ReportError::Prediction(e).at(OP))?;
        let form = Form::new().part("image", part);

        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .multipart(form)
            .send()
            .await
            .map_err(|e| request_error(OP, e))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ReportError::PredictionStatus(status.as_u16()).at(OP));
        }

        let body = response.bytes().await.map_err(|e| request_error(OP, e))?;
        let envelope: PredictEnvelope =
            serde_json::from_slice(&body).map_err(|e| ReportError::MalformedPrediction(e).at(OP))?;

        tracing::debug!(
            classes = ?envelope.data.classes,
            score = envelope.data.score,
            "Image classified"
        );

        Ok(envelope.data.into())
    }
}

/// Timeouts are worth retrying; every other transport fault is ours.
fn request_error(op: &'static str, err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        ReportError::PredictionTimeout(err).at(op)
    } else {
        ReportError::Prediction(err).at(op)
    }
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Deserialize)]
struct PredictEnvelope {
    data: PredictResult,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PredictResult {
    image_url: String,
    classes: Vec<String>,
    #[serde(default)]
    score: f64,
}

impl From<PredictResult> for Classification {
    fn from(result: PredictResult) -> Self {
        Self {
            image_url: result.image_url,
            classes: result.classes,
            score: result.score,
        }
    }
}
