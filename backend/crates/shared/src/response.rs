//! Response envelope
//!
//! Every body leaving the service has the shape
//! `{status, message, data}` on success or `{status, message, errors}` on failure.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::app_error::AppError;

/// Success envelope
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub message: &'static str,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// 200 OK
    pub fn ok(data: T) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            message: "OK",
            data,
        }
    }

    /// 201 Created
    pub fn created(data: T) -> Self {
        Self {
            status: StatusCode::CREATED.as_u16(),
            message: "Created",
            data,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

/// Failure envelope
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: u16,
    pub message: &'static str,
    pub errors: Vec<String>,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        Self {
            status: err.status_code(),
            message: err.kind().as_str(),
            errors: err.public_messages(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if self.is_server_error() {
            let (file, line) = self
                .location()
                .map(|l| (l.file(), l.line()))
                .unwrap_or(("unknown", 0));
            let cause = std::error::Error::source(&self).map(|e| e.to_string());
            tracing::error!(
                kind = %self.kind(),
                op = %self.op(),
                file,
                line,
                cause = cause.as_deref().unwrap_or("-"),
                "request failed"
            );
        } else {
            tracing::debug!(kind = %self.kind(), op = %self.op(), "request rejected");
        }

        (status, Json(ErrorBody::from(&self))).into_response()
    }
}
