use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Envelope wrapped around every response body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
    pub timestamp: DateTime<Utc>,
    pub path: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            code: StatusCode::OK.as_u16(),
            message: message.into(),
            data: Some(data),
            errors: None,
            timestamp: Utc::now(),
            path: path.into(),
        }
    }

    pub fn message_only(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            code: StatusCode::OK.as_u16(),
            message: message.into(),
            data: None,
            errors: None,
            timestamp: Utc::now(),
            path: path.into(),
        }
    }

    pub fn error(
        status: StatusCode,
        message: impl Into<String>,
        errors: Vec<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            status: ResponseStatus::Error,
            code: status.as_u16(),
            message: message.into(),
            data: None,
            errors: Some(errors),
            timestamp: Utc::now(),
            path: path.into(),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
