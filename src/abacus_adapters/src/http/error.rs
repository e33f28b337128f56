use abacus_application::AuthError;
use abacus_core::{CalculationError, UserError};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use super::envelope::ApiResponse;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(Vec<String>),

    #[error("{0}")]
    BadRequest(String),

    /// Carries the public message only; the cause is logged where it happens.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Caller mistakes become 400 with the error's own message, anything
    /// unexpected becomes 500 with `failure_message`.
    pub fn from_auth(error: AuthError, failure_message: &str) -> Self {
        match error {
            AuthError::Unexpected(_) | AuthError::EmailSendFailure(_) => {
                ApiError::Internal(failure_message.to_string())
            }
            other => ApiError::BadRequest(other.to_string()),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn at(self, path: impl Into<String>) -> ApiFailure {
        ApiFailure {
            error: self,
            path: path.into(),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(error: UserError) -> Self {
        ApiError::Validation(vec![format!("{}: {}", error.field(), error)])
    }
}

impl From<CalculationError> for ApiError {
    fn from(error: CalculationError) -> Self {
        match error {
            CalculationError::DivisionByZero => ApiError::BadRequest(error.to_string()),
            CalculationError::OutOfRange { field } => {
                ApiError::Validation(vec![format!("{field}: {error}")])
            }
        }
    }
}

/// An [`ApiError`] bound to the request path it is reported for.
#[derive(Debug)]
pub struct ApiFailure {
    pub error: ApiError,
    pub path: String,
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        let message = self.error.to_string();
        let errors = match self.error {
            ApiError::Validation(errors) => errors,
            _ => vec![message.clone()],
        };

        ApiResponse::<()>::error(status, message, errors, self.path).into_response()
    }
}
