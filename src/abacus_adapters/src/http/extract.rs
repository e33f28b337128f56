use std::fmt::Display;

use abacus_core::UserError;
use axum::{
    Json,
    extract::{FromRequest, OriginalUri, Request},
};
use serde::de::DeserializeOwned;

use super::error::{ApiError, ApiFailure};

/// A request body that can be checked field by field and turned into the
/// typed input of a use case.
pub trait ValidateRequest: DeserializeOwned {
    type Validated;

    fn validate(self) -> Result<Self::Validated, Vec<String>>;
}

/// Collects one `field: reason` entry per failed field.
#[derive(Debug, Default)]
pub struct Violations(Vec<String>);

impl Violations {
    pub fn check<T, E: Display>(&mut self, field: &str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.0.push(format!("{field}: {e}"));
                None
            }
        }
    }

    /// Same as [`Violations::check`], naming the field after the error.
    pub fn check_user<T>(&mut self, result: Result<T, UserError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => self.check(e.field(), Err::<T, _>(e)),
        }
    }

    /// A present, non-blank string.
    pub fn require(&mut self, field: &str, value: Option<String>, message: &str) -> Option<String> {
        match value {
            Some(value) if !value.trim().is_empty() => Some(value),
            _ => {
                self.0.push(format!("{field}: {message}"));
                None
            }
        }
    }

    pub fn into_errors(self) -> Vec<String> {
        self.0
    }
}

/// JSON body extractor that rejects with the `Validation failed` envelope.
pub struct ValidatedJson<T: ValidateRequest>(pub T::Validated);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: ValidateRequest,
    S: Send + Sync,
{
    type Rejection = ApiFailure;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let path = request_path(&req);

        let Json(body) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::warn!(error = %rejection.body_text(), "Malformed request body");
            ApiError::Validation(vec![format!("body: {}", rejection.body_text())]).at(&path)
        })?;

        let validated = body.validate().map_err(|errors| {
            tracing::warn!(?errors, "Validation error");
            ApiError::Validation(errors).at(&path)
        })?;

        Ok(Self(validated))
    }
}

/// Full path of the request, including any prefix stripped by nesting.
pub fn request_path(req: &Request) -> String {
    req.extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.path().to_string())
        .unwrap_or_else(|| req.uri().path().to_string())
}
