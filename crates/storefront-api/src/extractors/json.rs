//! JSON body extractor that runs `validator` rules.

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use storefront_core::error::AppError;

/// Like [`Json`], but rejects with the error envelope and validates the body.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;
        value
            .validate()
            .map_err(|errors| AppError::validation(first_message(&errors)))?;
        Ok(Self(value))
    }
}

/// The message of the first failing field, by field name.
fn first_message(errors: &ValidationErrors) -> String {
    let fields = errors.field_errors();
    let mut names: Vec<_> = fields.keys().collect();
    names.sort();
    names
        .first()
        .and_then(|name| fields.get(*name))
        .and_then(|errs| errs.first())
        .map(|err| match &err.message {
            Some(message) => message.to_string(),
            None => format!("Invalid value for '{}'", err.code),
        })
        .unwrap_or_else(|| "Invalid request body".to_string())
}
