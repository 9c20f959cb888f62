//! Request body extraction
//!
//! axum's `Json` rejects bodies with plain-text 400/415/422 responses; this
//! wrapper turns every rejection into an [`AppError`] body and runs the
//! payload's `validator` rules before the handler sees it.

use axum::Json;
use axum::extract::{FromRequest, Request};
use axum::extract::rejection::JsonRejection;
use serde::de::DeserializeOwned;
use shared::AppError;
use validator::Validate;

use crate::utils::validation::validate_payload;

/// JSON body that has passed its declarative validation rules
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::invalid_request(rejection.body_text()))?;
        validate_payload(&payload)?;
        Ok(Self(payload))
    }
}
