use axum::{
    Json,
    extract::{FromRequest, Request},
};
use garde::Validate;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{error::ApiError, state::AppState};

/// JSON body which passed `garde` validation.
///
/// Bodies that fail to parse or validate are rejected with [`ApiError`], so
/// clients always get the same `{"error": ...}` shape.
#[derive(Debug, Clone)]
pub struct Garde<T>(pub T);

fn report_message(report: &garde::Report) -> String {
    report
        .iter()
        .map(|(path, error)| format!("{path}: {error}"))
        .collect::<Vec<_>>()
        .join("; ")
}

impl<T> FromRequest<AppState> for Garde<T>
where
    T: DeserializeOwned + Validate<Context = ()> + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state).await?;
        if let Err(report) = payload.validate() {
            let message = report_message(&report);
            debug!("Invalid payload: {message}");
            return Err(ApiError::UnprocessableRequest(message));
        }
        Ok(Garde(payload))
    }
}
