use axum::{
    Json,
    extract::{
        multipart::MultipartError,
        rejection::{JsonRejection, PathRejection},
    },
    response::{IntoResponse, Response},
};
use http::StatusCode;
use serde_json::json;
use tracing::error;

pub type Error = anyhow::Error;
pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type ApiResult<T, E = ApiError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
    #[error("Unprocessable request: {0}")]
    UnprocessableRequest(String),
    #[error("Database error: {0}")]
    DatabaseError(#[source] pubadmin_dal::Error),
    #[error("Multipart error: {0}")]
    MultipartError(#[from] MultipartError),
    #[error("Invalid JSON body: {0}")]
    JsonError(#[from] JsonRejection),
    #[error("Path error: {0}")]
    PathError(#[from] PathRejection),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<pubadmin_dal::Error> for ApiError {
    fn from(e: pubadmin_dal::Error) -> Self {
        match e {
            pubadmin_dal::Error::RecordNotFound(what) => ApiError::ResourceNotFound(what),
            other => ApiError::DatabaseError(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) | ApiError::PathError(_) => StatusCode::BAD_REQUEST,
            ApiError::UnprocessableRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::MultipartError(e) => e.status(),
            ApiError::JsonError(e) => e.status(),
            ApiError::DatabaseError(_) | ApiError::IoError(_) | ApiError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status.is_server_error() {
            error!("Request failed: {self}");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
