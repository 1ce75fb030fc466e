use std::path::Path as FsPath;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, Path, State},
    response::IntoResponse,
    routing::{get, post},
};
use http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

const MAX_NAME_LEN: usize = 255;

/// Answer to successful cover upload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverInfo {
    pub url: String,
    pub size: u64,
}

pub fn file_ext(file_name: &str) -> Option<String> {
    FsPath::new(file_name)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
}

/// Mime type for extension, only images are accepted as covers
pub fn image_mime(ext: &str) -> Option<&'static str> {
    new_mime_guess::from_ext(ext)
        .first_raw()
        .filter(|mime| mime.starts_with("image/"))
}

fn is_name_invalid(name: &str) -> bool {
    name.is_empty()
        || name.starts_with('.')
        || name.len() > MAX_NAME_LEN
        || name
            .chars()
            .any(|c| matches!(c, '/' | '\\' | ':') || c.is_ascii_control())
}

pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<impl IntoResponse> {
    let Some(field) = multipart.next_field().await? else {
        return Err(ApiError::InvalidRequest("Missing file field".into()));
    };
    let file_name = field
        .file_name()
        .ok_or_else(|| ApiError::InvalidRequest("Missing file name".into()))?
        .to_string();
    let ext = file_ext(&file_name)
        .ok_or_else(|| ApiError::UnprocessableRequest("Missing file extension".into()))?;
    if image_mime(&ext).is_none() {
        return Err(ApiError::UnprocessableRequest(format!(
            "Not an image extension: {ext}"
        )));
    }

    let data = field.bytes().await?;
    if data.is_empty() {
        return Err(ApiError::UnprocessableRequest("Empty file".into()));
    }

    let name = format!("{}.{ext}", uuid::Uuid::new_v4());
    let dest_path = state.config().covers_dir.join(&name);
    debug!("Storing cover {file_name} as {dest_path:?}");
    fs::write(&dest_path, &data).await?;

    let url = state.build_url(&["covers", &name])?;
    let info = CoverInfo {
        url: url.to_string(),
        size: data.len() as u64,
    };

    Ok((StatusCode::CREATED, Json(info)))
}

pub async fn download(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<impl IntoResponse> {
    if is_name_invalid(&name) {
        return Err(ApiError::InvalidRequest("Invalid cover name".into()));
    }
    let mime = file_ext(&name)
        .and_then(|ext| image_mime(&ext))
        .ok_or_else(|| ApiError::ResourceNotFound("Cover".into()))?;

    let path = state.config().covers_dir.join(&name);
    let data = match fs::read(&path).await {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ApiError::ResourceNotFound("Cover".into()));
        }
        Err(e) => return Err(e.into()),
    };

    let mut headers = HeaderMap::new();
    headers.insert(http::header::CONTENT_TYPE, http::HeaderValue::from_static(mime));

    Ok((StatusCode::OK, headers, data))
}

pub fn router(limit_mb: usize) -> Router<AppState> {
    Router::new()
        .route("/", post(upload))
        .route("/{name}", get(download))
        .layer(DefaultBodyLimit::max(1024 * 1024 * limit_mb))
}
