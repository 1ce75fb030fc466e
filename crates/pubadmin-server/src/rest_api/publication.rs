use crate::{error::ApiResult, state::AppState, validate::Garde};
use axum::{
    Json,
    extract::Path,
    response::IntoResponse,
    routing::{get, post},
};
use http::StatusCode;
use pubadmin_dal::publication::PublicationRepository;
use pubadmin_types::PublicationData;
use tracing::info;

crate::repository_from_request!(PublicationRepository);

pub async fn create(
    repository: PublicationRepository,
    Garde(payload): Garde<PublicationData>,
) -> ApiResult<impl IntoResponse> {
    let record = repository.create(payload).await?;
    info!("Created publication {} \"{}\"", record.id, record.title);

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn list(repository: PublicationRepository) -> ApiResult<impl IntoResponse> {
    let records = repository.list().await?;
    Ok((StatusCode::OK, Json(records)))
}

pub async fn get_one(
    Path(id): Path<i64>,
    repository: PublicationRepository,
) -> ApiResult<impl IntoResponse> {
    let record = repository.get(id).await?;

    Ok((StatusCode::OK, Json(record)))
}

pub async fn update(
    Path(id): Path<i64>,
    repository: PublicationRepository,
    Garde(payload): Garde<PublicationData>,
) -> ApiResult<impl IntoResponse> {
    let record = repository.update(id, payload).await?;
    info!("Updated publication {id}");

    Ok((StatusCode::OK, Json(record)))
}

pub async fn delete(
    Path(id): Path<i64>,
    repository: PublicationRepository,
) -> ApiResult<impl IntoResponse> {
    repository.delete(id).await?;
    info!("Deleted publication {id}");

    Ok((StatusCode::NO_CONTENT, ()))
}

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", post(create).get(list))
        .route("/{id}", get(get_one).put(update).delete(delete))
}
