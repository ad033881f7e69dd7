use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use models::{SpotFieldsPatch, SpotRecord};
use tracing::info;

use crate::errors::ApiError;
use crate::routes::ServerState;

/// `GET /api/spots`
pub async fn list_spots(State(state): State<ServerState>) -> Result<Json<Vec<SpotRecord>>, ApiError> {
    let records = state.spots.list().await?;
    Ok(Json(records))
}

/// `GET /api/spots/:id`
pub async fn get_spot(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<SpotRecord>, ApiError> {
    let record = state.spots.get(&id).await?;
    Ok(Json(record))
}

/// `POST /api/spots` with a full record as body. The body is parsed whatever
/// its content type.
pub async fn create_spot(State(state): State<ServerState>, body: Bytes) -> Result<StatusCode, ApiError> {
    let record: SpotRecord = serde_json::from_slice(&body).map_err(ApiError::bad_body)?;
    let id = record.id.clone();
    state.spots.create(record).await?;
    info!(%id, "create_spot");
    Ok(StatusCode::CREATED)
}

/// `PUT /api/spots/:id` with `Surf Break`, `Photos` and/or `Address`.
pub async fn update_spot(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let patch: SpotFieldsPatch = serde_json::from_slice(&body).map_err(ApiError::bad_body)?;
    state.spots.update(&id, patch).await?;
    info!(%id, "update_spot");
    Ok(StatusCode::OK)
}

/// `DELETE /api/spots/:id`
pub async fn delete_spot(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.spots.delete(&id).await?;
    info!(%id, "delete_spot");
    Ok(StatusCode::OK)
}
