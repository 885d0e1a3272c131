//! Infrastructure asset CRUD endpoints. Thin pass-through to the managed
//! store: validate the payload shape, delegate, report the affected count.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::error::ApiError;
use super::{Deleted, Inserted, Updated};
use crate::{
    domain::{AssetPayload, InfrastructureAsset},
    state::AppState,
    store::ASSETS_TABLE,
};

/// GET /api/assets
pub async fn list(State(st): State<AppState>) -> Result<Json<Vec<InfrastructureAsset>>, ApiError> {
    let rows = st.stores.tables.select(ASSETS_TABLE, "*").await?;
    let assets = rows
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<InfrastructureAsset>, _>>()?;
    Ok(Json(assets))
}

/// GET /api/assets/{id}
pub async fn get(
    State(st): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<InfrastructureAsset>, ApiError> {
    let row = st
        .stores
        .tables
        .select_by_id(ASSETS_TABLE, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("asset {id}")))?;
    Ok(Json(serde_json::from_value(row)?))
}

/// POST /api/assets
pub async fn create(
    State(st): State<AppState>,
    Json(payload): Json<AssetPayload>,
) -> Result<(StatusCode, Json<Inserted>), ApiError> {
    payload.validate()?;
    let row = serde_json::to_value(&payload)?;
    let inserted = st.stores.tables.insert(ASSETS_TABLE, row).await?;
    Ok((StatusCode::CREATED, Json(Inserted { inserted })))
}

/// PUT /api/assets/{id} - full-field replace
pub async fn update(
    State(st): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<AssetPayload>,
) -> Result<Json<Updated>, ApiError> {
    payload.validate()?;
    let row = serde_json::to_value(&payload)?;
    let updated = st.stores.tables.update(ASSETS_TABLE, &id, row).await?;
    Ok(Json(Updated { updated }))
}

/// DELETE /api/assets/{id}
pub async fn remove(
    State(st): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Deleted>, ApiError> {
    let deleted = st.stores.tables.delete(ASSETS_TABLE, &id).await?;
    Ok(Json(Deleted { deleted }))
}
