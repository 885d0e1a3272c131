//! Renewable source CRUD endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::error::ApiError;
use super::{Deleted, Inserted, Updated};
use crate::{
    domain::{RenewablePayload, RenewableSource},
    state::AppState,
    store::RENEWABLES_TABLE,
};

/// GET /api/renewables
pub async fn list(State(st): State<AppState>) -> Result<Json<Vec<RenewableSource>>, ApiError> {
    let rows = st.stores.tables.select(RENEWABLES_TABLE, "*").await?;
    let sources = rows
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<RenewableSource>, _>>()?;
    Ok(Json(sources))
}

/// GET /api/renewables/{id}
pub async fn get(
    State(st): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RenewableSource>, ApiError> {
    let row = st
        .stores
        .tables
        .select_by_id(RENEWABLES_TABLE, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("renewable source {id}")))?;
    Ok(Json(serde_json::from_value(row)?))
}

/// POST /api/renewables
pub async fn create(
    State(st): State<AppState>,
    Json(payload): Json<RenewablePayload>,
) -> Result<(StatusCode, Json<Inserted>), ApiError> {
    payload.validate()?;
    let row = serde_json::to_value(&payload)?;
    let inserted = st.stores.tables.insert(RENEWABLES_TABLE, row).await?;
    Ok((StatusCode::CREATED, Json(Inserted { inserted })))
}

/// PUT /api/renewables/{id} - full-field replace
pub async fn update(
    State(st): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<RenewablePayload>,
) -> Result<Json<Updated>, ApiError> {
    payload.validate()?;
    let row = serde_json::to_value(&payload)?;
    let updated = st.stores.tables.update(RENEWABLES_TABLE, &id, row).await?;
    Ok(Json(Updated { updated }))
}

/// DELETE /api/renewables/{id}
pub async fn remove(
    State(st): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Deleted>, ApiError> {
    let deleted = st.stores.tables.delete(RENEWABLES_TABLE, &id).await?;
    Ok(Json(Deleted { deleted }))
}
