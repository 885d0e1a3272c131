//! Demand center CRUD endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::error::ApiError;
use super::{Deleted, Inserted, Updated};
use crate::{
    domain::{DemandCenter, DemandPayload},
    state::AppState,
    store::DEMAND_TABLE,
};

/// GET /api/demand-centers
pub async fn list(State(st): State<AppState>) -> Result<Json<Vec<DemandCenter>>, ApiError> {
    let rows = st.stores.tables.select(DEMAND_TABLE, "*").await?;
    let centers = rows
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<DemandCenter>, _>>()?;
    Ok(Json(centers))
}

/// GET /api/demand-centers/{id}
pub async fn get(
    State(st): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DemandCenter>, ApiError> {
    let row = st
        .stores
        .tables
        .select_by_id(DEMAND_TABLE, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("demand center {id}")))?;
    Ok(Json(serde_json::from_value(row)?))
}

/// POST /api/demand-centers
pub async fn create(
    State(st): State<AppState>,
    Json(payload): Json<DemandPayload>,
) -> Result<(StatusCode, Json<Inserted>), ApiError> {
    payload.validate()?;
    let row = serde_json::to_value(&payload)?;
    let inserted = st.stores.tables.insert(DEMAND_TABLE, row).await?;
    Ok((StatusCode::CREATED, Json(Inserted { inserted })))
}

/// PUT /api/demand-centers/{id} - full-field replace
pub async fn update(
    State(st): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<DemandPayload>,
) -> Result<Json<Updated>, ApiError> {
    payload.validate()?;
    let row = serde_json::to_value(&payload)?;
    let updated = st.stores.tables.update(DEMAND_TABLE, &id, row).await?;
    Ok(Json(Updated { updated }))
}

/// DELETE /api/demand-centers/{id}
pub async fn remove(
    State(st): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Deleted>, ApiError> {
    let deleted = st.stores.tables.delete(DEMAND_TABLE, &id).await?;
    Ok(Json(Deleted { deleted }))
}
