//! Record counts across the three entity tables.

use axum::{extract::State, Json};
use serde::Serialize;

use super::error::ApiError;
use crate::{
    state::AppState,
    store::{ASSETS_TABLE, DEMAND_TABLE, RENEWABLES_TABLE},
};

#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub counts: EntityCounts,
}

#[derive(Debug, Serialize)]
pub struct EntityCounts {
    pub assets: usize,
    pub renewables: usize,
    pub demand_centers: usize,
}

/// GET /api/analytics
pub async fn analytics(State(st): State<AppState>) -> Result<Json<AnalyticsResponse>, ApiError> {
    let tables = &st.stores.tables;
    let (assets, renewables, demand) = tokio::try_join!(
        tables.select(ASSETS_TABLE, "id"),
        tables.select(RENEWABLES_TABLE, "id"),
        tables.select(DEMAND_TABLE, "id"),
    )?;

    Ok(Json(AnalyticsResponse {
        counts: EntityCounts {
            assets: assets.len(),
            renewables: renewables.len(),
            demand_centers: demand.len(),
        },
    }))
}
