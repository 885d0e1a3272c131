use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::types::Metadata;

/// A fixed grid infrastructure asset: substation, transformer station,
/// transmission endpoint, conventional plant, and so on. `capacity` is in
/// megawatts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfrastructureAsset {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: String,
    pub region: Option<String>,
    pub lat: f64,
    pub lng: f64,
    pub capacity: Option<f64>,
    pub metadata: Option<Metadata>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Create/replace payload; `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AssetPayload {
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: String,
    pub region: Option<String>,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
    pub capacity: Option<f64>,
    pub metadata: Option<Metadata>,
}
