use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::types::Metadata;

/// A load center: city, industrial cluster, or other consumption hotspot.
/// `demand_mw` is peak demand in megawatts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandCenter {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub demand_mw: Option<f64>,
    pub region: Option<String>,
    pub metadata: Option<Metadata>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Create/replace payload; `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DemandPayload {
    pub name: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
    pub demand_mw: Option<f64>,
    pub region: Option<String>,
    pub metadata: Option<Metadata>,
}
