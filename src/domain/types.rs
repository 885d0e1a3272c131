use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::geo::Locatable;

/// Free-form key-value attachment on a record. Not interpreted by this
/// service; stored and returned verbatim.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// Discriminator tagging a point's origin table in composite queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EntityKind {
    Asset,
    Renewable,
    Demand,
}

/// Minimal projection of a record for combined geospatial queries: identity,
/// position, and whatever kind-specific columns the projection carried
/// (flattened into `extra`).
#[derive(Debug, Clone, Serialize)]
pub struct SitePoint {
    pub kind: EntityKind,
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(flatten)]
    pub extra: Metadata,
}

#[derive(Debug, Deserialize)]
struct SiteRow {
    id: String,
    name: String,
    lat: f64,
    lng: f64,
    #[serde(flatten)]
    extra: Metadata,
}

impl SitePoint {
    /// Decode a store row and tag it with its origin kind.
    pub fn from_row(kind: EntityKind, row: serde_json::Value) -> Result<Self, serde_json::Error> {
        let r: SiteRow = serde_json::from_value(row)?;
        Ok(Self {
            kind,
            id: r.id,
            name: r.name,
            lat: r.lat,
            lng: r.lng,
            extra: r.extra,
        })
    }
}

impl Locatable for SitePoint {
    fn lat(&self) -> f64 {
        self.lat
    }
    fn lng(&self) -> f64 {
        self.lng
    }
}
