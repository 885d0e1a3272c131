//! Composite geospatial endpoints: proximity analysis over the union of
//! all three entity tables, plus the routing/clustering/visualization
//! placeholders.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::error::ApiError;
use crate::{
    domain::{EntityKind, Metadata, SitePoint},
    geo::{within_radius, Ranked},
    state::AppState,
    store::{ASSETS_TABLE, DEMAND_TABLE, RENEWABLES_TABLE},
};

#[derive(Debug, Deserialize, Validate)]
pub struct ProximityQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    pub lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub lng: f64,
    /// Kilometers.
    #[validate(range(min = 1.0, max = 500.0))]
    pub radius: f64,
}

#[derive(Debug, Serialize)]
pub struct Center {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize)]
pub struct ProximityResponse {
    pub center: Center,
    pub radius_km: f64,
    pub results: Vec<Ranked<SitePoint>>,
}

/// POST /api/proximity-analysis
///
/// The three reads run concurrently but are not a consistent snapshot;
/// concurrent writers can be reflected unevenly across kinds. If any read
/// fails the whole request fails rather than returning partial data.
pub async fn proximity(
    State(st): State<AppState>,
    Json(query): Json<ProximityQuery>,
) -> Result<Json<ProximityResponse>, ApiError> {
    query.validate()?;

    let tables = &st.stores.tables;
    let (assets, renewables, demand) = tokio::try_join!(
        tables.select(ASSETS_TABLE, "id,name,lat,lng,type"),
        tables.select(RENEWABLES_TABLE, "id,name,lat,lng,source_type"),
        tables.select(DEMAND_TABLE, "id,name,lat,lng"),
    )?;

    let mut points = Vec::with_capacity(assets.len() + renewables.len() + demand.len());
    for row in assets {
        points.push(SitePoint::from_row(EntityKind::Asset, row)?);
    }
    for row in renewables {
        points.push(SitePoint::from_row(EntityKind::Renewable, row)?);
    }
    for row in demand {
        points.push(SitePoint::from_row(EntityKind::Demand, row)?);
    }

    let results = within_radius((query.lat, query.lng), &points, query.radius);

    Ok(Json(ProximityResponse {
        center: Center {
            lat: query.lat,
            lng: query.lng,
        },
        radius_km: query.radius,
        results,
    }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct RoutingRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    pub start_lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub start_lng: f64,
    #[validate(range(min = -90.0, max = 90.0))]
    pub end_lat: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub end_lng: f64,
    #[serde(default)]
    pub avoid_hazards: bool,
}

#[derive(Debug, Serialize)]
pub struct RoutePoint {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Serialize)]
pub struct RoutingResponse {
    pub route: Vec<RoutePoint>,
    pub avoid_hazards: bool,
    pub distance_km_estimate: Option<f64>,
}

/// POST /api/routing
///
/// Placeholder: straight-line interpolation through the midpoint, no
/// path-finding and no hazard avoidance regardless of the flag.
pub async fn routing(Json(req): Json<RoutingRequest>) -> Result<Json<RoutingResponse>, ApiError> {
    req.validate()?;
    Ok(Json(RoutingResponse {
        route: vec![
            RoutePoint {
                lat: req.start_lat,
                lng: req.start_lng,
            },
            RoutePoint {
                lat: (req.start_lat + req.end_lat) / 2.0,
                lng: (req.start_lng + req.end_lng) / 2.0,
            },
            RoutePoint {
                lat: req.end_lat,
                lng: req.end_lng,
            },
        ],
        avoid_hazards: req.avoid_hazards,
        distance_km_estimate: None,
    }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct ClusteringRequest {
    #[validate(range(min = 1, max = 50))]
    pub k: u32,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Serialize)]
pub struct ClusteringResponse {
    pub k: u32,
    pub clusters: Vec<serde_json::Value>,
    pub note: String,
}

/// POST /api/clustering
///
/// Placeholder: validates the request, performs no clustering.
pub async fn clustering(
    Json(req): Json<ClusteringRequest>,
) -> Result<Json<ClusteringResponse>, ApiError> {
    req.validate()?;
    Ok(Json(ClusteringResponse {
        k: req.k,
        clusters: Vec::new(),
        note: "no clustering backend wired up; returning no clusters".to_string(),
    }))
}

/// Visualization settings are an explicit optional container: the known
/// keys are typed, everything else passes through `extra` untouched.
#[derive(Debug, Serialize, Deserialize)]
pub struct VisualizationConfig {
    pub theme: Option<String>,
    pub layer: Option<String>,
    pub filters: Option<Metadata>,
    #[serde(flatten)]
    pub extra: Metadata,
}

#[derive(Debug, Serialize)]
pub struct VisualizationResponse {
    pub status: &'static str,
    pub config: VisualizationConfig,
}

/// POST /api/visualization - echoes the submitted configuration.
pub async fn visualization(Json(config): Json<VisualizationConfig>) -> Json<VisualizationResponse> {
    Json(VisualizationResponse {
        status: "ok",
        config,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0.0, 0.5)] // below minimum radius
    #[case(0.0, 0.0, 501.0)] // above maximum radius
    #[case(91.0, 0.0, 10.0)] // latitude out of range
    #[case(0.0, -181.0, 10.0)] // longitude out of range
    fn proximity_query_rejects_out_of_range(
        #[case] lat: f64,
        #[case] lng: f64,
        #[case] radius: f64,
    ) {
        let q = ProximityQuery { lat, lng, radius };
        assert!(q.validate().is_err());
    }

    #[rstest]
    #[case(1.0)]
    #[case(250.0)]
    #[case(500.0)]
    fn proximity_query_accepts_valid_radius(#[case] radius: f64) {
        let q = ProximityQuery {
            lat: 0.0,
            lng: 0.0,
            radius,
        };
        assert!(q.validate().is_ok());
    }

    #[rstest]
    #[case(0)]
    #[case(51)]
    fn clustering_rejects_k_out_of_bounds(#[case] k: u32) {
        let req = ClusteringRequest {
            k,
            points: vec![(0.0, 0.0)],
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn clustering_accepts_bounds() {
        for k in [1, 50] {
            let req = ClusteringRequest { k, points: vec![] };
            assert!(req.validate().is_ok());
        }
    }

    #[test]
    fn routing_defaults_avoid_hazards_to_false() {
        let req: RoutingRequest = serde_json::from_str(
            r#"{"start_lat": 0.0, "start_lng": 0.0, "end_lat": 2.0, "end_lng": 2.0}"#,
        )
        .unwrap();
        assert!(!req.avoid_hazards);
    }
}
