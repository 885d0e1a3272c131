pub mod analytics;
pub mod assets;
pub mod demand;
pub mod error;
pub mod files;
pub mod geo;
pub mod health;
pub mod renewables;

use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing::warn;

use crate::{config::Config, state::AppState};

/// Row-count responses for mutations, mirroring the managed store's
/// affected-row reporting.
#[derive(Debug, Serialize)]
pub struct Inserted {
    pub inserted: u64,
}

#[derive(Debug, Serialize)]
pub struct Updated {
    pub updated: u64,
}

#[derive(Debug, Serialize)]
pub struct Deleted {
    pub deleted: u64,
}

pub fn router(state: AppState, cfg: &Config) -> Router {
    let api = Router::new()
        .route("/assets", get(assets::list).post(assets::create))
        .route(
            "/assets/:id",
            get(assets::get).put(assets::update).delete(assets::remove),
        )
        .route(
            "/renewables",
            get(renewables::list).post(renewables::create),
        )
        .route(
            "/renewables/:id",
            get(renewables::get)
                .put(renewables::update)
                .delete(renewables::remove),
        )
        .route("/demand-centers", get(demand::list).post(demand::create))
        .route(
            "/demand-centers/:id",
            get(demand::get).put(demand::update).delete(demand::remove),
        )
        .route("/analytics", get(analytics::analytics))
        .route("/proximity-analysis", post(geo::proximity))
        .route("/routing", post(geo::routing))
        .route("/clustering", post(geo::clustering))
        .route("/visualization", post(geo::visualization))
        .route("/files/upload", post(files::upload));

    let mut router = Router::new()
        .nest("/api", api)
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .with_state(state);

    if cfg.server.enable_cors {
        use tower_http::cors::{AllowOrigin, CorsLayer};
        match cfg.server.cors_origin.parse() {
            Ok(origin) => {
                let cors = CorsLayer::new()
                    .allow_origin(AllowOrigin::exact(origin))
                    .allow_methods([
                        axum::http::Method::GET,
                        axum::http::Method::POST,
                        axum::http::Method::PUT,
                        axum::http::Method::DELETE,
                    ])
                    .allow_headers([axum::http::header::CONTENT_TYPE]);
                router = router.layer(cors);
            }
            Err(_) => warn!(origin = %cfg.server.cors_origin, "invalid CORS origin, skipping CORS layer"),
        }
    }

    router
        .layer(
            ServiceBuilder::new()
                .layer(axum::extract::DefaultBodyLimit::max(cfg.server.body_limit_bytes))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    cfg.server.request_timeout_secs,
                ))),
        )
        .layer(TraceLayer::new_for_http())
}
