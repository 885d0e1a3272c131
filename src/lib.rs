//! Grid Atlas - a thin HTTP facade over a managed geospatial store.
//!
//! The service exposes CRUD endpoints for three energy entity kinds
//! (infrastructure assets, renewable sources, demand centers), a proximity
//! search over their union, and placeholder endpoints for routing,
//! clustering, and visualization configuration. All durable state lives in
//! an external table/blob store behind the [`store`] traits.

pub mod api;
pub mod config;
pub mod domain;
pub mod geo;
pub mod state;
pub mod store;
pub mod telemetry;
