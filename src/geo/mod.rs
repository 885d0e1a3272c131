//! Geodesic math and the proximity filter.

pub mod distance;
pub mod filter;

pub use distance::{geodesic_km, haversine_km};
pub use filter::{within_radius, Locatable, Ranked};
