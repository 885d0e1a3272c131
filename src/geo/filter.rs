//! Linear-scan proximity filter: annotate candidates with their distance
//! from a center, keep those inside the radius, order nearest-first.

use ordered_float::OrderedFloat;
use serde::Serialize;

use crate::geo::distance::geodesic_km;

/// Anything carrying a latitude/longitude pair in decimal degrees.
pub trait Locatable {
    fn lat(&self) -> f64;
    fn lng(&self) -> f64;
}

/// A candidate annotated with its computed distance from the query center.
#[derive(Debug, Clone, Serialize)]
pub struct Ranked<T> {
    #[serde(flatten)]
    pub item: T,
    pub distance_km: f64,
}

impl<T: Locatable> Locatable for Ranked<T> {
    fn lat(&self) -> f64 {
        self.item.lat()
    }
    fn lng(&self) -> f64 {
        self.item.lng()
    }
}

/// Keep every candidate whose geodesic distance from `center` is at most
/// `radius_km` (inclusive), annotated with `distance_km` and sorted
/// ascending by it. The sort is stable, so equidistant candidates keep
/// their input order. Input is not mutated.
pub fn within_radius<T>(center: (f64, f64), candidates: &[T], radius_km: f64) -> Vec<Ranked<T>>
where
    T: Locatable + Clone,
{
    let mut ranked: Vec<Ranked<T>> = candidates
        .iter()
        .map(|c| Ranked {
            distance_km: geodesic_km(center.0, center.1, c.lat(), c.lng()),
            item: c.clone(),
        })
        .filter(|r| r.distance_km <= radius_km)
        .collect();
    ranked.sort_by_key(|r| OrderedFloat(r.distance_km));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Pt {
        tag: u32,
        lat: f64,
        lng: f64,
    }

    impl Locatable for Pt {
        fn lat(&self) -> f64 {
            self.lat
        }
        fn lng(&self) -> f64 {
            self.lng
        }
    }

    fn pt(tag: u32, lat: f64, lng: f64) -> Pt {
        Pt { tag, lat, lng }
    }

    #[test]
    fn empty_candidates_give_empty_result() {
        let out = within_radius((0.0, 0.0), &[] as &[Pt], 500.0);
        assert!(out.is_empty());
    }

    #[test]
    fn only_points_inside_radius_survive() {
        let candidates = [pt(1, 0.0, 0.0), pt(2, 10.0, 10.0)];
        let out = within_radius((0.0, 0.0), &candidates, 1.0);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].item.tag, 1);
        assert_eq!(out[0].distance_km, 0.0);
    }

    #[test]
    fn boundary_is_inclusive() {
        let candidates = [pt(1, 1.0, 0.0)];
        let d = geodesic_km(0.0, 0.0, 1.0, 0.0);
        let out = within_radius((0.0, 0.0), &candidates, d);
        assert_eq!(out.len(), 1);
        let out = within_radius((0.0, 0.0), &candidates, d - 0.001);
        assert!(out.is_empty());
    }

    #[test]
    fn zero_radius_admits_only_exact_hits() {
        let candidates = [pt(1, 0.0, 0.0), pt(2, 0.001, 0.0)];
        let out = within_radius((0.0, 0.0), &candidates, 0.0);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].item.tag, 1);
    }

    #[test]
    fn sorted_nearest_first() {
        let candidates = [pt(1, 2.0, 0.0), pt(2, 0.5, 0.0), pt(3, 1.0, 0.0)];
        let out = within_radius((0.0, 0.0), &candidates, 500.0);
        let tags: Vec<u32> = out.iter().map(|r| r.item.tag).collect();
        assert_eq!(tags, vec![2, 3, 1]);
    }

    #[test]
    fn ties_keep_input_order() {
        // Duplicate coordinates are independent candidates at equal distance.
        let candidates = [pt(1, 1.0, 1.0), pt(2, 1.0, 1.0), pt(3, 1.0, 1.0)];
        let out = within_radius((0.0, 0.0), &candidates, 500.0);
        let tags: Vec<u32> = out.iter().map(|r| r.item.tag).collect();
        assert_eq!(tags, vec![1, 2, 3]);
    }

    #[test]
    fn refiltering_own_output_is_identity() {
        let candidates = [pt(1, 0.2, 0.1), pt(2, 0.9, 0.4), pt(3, 3.0, 3.0)];
        let first = within_radius((0.0, 0.0), &candidates, 150.0);
        let second = within_radius((0.0, 0.0), &first, 150.0);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.item, b.item.item);
            assert!((a.distance_km - b.distance_km).abs() < 1e-9);
        }
    }

    proptest! {
        #[test]
        fn every_result_is_within_radius(
            points in prop::collection::vec((-80.0f64..80.0, -179.0f64..179.0), 0..40),
            radius in 0.0f64..600.0,
            clat in -80.0f64..80.0,
            clng in -179.0f64..179.0,
        ) {
            let candidates: Vec<Pt> = points
                .iter()
                .enumerate()
                .map(|(i, (lat, lng))| pt(i as u32, *lat, *lng))
                .collect();
            let out = within_radius((clat, clng), &candidates, radius);
            for r in &out {
                prop_assert!(r.distance_km <= radius);
            }
            // No excluded candidate may actually be inside the radius.
            let kept: Vec<u32> = out.iter().map(|r| r.item.tag).collect();
            for c in &candidates {
                let d = geodesic_km(clat, clng, c.lat, c.lng);
                if d <= radius {
                    prop_assert!(kept.contains(&c.tag));
                }
            }
        }

        #[test]
        fn output_is_sorted_ascending(
            points in prop::collection::vec((-80.0f64..80.0, -179.0f64..179.0), 0..40),
            radius in 0.0f64..600.0,
        ) {
            let candidates: Vec<Pt> = points
                .iter()
                .enumerate()
                .map(|(i, (lat, lng))| pt(i as u32, *lat, *lng))
                .collect();
            let out = within_radius((0.0, 0.0), &candidates, radius);
            for pair in out.windows(2) {
                prop_assert!(pair[0].distance_km <= pair[1].distance_km);
            }
        }
    }
}
