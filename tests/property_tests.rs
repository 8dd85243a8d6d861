use proptest::prelude::*;
use rand::prelude::*;
use std::collections::HashSet;
use waypoint::cluster::{Clustering, GeoKmeans};
use waypoint::{find_optimal_k, haversine_km, sequence_route, Coordinate, Point};

fn points_strategy(max: usize) -> impl Strategy<Value = Vec<Point>> {
    prop::collection::vec((-60.0f64..60.0, -170.0f64..170.0, 0i32..3), 1..max).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (lat, lon, pri))| Point::new(format!("p{i}"), lat, lon).with_priority(pri))
            .collect()
    })
}

fn city_points(n: usize, seed: u64) -> Vec<Point> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            Point::new(
                format!("d{i}"),
                14.55 + rng.random::<f64>() * 0.2,
                121.0 + rng.random::<f64>() * 0.2,
            )
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_haversine_symmetric_and_zero_on_diagonal(
        lat1 in -90.0f64..90.0, lon1 in -180.0f64..180.0,
        lat2 in -90.0f64..90.0, lon2 in -180.0f64..180.0
    ) {
        prop_assert_eq!(haversine_km(lat1, lon1, lat1, lon1), 0.0);
        let ab = haversine_km(lat1, lon1, lat2, lon2);
        let ba = haversine_km(lat2, lon2, lat1, lon1);
        prop_assert!((ab - ba).abs() < 1e-6);
        prop_assert!(ab >= 0.0);
    }

    #[test]
    fn prop_route_is_permutation(points in points_strategy(25), lat in -60.0f64..60.0, lon in -170.0f64..170.0) {
        let route = sequence_route(&points, Coordinate::new(lat, lon));
        prop_assert_eq!(route.len(), points.len());

        let ids: HashSet<&str> = route.ids().into_iter().collect();
        prop_assert_eq!(ids.len(), points.len());
        for p in &points {
            prop_assert!(ids.contains(p.id.as_str()));
        }
    }

    #[test]
    fn prop_route_respects_priority(points in points_strategy(25)) {
        let route = sequence_route(&points, Coordinate::new(0.0, 0.0));
        for pair in route.stops.windows(2) {
            prop_assert!(pair[0].priority >= pair[1].priority);
        }
    }

    #[test]
    fn prop_kmeans_partitions_input(points in points_strategy(20), k in 1usize..5, seed in 0u64..1000) {
        if k <= points.len() {
            let result = GeoKmeans::new(k).with_seed(seed).fit(&points).unwrap();

            prop_assert_eq!(result.clusters.len(), k);
            prop_assert_eq!(result.labels.len(), points.len());
            prop_assert!(result.iterations >= 1 && result.iterations <= 100);

            let total: usize = result.clusters.iter().map(|c| c.len()).sum();
            prop_assert_eq!(total, points.len());

            let mut seen = HashSet::new();
            for c in &result.clusters {
                for m in &c.members {
                    prop_assert!(seen.insert(m.id.clone()));
                }
            }
        } else {
            prop_assert!(GeoKmeans::new(k).fit(&points).is_err());
        }
    }

    #[test]
    fn prop_seeded_kmeans_is_deterministic(points in points_strategy(15), seed in 0u64..1000) {
        let model = GeoKmeans::new((points.len() / 3).max(1)).with_seed(seed);
        prop_assert_eq!(model.fit_predict(&points).unwrap(), model.fit_predict(&points).unwrap());
    }

    #[test]
    fn prop_optimal_k_in_range(points in points_strategy(12), max_k in 1usize..8) {
        let k = find_optimal_k(&points, max_k);
        prop_assert!(k >= 1);
        prop_assert!(k <= max_k.min(points.len()).max(1));
        if points.len() <= 2 {
            prop_assert_eq!(k, 1);
        }
    }

    #[test]
    fn prop_extra_round_raises_distortion_at_most_by_centroid_drift(
        data_seed in 0u64..500, seed in 0u64..500, k in 2usize..6, rounds in 1usize..15
    ) {
        let points = city_points(40, data_seed);
        let before = GeoKmeans::new(k).with_seed(seed).with_max_iter(rounds).fit(&points).unwrap();
        let after = GeoKmeans::new(k).with_seed(seed).with_max_iter(rounds + 1).fit(&points).unwrap();

        // Reassigning against the previous centroids never costs more.
        let reassigned: f64 = points
            .iter()
            .map(|p| {
                before
                    .clusters
                    .iter()
                    .map(|c| p.distance_km(&c.center))
                    .fold(f64::INFINITY, f64::min)
            })
            .sum();
        prop_assert!(reassigned <= before.total_distortion_km + 1e-6);

        if before.converged {
            // A settled run does not move again.
            prop_assert_eq!(&after, &before);
        } else {
            // The extra round assigns against `before`'s centroids, then moving
            // them adds at most each member's share of the shift.
            let drift: f64 = after
                .clusters
                .iter()
                .zip(&before.clusters)
                .map(|(a, b)| a.len() as f64 * a.center.distance_km(&b.center))
                .sum();
            prop_assert!(after.total_distortion_km <= reassigned + drift + 1e-6);
        }
    }
}
