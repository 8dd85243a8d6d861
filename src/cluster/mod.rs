//! Partitioning delivery points into spatial groups.
//!
//! ## K-means on the sphere
//!
//! Assign each point to the nearest centroid by haversine distance, then move each
//! centroid to the mean of its points. Repeat until centroids stop moving.
//!
//! **Objective** (reported as distortion):
//!
//! ```text
//! D = Σ_k Σ_{p ∈ C_k} haversine(p, μ_k)
//! ```
//!
//! **Seeding**: farthest-point k-means++. Only the first centroid is random; a
//! fixed seed makes a run fully reproducible.
//!
//! **Choosing k**: [`Elbow`] runs every `k` up to a bound and picks the point of
//! maximum curvature on the distortion curve.
//!
//! **Routing**: each cluster can be handed to the route sequencer, e.g. one
//! cluster per driver, all starting from the depot.
//!
//! ## Usage
//!
//! ```rust
//! use waypoint::cluster::{Clustering, GeoKmeans};
//! use waypoint::{Coordinate, Point};
//!
//! let points = vec![
//!     Point::new("a", 0.0, 0.0),
//!     Point::new("b", 0.0, 1.0),
//!     Point::new("c", 10.0, 10.0),
//!     Point::new("d", 10.0, 11.0),
//! ];
//!
//! let result = GeoKmeans::new(2).with_seed(42).fit(&points).unwrap();
//! assert_eq!(result.labels[0], result.labels[1]);
//! assert_ne!(result.labels[0], result.labels[2]);
//!
//! // One route per cluster, from a shared start.
//! let routes = result.routes(Coordinate::new(0.0, 0.0));
//! assert_eq!(routes.len(), 2);
//!
//! // Through the common clustering interface.
//! let labels = GeoKmeans::new(2).with_seed(42).fit_predict(&points).unwrap();
//! assert_eq!(labels, result.labels);
//! ```

mod elbow;
mod kmeans;
mod seeding;
mod traits;
mod util;

pub use elbow::{find_optimal_k, Elbow, DEFAULT_MAX_K};
pub use kmeans::{Cluster, ClusteringResult, GeoKmeans, CONVERGENCE_THRESHOLD_KM, MAX_ITERATIONS};
pub use traits::Clustering;

use crate::error::Result;
use crate::geo::{Coordinate, Point};

/// Cluster `points` into `k` groups with default settings and unseeded randomness.
///
/// Fails with [`crate::Error::InvalidClusterCount`] unless `1 <= k <= points.len()`.
pub fn cluster(points: &[Point], k: usize) -> Result<ClusteringResult> {
    GeoKmeans::new(k).fit(points)
}

/// Visiting order for one cluster's members, starting from `start`.
///
/// Same ordering rules as [`crate::sequence_route`]: priority tiers first,
/// nearest neighbor within a tier.
pub fn optimize_cluster_route(cluster: &Cluster, start: Coordinate) -> Vec<Point> {
    cluster.route_from(start).stops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn cluster_validates_k() {
        let points = vec![Point::new("a", 1.0, 1.0), Point::new("b", 2.0, 2.0)];
        assert!(cluster(&points, 1).is_ok());
        assert!(cluster(&points, 2).is_ok());
        assert_eq!(
            cluster(&points, 3).unwrap_err(),
            Error::InvalidClusterCount {
                requested: 3,
                n_items: 2
            }
        );
    }

    #[test]
    fn optimize_cluster_route_orders_members() {
        let c = Cluster {
            index: 0,
            center: Coordinate::new(0.0, 1.0),
            members: vec![
                Point::new("far", 0.0, 2.0),
                Point::new("near", 0.0, 0.5),
            ],
        };
        let ordered: Vec<_> = optimize_cluster_route(&c, Coordinate::new(0.0, 0.0))
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ordered, vec!["near", "far"]);
    }

    #[test]
    fn empty_cluster_has_empty_route() {
        let c = Cluster {
            index: 3,
            center: Coordinate::new(1.0, 1.0),
            members: Vec::new(),
        };
        assert!(optimize_cluster_route(&c, Coordinate::new(0.0, 0.0)).is_empty());
    }
}
