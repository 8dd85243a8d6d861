//! Delivery route planning primitives.
//!
//! `waypoint` orders a driver's stops and splits large stop sets into spatial
//! groups. Everything is pure, synchronous computation over in-memory points; all
//! distances are haversine (great-circle) kilometers, not road distances.
//!
//! - [`geo`]: coordinates, points, haversine distance
//! - [`route`]: priority-aware nearest-neighbor sequencing
//! - [`cluster`]: k-means on the sphere (farthest-point k-means++ seeding, Lloyd
//!   iterations) and elbow-method choice of `k`
//!
//! No call holds shared state, so independent calls (say, one per driver) can run
//! on separate threads without coordination.

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;
pub mod geo;
pub mod route;

pub use cluster::{
    cluster, find_optimal_k, optimize_cluster_route, Cluster, Clustering, ClusteringResult,
    Elbow, GeoKmeans,
};
pub use error::{Error, Result};
pub use geo::{format_distance, haversine_km, retain_located, Coordinate, Point};
pub use route::{route_distance_km, sequence_route, Route};
