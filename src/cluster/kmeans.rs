//! K-means on the sphere.
//!
//! Lloyd's algorithm with haversine distance for assignment and an arithmetic
//! mean of latitudes and longitudes for the update step:
//!
//! 1. Assign every point to its nearest centroid (first centroid wins ties).
//! 2. Move each centroid to the mean of its members.
//! 3. Stop once no centroid moved more than `tolerance` km, or after `max_iter`
//!    rounds. Hitting the cap is not an error.
//!
//! A centroid that receives no members keeps its position for that round. The
//! cluster count therefore stays at exactly `k`, at the cost of possibly leaving a
//! cluster empty on pathological inputs.
//!
//! The coordinate mean is not the spherical centroid. For delivery sets that span a
//! city or region the difference is negligible; sets straddling the antimeridian
//! get a meaningless mean longitude.
//!
//! Distortion is a sum of distances, which the mean does not minimize. The
//! assignment step never raises it, but an update step can raise it by at most
//! each member's share of its centroid's shift. On city-scale sets the rise is
//! rare and tiny; continental-scale sets can see distortion increase slightly
//! between rounds.

use super::seeding::farthest_point_seeds;
use super::traits::Clustering;
use super::util::{check_iteration_params, mean_coordinate, nearest_centroid};
use crate::error::{Error, Result};
use crate::geo::{Coordinate, Point};
use crate::route::{sequence_route, Route};
use rand::prelude::*;
use std::collections::HashMap;
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default iteration cap.
pub const MAX_ITERATIONS: usize = 100;

/// Default convergence threshold: largest centroid movement (km) still counted as settled.
pub const CONVERGENCE_THRESHOLD_KM: f64 = 0.0001;

/// K-means estimator for delivery points.
#[derive(Debug, Clone)]
pub struct GeoKmeans {
    k: usize,
    max_iter: usize,
    tolerance: f64,
    seed: Option<u64>,
}

/// One spatial group of points.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cluster {
    /// 0-based index, stable for the run.
    pub index: usize,
    /// Final centroid.
    pub center: Coordinate,
    /// Points assigned in the last round, in input order.
    pub members: Vec<Point>,
}

/// Output of one clustering run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClusteringResult {
    /// Exactly `k` clusters, indexed `0..k`. Some may be empty.
    pub clusters: Vec<Cluster>,
    /// Cluster index per input point, in input order.
    pub labels: Vec<usize>,
    /// Lloyd rounds performed (at most the iteration cap).
    pub iterations: usize,
    /// Whether the run settled before the iteration cap.
    pub converged: bool,
    /// Sum over all points of the distance to their own cluster's centroid, in km.
    pub total_distortion_km: f64,
}

impl GeoKmeans {
    /// Create an estimator for `k` clusters with the default iteration cap and threshold.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: MAX_ITERATIONS,
            tolerance: CONVERGENCE_THRESHOLD_KM,
            seed: None,
        }
    }

    /// Set the number of clusters.
    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    /// Set the iteration cap.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the convergence threshold in km.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Pin the random first-centroid choice.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Cluster `points` into exactly `k` groups.
    ///
    /// Fails with [`Error::InvalidClusterCount`] unless `1 <= k <= points.len()`
    /// (so an empty input always fails), and with [`Error::InvalidParameter`] for a
    /// zero iteration cap or a negative/NaN tolerance. Validation happens before any
    /// work.
    pub fn fit(&self, points: &[Point]) -> Result<ClusteringResult> {
        if self.k == 0 || self.k > points.len() {
            return Err(Error::InvalidClusterCount {
                requested: self.k,
                n_items: points.len(),
            });
        }
        check_iteration_params(self.max_iter, self.tolerance)?;

        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };
        Ok(self.fit_unchecked(points, &mut *rng))
    }

    /// Lloyd iterations without argument checks.
    pub(crate) fn fit_unchecked<R: Rng + ?Sized>(
        &self,
        points: &[Point],
        rng: &mut R,
    ) -> ClusteringResult {
        let n = points.len();
        let mut centers: Vec<Coordinate> = farthest_point_seeds(points, self.k, rng)
            .into_iter()
            .map(|i| points[i].coordinate())
            .collect();
        let mut members: Vec<Vec<usize>> = vec![Vec::new(); self.k];
        let mut labels = vec![0usize; n];

        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iter && !converged {
            // Assignment step.
            for m in &mut members {
                m.clear();
            }
            for (i, point) in points.iter().enumerate() {
                let c = nearest_centroid(point, &centers);
                members[c].push(i);
                labels[i] = c;
            }

            // Update step. Empty clusters keep their centroid.
            let mut max_shift: f64 = 0.0;
            for (center, assigned) in centers.iter_mut().zip(&members) {
                if let Some(mean) = mean_coordinate(points, assigned) {
                    max_shift = max_shift.max(center.distance_km(&mean));
                    *center = mean;
                }
            }

            iterations += 1;
            converged = max_shift <= self.tolerance;
            trace!(iteration = iterations, max_shift_km = max_shift, "lloyd round");
        }

        let clusters: Vec<Cluster> = centers
            .into_iter()
            .zip(members)
            .enumerate()
            .map(|(index, (center, assigned))| Cluster {
                index,
                center,
                members: assigned.into_iter().map(|i| points[i].clone()).collect(),
            })
            .collect();

        let total_distortion_km: f64 = clusters.iter().map(Cluster::distortion_km).sum();

        debug!(
            k = self.k,
            points = n,
            iterations,
            converged,
            distortion_km = total_distortion_km,
            "k-means finished"
        );

        ClusteringResult {
            clusters,
            labels,
            iterations,
            converged,
            total_distortion_km,
        }
    }
}

impl Default for GeoKmeans {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Clustering for GeoKmeans {
    fn fit_predict(&self, points: &[Point]) -> Result<Vec<usize>> {
        Ok(self.fit(points)?.labels)
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

impl Cluster {
    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True if no point was assigned here in the last round.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Sum of member distances to the centroid, in km.
    pub fn distortion_km(&self) -> f64 {
        self.members
            .iter()
            .map(|p| p.distance_km(&self.center))
            .sum()
    }

    /// Sequence this cluster's members from `start` (see [`sequence_route`]).
    pub fn route_from(&self, start: Coordinate) -> Route {
        sequence_route(&self.members, start)
    }
}

impl ClusteringResult {
    /// Number of clusters, including empty ones.
    pub fn k(&self) -> usize {
        self.clusters.len()
    }

    /// Point id to cluster index.
    pub fn assignments(&self) -> HashMap<&str, usize> {
        self.clusters
            .iter()
            .flat_map(|c| c.members.iter().map(move |p| (p.id.as_str(), c.index)))
            .collect()
    }

    /// One route per cluster, all starting from `start`.
    pub fn routes(&self, start: Coordinate) -> Vec<Route> {
        self.clusters.iter().map(|c| c.route_from(start)).collect()
    }
}
