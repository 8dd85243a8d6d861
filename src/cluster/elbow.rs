//! Elbow-method choice of `k`.
//!
//! Run a full clustering for every `k` in `1..=min(max_k, n)` and record the
//! distortion of each. The suggested `k` is where the discrete second difference
//!
//! ```text
//! curvature(k) = distortion(k-1) + distortion(k+1) - 2·distortion(k)
//! ```
//!
//! peaks. Only interior `k` have a curvature. If no curvature is positive, or there
//! are two points or fewer, the answer is `1`. Ties go to the smallest `k`.
//!
//! This is a heuristic, not a guarantee of the "true" number of groups.

use super::kmeans::{GeoKmeans, CONVERGENCE_THRESHOLD_KM, MAX_ITERATIONS};
use super::util::check_iteration_params;
use crate::error::Result;
use crate::geo::Point;
use rand::prelude::*;
use tracing::debug;

/// Default upper bound on the cluster counts tried.
pub const DEFAULT_MAX_K: usize = 10;

/// Elbow-method search over `k`.
#[derive(Debug, Clone)]
pub struct Elbow {
    max_k: usize,
    max_iter: usize,
    tolerance: f64,
    seed: Option<u64>,
}

impl Elbow {
    /// Try every `k` up to `max_k` (capped at the number of points).
    pub fn new(max_k: usize) -> Self {
        Self {
            max_k,
            max_iter: MAX_ITERATIONS,
            tolerance: CONVERGENCE_THRESHOLD_KM,
            seed: None,
        }
    }

    /// Iteration cap for each clustering run.
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Convergence threshold (km) for each clustering run.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Pin seeding. Run `k` is seeded with `seed + k`, so runs stay independent.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Distortion for `k = 1..=min(max_k, n)`; entry `i` belongs to `k = i + 1`.
    pub fn distortions(&self, points: &[Point]) -> Result<Vec<f64>> {
        check_iteration_params(self.max_iter, self.tolerance)?;
        Ok(self.distortion_curve(points))
    }

    /// Suggested cluster count, always in `1..=max(1, min(max_k, n))`.
    pub fn suggest_k(&self, points: &[Point]) -> Result<usize> {
        check_iteration_params(self.max_iter, self.tolerance)?;
        Ok(self.suggest_k_unchecked(points))
    }

    fn suggest_k_unchecked(&self, points: &[Point]) -> usize {
        if points.len() <= 2 {
            return 1;
        }
        let curve = self.distortion_curve(points);
        let k = elbow_point(&curve);
        debug!(k, tried = curve.len(), "elbow choice");
        k
    }

    fn distortion_curve(&self, points: &[Point]) -> Vec<f64> {
        let upper = self.max_k.min(points.len());
        (1..=upper)
            .map(|k| {
                let model = GeoKmeans::new(k)
                    .with_max_iter(self.max_iter)
                    .with_tolerance(self.tolerance);
                let result = match self.seed {
                    Some(s) => {
                        let mut rng = StdRng::seed_from_u64(s.wrapping_add(k as u64));
                        model.fit_unchecked(points, &mut rng)
                    }
                    None => model.fit_unchecked(points, &mut rand::rng()),
                };
                result.total_distortion_km
            })
            .collect()
    }
}

impl Default for Elbow {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_K)
    }
}

/// Suggest a cluster count for `points`, trying at most `max_k` clusters.
///
/// Returns `1` for two points or fewer without clustering anything.
pub fn find_optimal_k(points: &[Point], max_k: usize) -> usize {
    Elbow::new(max_k).suggest_k_unchecked(points)
}

/// `k` (1-based) with maximum positive curvature, or `1` if there is none.
fn elbow_point(distortions: &[f64]) -> usize {
    let mut best_k = 1;
    let mut best_curvature = 0.0;
    for i in 1..distortions.len().saturating_sub(1) {
        let curvature = distortions[i - 1] + distortions[i + 1] - 2.0 * distortions[i];
        if curvature > best_curvature {
            best_curvature = curvature;
            best_k = i + 1;
        }
    }
    best_k
}
