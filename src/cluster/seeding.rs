//! Initial centroid selection (farthest-point k-means++).
//!
//! The first centroid is a uniformly random input point. Every further centroid
//! is the not-yet-chosen point whose distance to its nearest chosen centroid is
//! largest. Only the first pick is random, so a fixed seed pins the whole seeding.
//!
//! Classic k-means++ samples proportionally to squared distance instead; the
//! deterministic variant is kept so runs are reproducible.

use crate::geo::Point;
use rand::prelude::*;
use tracing::{debug, trace};

/// Pick `k` initial centroids from `points`, returned as indices into `points`.
///
/// Callers guarantee `1 <= k <= points.len()`. Each point is chosen at most once,
/// so exactly `k` distinct indices come back even when coordinates repeat.
pub(crate) fn farthest_point_seeds<R: Rng + ?Sized>(
    points: &[Point],
    k: usize,
    rng: &mut R,
) -> Vec<usize> {
    let n = points.len();
    let mut chosen = vec![false; n];
    let mut seeds: Vec<usize> = Vec::with_capacity(k);

    let first = rng.random_range(0..n);
    chosen[first] = true;
    seeds.push(first);

    // Distance from each point to its nearest chosen centroid, updated incrementally.
    let first_center = points[first].coordinate();
    let mut nearest: Vec<f64> = points
        .iter()
        .map(|p| p.distance_km(&first_center))
        .collect();

    while seeds.len() < k {
        let mut farthest: Option<(usize, f64)> = None;
        for (j, &d) in nearest.iter().enumerate() {
            if chosen[j] {
                continue;
            }
            if farthest.map_or(true, |(_, best)| d > best) {
                farthest = Some((j, d));
            }
        }

        let Some((next, dist)) = farthest else {
            break;
        };
        chosen[next] = true;
        seeds.push(next);
        trace!(index = next, distance_km = dist, "next seed");

        let center = points[next].coordinate();

        for (j, p) in points.iter().enumerate() {
            let d = p.distance_km(&center);
            if d < nearest[j] {
                nearest[j] = d;
            }
        }
    }

    debug!(k, seeds = ?seeds, "seeded centroids");
    seeds
}
