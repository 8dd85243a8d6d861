use crate::geo::{Coordinate, Point};
use tracing::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An ordered visiting sequence plus its length.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Route {
    /// Where the driver starts (not itself a stop).
    pub start: Coordinate,
    /// Stops in visiting order.
    pub stops: Vec<Point>,
    /// Sum of haversine legs `start -> stops[0] -> ... -> stops[n-1]`, in km.
    pub total_distance_km: f64,
}

impl Route {
    /// Build a route from an already-ordered stop list, computing its length.
    pub fn new(start: Coordinate, stops: Vec<Point>) -> Self {
        let total_distance_km = route_distance_km(&stops, start);
        Self {
            start,
            stops,
            total_distance_km,
        }
    }

    /// A route with no stops and zero length.
    pub fn empty(start: Coordinate) -> Self {
        Self {
            start,
            stops: Vec::new(),
            total_distance_km: 0.0,
        }
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// True if there are no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Stop ids in visiting order.
    pub fn ids(&self) -> Vec<&str> {
        self.stops.iter().map(|p| p.id.as_str()).collect()
    }

    /// The first stop, i.e. where navigation should head next.
    pub fn next_stop(&self) -> Option<&Point> {
        self.stops.first()
    }
}

/// Total length in km of visiting `stops` in the given order, starting from `start`.
///
/// Includes the leg from `start` to the first stop. Empty input gives `0.0`.
pub fn route_distance_km(stops: &[Point], start: Coordinate) -> f64 {
    let mut current = start;
    let mut total = 0.0;
    for stop in stops {
        total += stop.distance_km(&current);
        current = stop.coordinate();
    }
    total
}

/// Order `points` for a single driver starting at `start`.
///
/// Higher priority tiers are fully visited before lower ones; inside a tier the
/// order is a greedy nearest-neighbor walk. Exact ties (same priority, same
/// distance) go to the point that came first in the input.
///
/// Never fails: no points gives an empty route of length `0.0`.
pub fn sequence_route(points: &[Point], start: Coordinate) -> Route {
    if points.is_empty() {
        return Route::empty(start);
    }

    // Stable, so equal tiers keep input order for tie-breaking.
    let mut by_priority: Vec<&Point> = points.iter().collect();
    by_priority.sort_by(|a, b| b.priority.cmp(&a.priority));

    let mut stops: Vec<Point> = Vec::with_capacity(points.len());
    let mut current = start;

    for tier in by_priority.chunk_by(|a, b| a.priority == b.priority) {
        trace!(priority = tier[0].priority, stops = tier.len(), "walking tier");
        let mut remaining = tier.to_vec();
        greedy_walk(&mut remaining, &mut current, &mut stops);
    }

    let route = Route::new(start, stops);
    debug!(
        stops = route.len(),
        distance_km = route.total_distance_km,
        "sequenced route"
    );
    route
}

/// Drain `remaining` nearest-first from `current`, appending to `out`.
fn greedy_walk(remaining: &mut Vec<&Point>, current: &mut Coordinate, out: &mut Vec<Point>) {
    while let Some(idx) = nearest_index(remaining, current) {
        let next = remaining.remove(idx);
        *current = next.coordinate();
        out.push(next.clone());
    }
}

/// Index of the point closest to `from`; first one wins on ties.
fn nearest_index(points: &[&Point], from: &Coordinate) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, p) in points.iter().enumerate() {
        let d = p.distance_km(from);
        if best.map_or(true, |(_, best_d)| d < best_d) {
            best = Some((idx, d));
        }
    }
    best.map(|(idx, _)| idx)
}
