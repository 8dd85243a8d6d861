//! Route sequencing for a single driver's run.
//!
//! ## Priority-aware nearest neighbor
//!
//! Stops are grouped into priority tiers (highest first). Within a tier the
//! route is a greedy nearest-neighbor walk: from the current position, go to the
//! closest unvisited stop, then repeat from there. A tier is exhausted before any
//! stop of a lower tier is considered, even when a lower-priority stop is closer.
//!
//! The walk carries position across tiers: the first stop of a tier is the one
//! nearest to the last stop of the previous tier.
//!
//! This is a heuristic. It gives no optimality guarantee and ignores the road
//! network; every leg is a haversine distance.
//!
//! ## Usage
//!
//! ```rust
//! use waypoint::{sequence_route, Coordinate, Point};
//!
//! let stops = vec![
//!     Point::new("far", 10.0, 10.0),
//!     Point::new("near", 0.0, 1.0),
//!     Point::new("urgent", 10.0, 11.0).with_priority(5),
//! ];
//!
//! let route = sequence_route(&stops, Coordinate::new(0.0, 0.0));
//! assert_eq!(route.ids(), vec!["urgent", "far", "near"]);
//! ```

mod sequencer;

pub use sequencer::{route_distance_km, sequence_route, Route};
