//! Geometry primitives: coordinates, delivery points, and great-circle distance.
//!
//! Every distance in this crate is a haversine distance on a sphere of radius
//! [`EARTH_RADIUS_KM`]. Nothing treats degrees as planar coordinates.
//!
//! ```text
//! a = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlon/2)
//! d = 2·R·asin(√a)
//! ```
//!
//! Inputs are not validated. Non-finite coordinates propagate `NaN` through
//! every distance, route length and centroid that touches them; supplying finite
//! latitude/longitude pairs is the caller's job.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two `(lat, lon)` pairs given in degrees.
#[inline]
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    // Rounding can push `a` just past 1 for antipodal points. NaN passes through.
    let a = if a > 1.0 { 1.0 } else { a };

    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Coordinate {
    /// Latitude, `-90..=90`.
    pub latitude: f64,
    /// Longitude, `-180..=180`.
    pub longitude: f64,
}

impl Coordinate {
    /// Create a coordinate.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Haversine distance to `other` in kilometers.
    #[inline]
    pub fn distance_km(&self, other: &Coordinate) -> f64 {
        haversine_km(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((latitude, longitude): (f64, f64)) -> Self {
        Self::new(latitude, longitude)
    }
}

/// A delivery stop handed to the sequencer or the cluster engine.
///
/// Points are never mutated by this crate. Cluster membership is reported on the
/// returned [`crate::ClusteringResult`] instead of being stamped on the point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    /// Opaque identifier, unique within one call.
    pub id: String,
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
    /// Urgency tier; higher is more urgent.
    #[cfg_attr(feature = "serde", serde(default))]
    pub priority: i32,
    /// Optional display label (usually the customer address).
    #[cfg_attr(feature = "serde", serde(default))]
    pub label: Option<String>,
}

impl Point {
    /// Create a point with priority 0 and no label.
    pub fn new(id: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.into(),
            latitude,
            longitude,
            priority: 0,
            label: None,
        }
    }

    /// Set the priority tier.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Position of this point.
    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    /// Haversine distance from this point to `to`, in kilometers.
    #[inline]
    pub fn distance_km(&self, to: &Coordinate) -> f64 {
        haversine_km(self.latitude, self.longitude, to.latitude, to.longitude)
    }

    /// False for the exact `(0.0, 0.0)` placeholder the delivery store writes
    /// when no location was captured.
    ///
    /// The sequencer and cluster engine treat `(0, 0)` as an ordinary point; this is
    /// for callers that want to drop placeholders first.
    pub fn has_location(&self) -> bool {
        self.latitude != 0.0 || self.longitude != 0.0
    }
}

/// Drop placeholder points (see [`Point::has_location`]), keeping input order.
pub fn retain_located(points: Vec<Point>) -> Vec<Point> {
    points.into_iter().filter(Point::has_location).collect()
}

/// Render a distance for display: whole meters below 1 km, one decimal in km above.
pub fn format_distance(km: f64) -> String {
    let meters = km * 1000.0;
    if meters < 1000.0 {
        format!("{}m", meters as i64)
    } else {
        format!("{:.1} km", km)
    }
}
