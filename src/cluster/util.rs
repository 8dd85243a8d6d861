use crate::error::{Error, Result};
use crate::geo::{Coordinate, Point};

/// Index of the centroid closest to `point`. The first centroid wins on ties.
///
/// `centers` must be non-empty.
#[inline]
pub(crate) fn nearest_centroid(point: &Point, centers: &[Coordinate]) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (idx, center) in centers.iter().enumerate() {
        let d = point.distance_km(center);
        if d < best_dist {
            best_dist = d;
            best = idx;
        }
    }
    best
}

/// Unweighted mean latitude and mean longitude of `members` (indices into `points`).
///
/// Returns `None` for an empty member list.
pub(crate) fn mean_coordinate(points: &[Point], members: &[usize]) -> Option<Coordinate> {
    if members.is_empty() {
        return None;
    }

    let (lat_sum, lon_sum) = members.iter().fold((0.0, 0.0), |(lat, lon), &i| {
        (lat + points[i].latitude, lon + points[i].longitude)
    });
    let n = members.len() as f64;
    Some(Coordinate::new(lat_sum / n, lon_sum / n))
}

/// Reject Lloyd settings that cannot produce a result.
pub(crate) fn check_iteration_params(max_iter: usize, tolerance: f64) -> Result<()> {
    if max_iter == 0 {
        return Err(Error::InvalidParameter {
            name: "max_iter",
            message: "must be at least 1",
        });
    }

    if tolerance.is_nan() || tolerance < 0.0 {
        return Err(Error::InvalidParameter {
            name: "tolerance",
            message: "must be a non-negative number",
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_centroid_prefers_first_on_ties() {
        let p = Point::new("p", 0.0, 0.0);
        let centers = [Coordinate::new(0.0, 1.0), Coordinate::new(0.0, -1.0)];
        assert_eq!(nearest_centroid(&p, &centers), 0);

        let centers = [Coordinate::new(5.0, 5.0), Coordinate::new(0.0, 0.1)];
        assert_eq!(nearest_centroid(&p, &centers), 1);
    }

    #[test]
    fn mean_of_members_only() {
        let points = vec![
            Point::new("a", 0.0, 0.0),
            Point::new("b", 2.0, 4.0),
            Point::new("c", 50.0, 50.0),
        ];
        assert_eq!(
            mean_coordinate(&points, &[0, 1]),
            Some(Coordinate::new(1.0, 2.0))
        );
        assert_eq!(mean_coordinate(&points, &[]), None);
    }

    #[test]
    fn iteration_params() {
        assert!(check_iteration_params(100, 1e-4).is_ok());
        assert!(check_iteration_params(1, 0.0).is_ok());
        assert!(check_iteration_params(0, 1e-4).is_err());
        assert!(check_iteration_params(10, -1.0).is_err());
        assert!(check_iteration_params(10, f64::NAN).is_err());
    }
}
