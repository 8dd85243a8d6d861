use crate::error::Result;
use crate::geo::Point;

/// Common interface for hard clustering of delivery points (one label per point).
pub trait Clustering {
    /// Fit the model and return one cluster index per input point, in input order.
    fn fit_predict(&self, points: &[Point]) -> Result<Vec<usize>>;

    /// The configured number of clusters.
    fn n_clusters(&self) -> usize;
}
