use thiserror::Error;

/// Errors returned by the clustering side of this crate.
///
/// Route sequencing never fails: an empty stop list is a valid, empty route.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// Requested cluster count is incompatible with the point set.
    ///
    /// `k` must satisfy `1 <= k <= n_items`, so an empty point set rejects every `k`.
    #[error("invalid cluster count: requested {requested}, but there are {n_items} points")]
    InvalidClusterCount {
        /// Requested number of clusters.
        requested: usize,
        /// Number of points supplied.
        n_items: usize,
    },

    /// Invalid estimator parameter.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
