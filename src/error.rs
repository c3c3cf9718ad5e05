use thiserror::Error;

use crate::clustering::Clustering;
use crate::types::{PointIdx,Dimension};

/// Everything that can go wrong while loading a dataset or computing a clustering.
#[derive(Debug, Error)]
pub enum ClusteringError {
    /// The clustering problem cannot be solved for this input, e.g., an empty dataset or k = 0.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A point (or initial centroid) does not have the dimension of the dataset.
    #[error("point {point} has dimension {found}, but the dataset has dimension {expected}")]
    DimensionMismatch {
        point: PointIdx,
        expected: Dimension,
        found: Dimension,
    },

    /// The iteration cap was reached before the centroids stopped moving.
    /// The best-effort clustering of the last iteration is attached.
    #[error("no convergence after {iterations} iterations")]
    DidNotConverge {
        iterations: usize,
        clustering: Box<Clustering>,
    },

    #[error("cannot build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("cannot parse line {line}: {message}")]
    Parse {
        line: usize,
        message: String,
    },
}
