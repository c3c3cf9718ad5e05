use crate::centroids::Centroids;
use crate::space::{Dataset,euclidean_distance};
use crate::types::{ClusterIdx,Value};
use crate::utilities;

use rayon::prelude::*;
use rayon::ThreadPool;

/// Returns the index of the centroid closest to point p. Ties are broken towards the centroid
/// with the smallest index.
pub(crate) fn nearest_centroid(p: &[Value], centroids: &Centroids) -> ClusterIdx {
    // k >= 1 is asserted before phase 1, so there is always a minimum.
    utilities::first_argmin(centroids.iter().map(|c| euclidean_distance(p, c))).unwrap_or(0)
}

/// Phase 2: assign every point of the dataset to its nearest centroid.
/// The assignment is rebuilt from scratch; the result contains the cluster index for each point.
/// If a thread pool is given, the points are distributed among its threads; the result does not
/// depend on the number of threads.
pub(crate) fn assign_to_nearest(space: &Dataset, centroids: &Centroids, thread_pool: Option<&ThreadPool>) -> Vec<ClusterIdx> {
    match thread_pool {
        Some(pool) => pool.install(|| {
            (0..space.n()).into_par_iter()
                .map(|x| nearest_centroid(space.get(x), centroids))
                .collect()
        }),
        None => space.point_iter()
            .map(|p| nearest_centroid(p, centroids))
            .collect(),
    }
}
