use crate::centroids::Centroids;
use crate::space::Dataset;
use crate::types::PointCount;

use rand::Rng;
use tracing::debug;

/// Phase 1: choose k initial centroids by drawing k points of the dataset independently and
/// uniformly at random, with replacement. The same point can be drawn more than once; such
/// duplicates are kept.
pub(crate) fn random_initialization<R: Rng + ?Sized>(space: &Dataset, k: PointCount, rng: &mut R) -> Centroids {
    let mut centroids = Centroids::with_capacity(k);
    let mut drawn: Vec<usize> = Vec::with_capacity(k);
    for _ in 0..k {
        let x = rng.gen_range(0..space.n());
        drawn.push(x);
        centroids.push(space.get(x).to_vec());
    }
    debug!("Initial centroids drawn from points {:?}", drawn);
    centroids
}
