use crate::centroids::Centroids;
use crate::space::Dataset;
use crate::types::{ClusterIdx,PointCount,Value};
use crate::utilities;

/// Phase 3: recompute the centroid of each of the k clusters as the element-wise mean of the
/// points assigned to it. A cluster without points gets its centroid at the origin.
pub(crate) fn update_centroids(space: &Dataset, assignment: &[ClusterIdx], k: PointCount) -> Centroids {
    let mut members: Vec<Vec<&[Value]>> = vec![Vec::new(); k];
    for (x, &c) in assignment.iter().enumerate() {
        members[c].push(space.get(x));
    }
    Centroids::new(members.into_iter().map(|m| utilities::mean(m, space.dim())).collect())
}
