/// Type of the number of points in a dataset (and of the number of clusters k).
pub type PointCount = usize;
/// Type of a single coordinate of a point.
pub type Value = f64;
/// Type of the distance between two points.
pub type Distance = f64;
/// Type of the running time of a computation.
pub type DurationInSec = f64;

pub(crate) type PointIdx = usize;
pub(crate) type ClusterIdx = usize;
pub(crate) type Dimension = usize;
