///////////////////////////////////////////////////////////////
///////////////////// module: space ///////////////////////////
///////////////////////////////////////////////////////////////

//! Module space maintains the dataset that is clustered: a non-empty list of points in the
//! d-dimensional Euclidean space (d >= 1). For the emotion palette d = 3 (R, G, B).
//!
//! A [Dataset] can be created
//! - from a vector of points by [Dataset::by_ndpoints],
//! - from a fixed-size array by [Dataset::by_array],
//! - from a text-file by [Dataset::by_file],
//! - at random by [Dataset::new_random].
//!
//! Distances are given by [euclidean_distance].

use crate::error::ClusteringError;
use crate::types::{Dimension,Distance,PointCount,PointIdx,Value};

use rand::Rng;
use std::fs::File;
use std::io::{BufReader,BufRead};
use tracing::{debug,info};

/// Returns the Euclidean distance sqrt(sum (a_i - b_i)^2) between two points of the same
/// dimension.
///
/// # Example
/// ```rust
/// use sine_k_means::euclidean_distance;
/// assert_eq!(euclidean_distance(&[0.0, 0.0, 0.0], &[3.0, 4.0, 0.0]), 5.0);
/// ```
pub fn euclidean_distance(a: &[Value], b: &[Value]) -> Distance {
    debug_assert_eq!(a.len(), b.len(), "points of different dimension");
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<Distance>()
        .sqrt()
}

/// A dataset of n points of the same dimension d. Duplicates are allowed; the order of the
/// points is fixed and a point is referred to by its index 0..n-1.
#[derive(Debug,Clone,PartialEq)]
pub struct Dataset {
    positions: Vec<Vec<Value>>,
    dim: Dimension,
}

impl Dataset {
    /// Creates a new [Dataset] from a vector of points.
    ///
    /// # Errors
    ///
    /// * [ClusteringError::InvalidArgument] if there are no points, if the points have dimension
    /// 0 or if a coordinate is not finite;
    /// * [ClusteringError::DimensionMismatch] if a point has a different dimension than the
    /// first one.
    ///
    /// # Example
    /// ```rust
    /// use sine_k_means::Dataset;
    /// let data = Dataset::by_ndpoints(vec![vec![0.0, 1.0], vec![2.0, 3.0], vec![2.0, 3.0]]).unwrap();
    /// assert_eq!(data.n(), 3);
    /// assert_eq!(data.dim(), 2);
    /// assert_eq!(data.get(1), &[2.0, 3.0]);
    /// ```
    pub fn by_ndpoints(positions: Vec<Vec<Value>>) -> Result<Dataset, ClusteringError> {
        let dim = match positions.first() {
            Some(p) => p.len(),
            None => return Err(ClusteringError::InvalidArgument("the dataset contains no points".to_string())),
        };
        if dim == 0 {
            return Err(ClusteringError::InvalidArgument("points must have at least one coordinate".to_string()));
        }
        for (i, p) in positions.iter().enumerate() {
            if p.len() != dim {
                return Err(ClusteringError::DimensionMismatch{point: i, expected: dim, found: p.len()});
            }
            if p.iter().any(|x| !x.is_finite()) {
                return Err(ClusteringError::InvalidArgument(format!("point {} has a coordinate that is not finite: {:?}", i, p)));
            }
        }
        Ok(Dataset{positions, dim})
    }

    /// Creates a new [Dataset] as in [Dataset::by_ndpoints] but the points are given by an array.
    ///
    /// # Example
    /// ```rust
    /// use sine_k_means::Dataset;
    /// let data = Dataset::by_array([[150.0, 150.0, 175.0], [50.0, 0.0, 100.0]]).unwrap();
    /// assert_eq!(data.n(), 2);
    /// assert_eq!(data.dim(), 3);
    /// ```
    pub fn by_array<const N: PointCount, const D: Dimension>(positions: [[Value; D]; N]) -> Result<Dataset, ClusteringError> {
        Dataset::by_ndpoints(positions.iter().map(|p| p.to_vec()).collect())
    }

    /// Creates a new [Dataset] with n random points of dimension dim, each coordinate in [0, 255).
    /// If n or dim is 0 we create a single point at the origin of dimension max(dim,1).
    pub fn new_random<R: Rng + ?Sized>(n: PointCount, dim: Dimension, rng: &mut R) -> Dataset {
        let dim = dim.max(1);
        let positions: Vec<Vec<Value>> = if n == 0 {
            vec![vec![0.0; dim]]
        } else {
            (0..n).map(|_| (0..dim).map(|_| rng.gen_range(0.0..255.0)).collect()).collect()
        };
        Dataset{positions, dim}
    }

    /// Loads a new [Dataset] from a text-file.
    /// The expected_number_of_points is used to allocate enough storage.
    /// Each line contains one point; its coordinates are separated by a comma (no comma at the
    /// end). Blank lines are skipped.
    ///
    /// Example:
    /// ```txt
    /// 150,150,175
    /// 50,0,100
    /// 200,50,50
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, if a coordinate cannot be parsed (the error
    /// contains the line number, starting at 1) or if the points violate [Dataset::by_ndpoints].
    pub fn by_file(file_path: &str, expected_number_of_points: PointCount) -> Result<Dataset, ClusteringError> {
        let f = BufReader::new(File::open(file_path)?);

        let mut positions: Vec<Vec<Value>> = Vec::with_capacity(expected_number_of_points);
        for (i, line) in f.lines().enumerate() {
            let content = line?;
            if content.trim().is_empty() {
                continue;
            }
            let mut position: Vec<Value> = Vec::new();
            for entry in content.split(',') {
                let x = entry.trim().parse::<Value>().map_err(|e| ClusteringError::Parse{
                    line: i + 1,
                    message: format!("'{}' is not a number ({})", entry.trim(), e),
                })?;
                position.push(x);
            }
            positions.push(position);
        }
        info!("Loaded {} points from '{}'", positions.len(), file_path);
        debug!("positions: {:?}", positions);

        Dataset::by_ndpoints(positions)
    }

    /// Creates a [Dataset] from points that are known to be valid (non-empty, same dimension >= 1,
    /// finite coordinates).
    pub(crate) fn by_valid_ndpoints(positions: Vec<Vec<Value>>) -> Dataset {
        let dim = positions.first().map_or(0, |p| p.len());
        debug_assert!(dim > 0 && positions.iter().all(|p| p.len() == dim));
        Dataset{positions, dim}
    }

    /// Returns the number of points n.
    pub fn n(&self) -> PointCount {
        self.positions.len()
    }

    /// Returns the dimension d of the points.
    pub fn dim(&self) -> Dimension {
        self.dim
    }

    /// Returns the coordinates of the point with index i.
    ///
    /// # Panics
    ///
    /// Panics if i >= n.
    pub fn get(&self, i: PointIdx) -> &[Value] {
        &self.positions[i]
    }

    /// Provides an iterator over all points in their original order.
    pub fn point_iter(&self) -> std::slice::Iter<Vec<Value>> {
        self.positions.iter()
    }

    /// Returns a copy of all positions.
    pub fn get_positions(&self) -> Vec<Vec<Value>> {
        self.positions.clone()
    }
}
