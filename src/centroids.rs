//////////////////////////////////////////////////////////////
//////////////////// module: centroids ///////////////////////
//////////////////////////////////////////////////////////////

use crate::error::ClusteringError;
use crate::types::{ClusterIdx,Dimension,PointCount,Value};
use crate::ConvergenceCriterion;

use std::fs::File;
use std::io::prelude::*;

/// The list of the k current centroids. Centroid i belongs to cluster i.
/// A centroid is not necessarily a point of the dataset.
#[derive(Debug,Clone,PartialEq)]
pub struct Centroids {
    centroids: Vec<Vec<Value>>,
}

impl Centroids {
    /// Creates a list of centroids from their positions.
    ///
    /// # Example
    /// ```rust
    /// use sine_k_means::Centroids;
    /// let centroids = Centroids::new(vec![vec![0.0, 0.0, 0.0], vec![10.0, 10.0, 10.0]]);
    /// assert_eq!(centroids.k(), 2);
    /// assert_eq!(centroids.get(1), &[10.0, 10.0, 10.0]);
    /// ```
    pub fn new(centroids: Vec<Vec<Value>>) -> Centroids {
        Centroids{centroids}
    }

    /// Creates a new empty list of centroids. The capacity is used to allocate enough storage on
    /// the heap.
    pub(crate) fn with_capacity(capacity: PointCount) -> Centroids {
        Centroids{centroids: Vec::with_capacity(capacity)}
    }

    /// Returns the number of centroids k.
    pub fn k(&self) -> PointCount {
        self.centroids.len()
    }

    /// Returns the position of centroid i (from 0 to k-1).
    ///
    /// # Panics
    ///
    /// Panics if i >= k.
    pub fn get(&self, i: ClusterIdx) -> &[Value] {
        &self.centroids[i]
    }

    /// Adds a new centroid to the list.
    pub(crate) fn push(&mut self, c: Vec<Value>) {
        self.centroids.push(c);
    }

    /// Provides an iterator of the centroids.
    pub fn iter(&self) -> std::slice::Iter<Vec<Value>> {
        self.centroids.iter()
    }

    /// Returns a copy of all centroid positions.
    pub fn get_all(&self) -> Vec<Vec<Value>> {
        self.centroids.clone()
    }

    /// Checks that there are exactly k centroids, each of dimension dim.
    pub(crate) fn check_shape(&self, k: PointCount, dim: Dimension) -> Result<(), ClusteringError> {
        if self.k() != k {
            return Err(ClusteringError::InvalidArgument(format!("{} initial centroids were given, but k = {}", self.k(), k)));
        }
        for (i, c) in self.iter().enumerate() {
            if c.len() != dim {
                return Err(ClusteringError::DimensionMismatch{point: i, expected: dim, found: c.len()});
            }
        }
        Ok(())
    }

    /// Returns true if no centroid moved between self and other.
    /// Under [ConvergenceCriterion::Exact] coordinates have to be equal; under
    /// [ConvergenceCriterion::Tolerance] each centroid may move by at most the tolerance (in
    /// Euclidean distance).
    pub fn unchanged(&self, other: &Centroids, criterion: ConvergenceCriterion) -> bool {
        if self.k() != other.k() {
            return false;
        }
        match criterion {
            ConvergenceCriterion::Exact => self.centroids == other.centroids,
            ConvergenceCriterion::Tolerance(eps) => self.iter().zip(other.iter())
                .all(|(a, b)| crate::space::euclidean_distance(a, b) <= eps),
        }
    }

    /// Saves the centroids to a file specified by file_path.
    /// Each line contains one centroid; its coordinates are separated by a comma.
    ///
    /// Example:
    ///
    /// ```txt
    /// 162.5,162.5,187.5
    /// 62.5,0,112.5
    /// 225,116.66666666666667,33.333333333333336
    /// ```
    pub fn save_to_file(&self, file_path: &str) -> Result<(), ClusteringError> {
        let mut f = File::create(file_path)?;
        let mut text = String::new();
        for c in self.centroids.iter() {
            let coordinates: Vec<String> = c.iter().map(|x| x.to_string()).collect();
            text = text + &coordinates.join(",") + "\n";
        }
        text.pop(); // delete last line break
        f.write_all(text.as_bytes())?;
        Ok(())
    }
}
