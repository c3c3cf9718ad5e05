//////////////////////////////////////////////////////////////
//////////////////// module: clustering //////////////////////
//////////////////////////////////////////////////////////////

//! A clustering is stored as an index array: for each point (by index) the index of the cluster
//! it is assigned to, together with the centroids. It is only valid together with the dataset it
//! was computed on. The point groups themselves are materialized on request by
//! [Clustering::get_clusters].

use crate::centroids::Centroids;
use crate::error::ClusteringError;
use crate::space::Dataset;
use crate::types::{ClusterIdx,PointCount,PointIdx,Value};

use std::fs::File;
use std::io::prelude::*;

/// A total assignment of the points of a dataset to k clusters, and the centroid of each cluster.
#[derive(Debug,Clone,PartialEq)]
pub struct Clustering {
    centroids: Centroids,
    assignment: Vec<ClusterIdx>, // assignment[x] is the cluster of the point with index x
    iterations: usize,
}

impl Clustering {
    pub(crate) fn new(centroids: Centroids, assignment: Vec<ClusterIdx>, iterations: usize) -> Clustering {
        debug_assert!(assignment.iter().all(|&c| c < centroids.k()), "assignment to non-existing cluster");
        Clustering{centroids, assignment, iterations}
    }

    /// Returns the number of clusters k (including empty clusters).
    pub fn k(&self) -> PointCount {
        self.centroids.k()
    }

    /// Returns the centroids; centroid i belongs to cluster i. Empty clusters have their centroid
    /// at the origin.
    pub fn get_centroids(&self) -> &Centroids {
        &self.centroids
    }

    /// Returns for each point (by index) the index of its cluster.
    pub fn get_assignment(&self) -> &Vec<ClusterIdx> {
        &self.assignment
    }

    /// Returns the number of assignment-update rounds that were executed.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Returns the number of points in each cluster.
    pub fn get_cluster_sizes(&self) -> Vec<PointCount> {
        let mut sizes = vec![0; self.k()];
        for &c in self.assignment.iter() {
            sizes[c] += 1;
        }
        sizes
    }

    /// Returns the indices of all points in cluster i, in the order of the dataset.
    pub fn get_cluster_of(&self, i: ClusterIdx) -> Vec<PointIdx> {
        self.assignment.iter().enumerate()
            .filter(|&(_, &c)| c == i)
            .map(|(x, _)| x)
            .collect()
    }

    /// Returns the clusters as groups of points: exactly k groups, group i contains the
    /// positions of all points assigned to cluster i (in the order of the dataset).
    pub fn get_clusters(&self, space: &Dataset) -> Vec<Vec<Vec<Value>>> {
        let mut clusters: Vec<Vec<Vec<Value>>> = vec![Vec::new(); self.k()];
        for (x, &c) in self.assignment.iter().enumerate() {
            clusters[c].push(space.get(x).to_vec());
        }
        clusters
    }

    /// Saves the clustering to the text-file specified by file_path.
    /// The output is as follows:
    /// For each cluster we have one line in the output file of the form
    /// cluster: point_1,point_2,...
    /// where points are given by their index. An empty cluster has nothing after the colon.
    ///
    /// Example:
    /// ```txt
    /// 0:0,4
    /// 1:1,3
    /// 2:2,5,6
    /// ```
    pub fn save_to_file(&self, file_path: &str) -> Result<(), ClusteringError> {
        let mut f = File::create(file_path)?;
        let mut text = String::new();
        for i in 0..self.k() {
            let members: Vec<String> = self.get_cluster_of(i).iter().map(|x| x.to_string()).collect();
            text = text + &format!("{}:{}\n", i, members.join(","));
        }
        text.pop(); // delete last line break
        f.write_all(text.as_bytes())?;
        Ok(())
    }
}
