//! Lloyd's k-means clustering over points of any fixed dimension.
//!
//! The algorithm draws k initial centroids at random from the dataset (with replacement) and then
//! alternates between assigning each point to its nearest centroid and moving each centroid to
//! the mean of its points, until no centroid moves anymore. Empty clusters get their centroid at
//! the origin.
//!
//! In the sine journal it is used to group the emotion color palette
//! ([palette::EMOTION_PALETTE]) into clusters of similar colors.
//!
//! # Example
//! ```rust
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use sine_k_means::cluster_with_rng;
//!
//! let data = vec![vec![0.0, 0.0, 0.0], vec![0.0, 0.0, 1.0], vec![10.0, 10.0, 10.0], vec![10.0, 10.0, 11.0]];
//! let clusters = cluster_with_rng(&data, 2, &mut StdRng::seed_from_u64(1)).unwrap();
//! assert_eq!(clusters.len(), 2);
//! assert_eq!(clusters.iter().map(|c| c.len()).sum::<usize>(), 4);
//! ```

mod types;
pub use types::{PointCount,Value,Distance,DurationInSec};

mod error;
pub use error::ClusteringError;

mod space;
pub use space::{Dataset,euclidean_distance};

mod centroids;
pub use centroids::Centroids;

mod clustering;
pub use clustering::Clustering;

mod assertions;
pub use assertions::{assert_clustering_problem,assert_convergence_criterion,assert_problem_parameters};

mod utilities;

mod phase1;
use phase1::random_initialization;

mod phase2;
use phase2::assign_to_nearest;

mod phase3;
use phase3::update_centroids;

pub mod palette;

#[cfg(feature = "python")]
mod python_interface;

use rand::Rng;
use rayon::{ThreadPool,ThreadPoolBuilder};
use std::time;
use tracing::{debug,info,warn};

/// The number of rounds after which the algorithm gives up if no cap is specified.
pub const DEFAULT_MAX_ITERATIONS: usize = 1000;

/// Below this number of points the assignment runs on the calling thread unless a thread count
/// is given explicitly.
const PARALLEL_THRESHOLD: PointCount = 1024;

/// A k-means clustering problem: the number k of clusters.
#[derive(Debug,Clone,PartialEq,Eq)]
pub struct ClusteringProblem {
    pub k: PointCount, // number of clusters
}

/// When the centroids count as unchanged between two rounds.
#[derive(Debug,Clone,Copy,PartialEq)]
pub enum ConvergenceCriterion {
    /// All coordinates of all centroids are exactly equal.
    Exact,
    /// No centroid moved by more than the given Euclidean distance. The distance has to be finite
    /// and non-negative.
    Tolerance(Value),
}

impl Default for ConvergenceCriterion {
    fn default() -> Self {
        ConvergenceCriterion::Exact
    }
}

/// Optional parameters of the algorithm. Fields that are None fall back to their defaults.
#[derive(Debug,Clone,Default)]
pub struct OptionalParameters {
    /// Number of threads used in the assignment step. Default: all cores (number of cpus) for
    /// datasets of at least 1024 points, a single thread otherwise.
    pub thread_count: Option<usize>,
    /// Maximal number of rounds; Some(0) removes the cap. Default: [DEFAULT_MAX_ITERATIONS].
    pub max_iterations: Option<usize>,
    /// Default: [ConvergenceCriterion::Exact].
    pub convergence: Option<ConvergenceCriterion>,
}

/// Partitions the points of dataset into exactly k clusters (some may be empty) by Lloyd's
/// algorithm. Cluster i contains the points whose nearest final centroid is centroid i, in the
/// order of the dataset. The initial centroids are drawn with the thread-local random number
/// generator; use [cluster_with_rng] for reproducible results.
///
/// # Errors
/// * [ClusteringError::InvalidArgument] if the dataset is empty or k < 1;
/// * [ClusteringError::DimensionMismatch] if the points do not all have the same dimension;
/// * [ClusteringError::DidNotConverge] if the centroids still move after
/// [DEFAULT_MAX_ITERATIONS] rounds.
pub fn cluster(dataset: &[Vec<Value>], k: PointCount) -> Result<Vec<Vec<Vec<Value>>>, ClusteringError> {
    cluster_with_rng(dataset, k, &mut rand::thread_rng())
}

/// As [cluster] but the initial centroids are drawn with the given random number generator.
pub fn cluster_with_rng<R: Rng + ?Sized>(dataset: &[Vec<Value>], k: PointCount, rng: &mut R) -> Result<Vec<Vec<Vec<Value>>>, ClusteringError> {
    let prob = ClusteringProblem{k};
    assert_problem_parameters(&prob)?;
    let space = Dataset::by_ndpoints(dataset.to_vec())?;
    let (clustering, _) = compute_k_means(&space, &prob, rng, None)?;
    Ok(clustering.get_clusters(&space))
}

/// Computes a k-means clustering of the dataset. The k initial centroids are points drawn from
/// the dataset by rng.
///
/// Returns the clustering and the running time in seconds.
///
/// # Example
/// ```rust
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use sine_k_means::{ClusteringProblem,compute_k_means,palette::emotion_palette};
///
/// let palette = emotion_palette();
/// let mut rng = StdRng::seed_from_u64(2024);
/// let (clustering, _time) = compute_k_means(&palette, &ClusteringProblem{k: 3}, &mut rng, None).unwrap();
/// assert_eq!(clustering.k(), 3);
/// assert_eq!(clustering.get_cluster_sizes().iter().sum::<usize>(), 7);
/// ```
pub fn compute_k_means<R: Rng + ?Sized>(space: &Dataset, prob: &ClusteringProblem, rng: &mut R, optional: Option<OptionalParameters>) -> Result<(Clustering, DurationInSec), ClusteringError> {
    assert_clustering_problem(space, prob)?;
    let start = time::Instant::now();

    ///////////////////////////////////////////////////////////////////
    // phase 1: draw k initial centroids from the dataset at random //
    ///////////////////////////////////////////////////////////////////

    let initial = random_initialization(space, prob.k, rng);

    lloyd(space, prob, initial, optional.unwrap_or_default(), start)
}

/// Computes a k-means clustering of the dataset starting from the given initial centroids
/// instead of random ones.
///
/// # Errors
/// Additionally to the errors of [compute_k_means], returns an error if the number of initial
/// centroids differs from k or if their dimension differs from the dataset.
///
/// # Example
/// ```rust
/// use sine_k_means::{Centroids,ClusteringProblem,Dataset,compute_k_means_from};
///
/// let space = Dataset::by_array([[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [10.0, 10.0, 10.0], [10.0, 10.0, 11.0]]).unwrap();
/// let initial = Centroids::new(vec![vec![0.0, 0.0, 0.0], vec![10.0, 10.0, 10.0]]);
/// let (clustering, _) = compute_k_means_from(&space, &ClusteringProblem{k: 2}, initial, None).unwrap();
/// assert_eq!(clustering.get_assignment(), &vec![0, 0, 1, 1]);
/// ```
pub fn compute_k_means_from(space: &Dataset, prob: &ClusteringProblem, initial: Centroids, optional: Option<OptionalParameters>) -> Result<(Clustering, DurationInSec), ClusteringError> {
    assert_clustering_problem(space, prob)?;
    initial.check_shape(prob.k, space.dim())?;
    let start = time::Instant::now();
    lloyd(space, prob, initial, optional.unwrap_or_default(), start)
}

fn build_thread_pool(n: PointCount, thread_count: Option<usize>) -> Result<Option<ThreadPool>, ClusteringError> {
    let threads = match thread_count {
        Some(0) => num_cpus::get(),
        Some(t) => t,
        None if n >= PARALLEL_THRESHOLD => num_cpus::get(),
        None => 1,
    };
    if threads <= 1 {
        return Ok(None);
    }
    Ok(Some(ThreadPoolBuilder::new().num_threads(threads).build()?))
}

fn lloyd(space: &Dataset, prob: &ClusteringProblem, initial: Centroids, optional: OptionalParameters, start: time::Instant) -> Result<(Clustering, DurationInSec), ClusteringError> {
    let criterion = optional.convergence.unwrap_or_default();
    assert_convergence_criterion(criterion)?;
    let thread_pool = build_thread_pool(space.n(), optional.thread_count)?;
    let max_iterations = optional.max_iterations.unwrap_or(DEFAULT_MAX_ITERATIONS);

    let mut centroids = initial;
    let mut previous_assignment: Option<Vec<usize>> = None;
    let mut iteration: usize = 0;

    loop {
        iteration += 1;

        ///////////////////////////////////////////////////////////////
        // phase 2: assign every point to its nearest centroid       //
        ///////////////////////////////////////////////////////////////

        let assignment = assign_to_nearest(space, &centroids, thread_pool.as_ref());

        ///////////////////////////////////////////////////////////////
        // phase 3: move every centroid to the mean of its points    //
        ///////////////////////////////////////////////////////////////

        let new_centroids = update_centroids(space, &assignment, prob.k);

        let moved = match &previous_assignment {
            Some(previous) => previous.iter().zip(assignment.iter()).filter(|(a, b)| a != b).count(),
            None => space.n(),
        };
        let clustering = Clustering::new(new_centroids, assignment, iteration);
        debug!("Round {}: {} points changed their cluster; cluster sizes: {:?}", iteration, moved, clustering.get_cluster_sizes());

        if clustering.get_centroids().unchanged(&centroids, criterion) {
            let total_time = start.elapsed().as_secs_f64();
            info!("Converged after {} rounds: k = {}, n = {}, dimension = {}; cluster sizes: {:?}; running time: {:.6}s",
                  iteration, prob.k, space.n(), space.dim(), clustering.get_cluster_sizes(), total_time);
            return Ok((clustering, total_time));
        }

        if max_iterations > 0 && iteration >= max_iterations {
            warn!("No convergence after {} rounds (k = {}, n = {}). Returning the clustering of the last round.", iteration, prob.k, space.n());
            return Err(ClusteringError::DidNotConverge{iterations: iteration, clustering: Box::new(clustering)});
        }

        centroids = clustering.get_centroids().clone();
        previous_assignment = Some(clustering.get_assignment().clone());
    }
}

/// Installs a global tracing subscriber that prints to stderr.
/// verbose: 0 = warnings only, 1 = brief (info), 2 = verbose (debug). The environment variable
/// RUST_LOG takes precedence. The subscriber is global and installed once per process: later
/// calls do not change the level and return false.
pub fn init_tracing(verbose: u8) -> bool {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// The python module; it contains the class KMeans.
#[cfg(feature = "python")]
#[pymodule]
fn sine_k_means(py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<python_interface::KMeans>()?;
    m.add("InvalidArgumentError", py.get_type::<python_interface::InvalidArgumentError>())?;
    m.add("ClusteringMissingError", py.get_type::<python_interface::ClusteringMissingError>())?;
    m.add("DidNotConvergeError", py.get_type::<python_interface::DidNotConvergeError>())?;
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn four_points() -> Dataset {
        Dataset::by_array([[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [10.0, 10.0, 10.0], [10.0, 10.0, 11.0]]).unwrap()
    }

    fn sorted(mut points: Vec<Vec<Value>>) -> Vec<Vec<Value>> {
        points.sort_by(|a, b| a.partial_cmp(b).unwrap());
        points
    }

    #[test]
    fn forced_initialization() {
        let space = four_points();
        let initial = Centroids::new(vec![vec![0.0, 0.0, 0.0], vec![10.0, 10.0, 10.0]]);
        let (clustering, _) = compute_k_means_from(&space, &ClusteringProblem{k: 2}, initial, None).unwrap();
        assert_eq!(clustering.get_clusters(&space), vec![
            vec![vec![0.0, 0.0, 0.0], vec![0.0, 0.0, 1.0]],
            vec![vec![10.0, 10.0, 10.0], vec![10.0, 10.0, 11.0]],
        ]);
        assert_eq!(clustering.get_centroids().get_all(), vec![vec![0.0, 0.0, 0.5], vec![10.0, 10.0, 10.5]]);
        assert_eq!(clustering.iterations(), 2);
    }

    #[test]
    fn single_point_converges_in_one_round() {
        let space = Dataset::by_array([[75.0, 0.0, 125.0]]).unwrap();
        let (clustering, _) = compute_k_means(&space, &ClusteringProblem{k: 1}, &mut StdRng::seed_from_u64(5), None).unwrap();
        assert_eq!(clustering.iterations(), 1);
        assert_eq!(clustering.get_centroids().get(0), &[75.0, 0.0, 125.0]);
        assert_eq!(clustering.get_clusters(&space), vec![vec![vec![75.0, 0.0, 125.0]]]);
    }

    #[test]
    fn one_cluster_contains_everything() {
        let space = palette::emotion_palette();
        let (clustering, _) = compute_k_means(&space, &ClusteringProblem{k: 1}, &mut StdRng::seed_from_u64(11), None).unwrap();
        assert_eq!(clustering.get_assignment(), &vec![0; 7]);
        let mean = utilities::mean(space.point_iter().map(|p| p.as_slice()), 3);
        assert_eq!(clustering.get_centroids().get(0), mean.as_slice());
    }

    #[test]
    fn partition_properties_on_random_data() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let space = Dataset::new_random(60, 3, &mut rng);
            let k = 1 + (seed as usize % 6);
            let (clustering, _) = compute_k_means(&space, &ClusteringProblem{k}, &mut rng, None).unwrap();

            // exactly k clusters, whose union is the dataset
            let clusters = clustering.get_clusters(&space);
            assert_eq!(clusters.len(), k);
            assert_eq!(sorted(clusters.into_iter().flatten().collect()), sorted(space.get_positions()));

            // fixed point: another assignment round does not move any point
            assert_eq!(&assign_to_nearest(&space, clustering.get_centroids(), None), clustering.get_assignment());

            // the centroid of a non-empty cluster is the mean of its points
            let sizes = clustering.get_cluster_sizes();
            for i in 0..k {
                if sizes[i] > 0 {
                    let members: Vec<&[Value]> = clustering.get_cluster_of(i).iter().map(|&x| space.get(x)).collect();
                    assert_eq!(clustering.get_centroids().get(i), utilities::mean(members, 3).as_slice());
                }
            }
        }
    }

    #[test]
    fn same_seed_same_result() {
        let data: Vec<Vec<Value>> = palette::emotion_palette().get_positions();
        let a = cluster_with_rng(&data, 3, &mut StdRng::seed_from_u64(77)).unwrap();
        let b = cluster_with_rng(&data, 3, &mut StdRng::seed_from_u64(77)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn thread_count_does_not_change_result() {
        let mut rng = StdRng::seed_from_u64(123);
        let space = Dataset::new_random(3000, 3, &mut rng);
        let prob = ClusteringProblem{k: 5};
        let single = OptionalParameters{thread_count: Some(1), ..Default::default()};
        let multi = OptionalParameters{thread_count: Some(4), ..Default::default()};
        let (a, _) = compute_k_means(&space, &prob, &mut StdRng::seed_from_u64(1), Some(single)).unwrap();
        let (b, _) = compute_k_means(&space, &prob, &mut StdRng::seed_from_u64(1), Some(multi)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn small_datasets_run_on_one_thread_by_default() {
        assert!(build_thread_pool(PARALLEL_THRESHOLD - 1, None).unwrap().is_none());
        assert!(build_thread_pool(PARALLEL_THRESHOLD - 1, Some(1)).unwrap().is_none());
        let expected = if num_cpus::get() > 1 { Some(num_cpus::get()) } else { None };
        let large = build_thread_pool(PARALLEL_THRESHOLD, None).unwrap();
        assert_eq!(large.map(|pool| pool.current_num_threads()), expected);
        let explicit = build_thread_pool(10, Some(0)).unwrap();
        assert_eq!(explicit.map(|pool| pool.current_num_threads()), expected);
    }

    #[test]
    fn duplicate_initial_centroids_leave_a_cluster_at_the_origin() {
        let space = Dataset::by_array([[1.0, 1.0], [2.0, 2.0]]).unwrap();
        let initial = Centroids::new(vec![vec![1.0, 1.0], vec![1.0, 1.0]]);
        let (clustering, _) = compute_k_means_from(&space, &ClusteringProblem{k: 2}, initial, None).unwrap();
        assert_eq!(clustering.get_assignment(), &vec![0, 0]);
        assert_eq!(clustering.get_centroids().get(0), &[1.5, 1.5]);
        assert_eq!(clustering.get_centroids().get(1), &[0.0, 0.0]);
        assert_eq!(clustering.get_clusters(&space)[1], Vec::<Vec<Value>>::new());
    }

    #[test]
    fn more_clusters_than_points() {
        let data = vec![vec![1.0], vec![5.0]];
        let clusters = cluster_with_rng(&data, 4, &mut StdRng::seed_from_u64(8)).unwrap();
        assert_eq!(clusters.len(), 4);
        assert_eq!(clusters.iter().map(|c| c.len()).sum::<usize>(), 2);
    }

    #[test]
    fn distinct_points_with_k_equal_n_become_singletons() {
        let space = Dataset::by_array([[0.0, 0.0], [100.0, 0.0], [0.0, 100.0]]).unwrap();
        let initial = Centroids::new(space.get_positions());
        let (clustering, _) = compute_k_means_from(&space, &ClusteringProblem{k: 3}, initial, None).unwrap();
        assert_eq!(clustering.get_cluster_sizes(), vec![1, 1, 1]);
        assert_eq!(clustering.iterations(), 1);
    }

    #[test]
    fn invalid_arguments() {
        assert!(matches!(cluster(&[], 2), Err(ClusteringError::InvalidArgument(_))));
        assert!(matches!(cluster(&[vec![1.0, 2.0]], 0), Err(ClusteringError::InvalidArgument(_))));
        assert!(matches!(cluster(&[vec![1.0, 2.0], vec![1.0]], 1), Err(ClusteringError::DimensionMismatch{..})));

        let space = four_points();
        let wrong_k = Centroids::new(vec![vec![0.0, 0.0, 0.0]]);
        assert!(matches!(compute_k_means_from(&space, &ClusteringProblem{k: 2}, wrong_k, None), Err(ClusteringError::InvalidArgument(_))));
        let wrong_dim = Centroids::new(vec![vec![0.0, 0.0], vec![1.0, 1.0]]);
        assert!(matches!(compute_k_means_from(&space, &ClusteringProblem{k: 2}, wrong_dim, None), Err(ClusteringError::DimensionMismatch{..})));
    }

    #[test]
    fn iteration_cap_returns_best_effort_clustering() {
        let space = four_points();
        let initial = Centroids::new(vec![vec![0.0, 0.0, 0.0], vec![10.0, 10.0, 10.0]]);
        let optional = OptionalParameters{max_iterations: Some(1), ..Default::default()};
        match compute_k_means_from(&space, &ClusteringProblem{k: 2}, initial, Some(optional)) {
            Err(ClusteringError::DidNotConverge{iterations, clustering}) => {
                assert_eq!(iterations, 1);
                assert_eq!(clustering.get_assignment(), &vec![0, 0, 1, 1]);
            }
            other => panic!("expected DidNotConverge, got {:?}", other),
        }
    }

    #[test]
    fn negative_or_nan_tolerance_is_rejected() {
        let space = Dataset::by_array([[1.0, 1.0]]).unwrap();
        for eps in [-1.0, Value::NAN] {
            let optional = OptionalParameters{
                max_iterations: Some(0),
                convergence: Some(ConvergenceCriterion::Tolerance(eps)),
                ..Default::default()
            };
            let initial = Centroids::new(vec![vec![1.0, 1.0]]);
            assert!(matches!(compute_k_means_from(&space, &ClusteringProblem{k: 1}, initial, Some(optional.clone())),
                             Err(ClusteringError::InvalidArgument(_))));
            assert!(matches!(compute_k_means(&space, &ClusteringProblem{k: 1}, &mut StdRng::seed_from_u64(4), Some(optional)),
                             Err(ClusteringError::InvalidArgument(_))));
        }
    }

    #[test]
    fn zero_tolerance_converges() {
        let space = Dataset::by_array([[1.0, 1.0]]).unwrap();
        let optional = OptionalParameters{convergence: Some(ConvergenceCriterion::Tolerance(0.0)), ..Default::default()};
        let (clustering, _) = compute_k_means_from(&space, &ClusteringProblem{k: 1}, Centroids::new(vec![vec![1.0, 1.0]]), Some(optional)).unwrap();
        assert_eq!(clustering.iterations(), 1);
    }

    #[test]
    fn tracing_subscriber_is_installed_only_once() {
        init_tracing(0);
        assert!(!init_tracing(2));
    }

    #[test]
    fn tolerance_stops_earlier() {
        let space = four_points();
        let initial = Centroids::new(vec![vec![0.0, 0.0, 0.0], vec![10.0, 10.0, 10.0]]);
        let optional = OptionalParameters{convergence: Some(ConvergenceCriterion::Tolerance(0.5)), ..Default::default()};
        let (clustering, _) = compute_k_means_from(&space, &ClusteringProblem{k: 2}, initial, Some(optional)).unwrap();
        assert_eq!(clustering.iterations(), 1);
        assert_eq!(clustering.get_assignment(), &vec![0, 0, 1, 1]);
    }
}
