use pyo3::proc_macro::{pyclass,pymethods};
use pyo3::prelude::PyResult;
use pyo3::create_exception;
use pyo3::PyErr;

use crate::{ClusteringProblem,ConvergenceCriterion,OptionalParameters,compute_k_means,init_tracing};
use crate::clustering::Clustering;
use crate::error::ClusteringError;
use crate::space::Dataset;
use crate::types::{PointCount,ClusterIdx,Value,DurationInSec};
use crate::assertions::assert_problem_parameters;

use rand::SeedableRng;
use rand::rngs::StdRng;

create_exception!(sine_k_means, InvalidArgumentError, pyo3::exceptions::PyException);
create_exception!(sine_k_means, ClusteringMissingError, pyo3::exceptions::PyException);
create_exception!(sine_k_means, DidNotConvergeError, pyo3::exceptions::PyException);

const NOCLUSTERING: &str = "No clustering computed yet. Run fit(data) or compute_clustering()";
const NOSPACE: &str = "No data defined yet. Run insert(data), load_data_from_file(file_path) or fit(data).";

fn to_py_err(error: ClusteringError) -> PyErr {
    match error {
        ClusteringError::DidNotConverge{..} => DidNotConvergeError::new_err(error.to_string()),
        ClusteringError::Io(_) => pyo3::exceptions::PyIOError::new_err(error.to_string()),
        _ => InvalidArgumentError::new_err(error.to_string()),
    }
}

#[pyclass]
pub(crate) struct KMeans {
    // parameters
    prob: ClusteringProblem,

    // data
    space: Option<Dataset>,

    // attributes
    clustering: Option<Clustering>,

    // information
    running_time: Option<DurationInSec>
}

impl KMeans {
    fn get_space(&self) -> PyResult<&Dataset> {
        self.space.as_ref().ok_or_else(|| InvalidArgumentError::new_err(NOSPACE))
    }

    fn get_clustering(&self) -> PyResult<&Clustering> {
        self.clustering.as_ref().ok_or_else(|| ClusteringMissingError::new_err(NOCLUSTERING))
    }

    fn delete_result(&mut self) {
        self.clustering = None;
        self.running_time = None;
    }

    fn run(&mut self, seed: Option<u64>, verbose: u8, thread_count: usize, max_iterations: usize, tolerance: Option<Value>) -> PyResult<()> {
        init_tracing(verbose);
        let optional = OptionalParameters {
            thread_count: Some(thread_count), // 0 means all cores
            max_iterations: Some(max_iterations),
            convergence: Some(match tolerance {
                Some(eps) => ConvergenceCriterion::Tolerance(eps),
                None => ConvergenceCriterion::Exact,
            }),
        };
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        self.delete_result();
        let (clustering, total_time) = compute_k_means(self.get_space()?, &self.prob, &mut rng, Some(optional)).map_err(to_py_err)?;
        self.clustering = Some(clustering);
        self.running_time = Some(total_time);
        Ok(())
    }
}

#[pymethods]
impl KMeans {
    #[new]
    fn new(k: PointCount) -> PyResult<KMeans> {
        let prob = ClusteringProblem{k};
        assert_problem_parameters(&prob).map_err(to_py_err)?;
        Ok(KMeans{prob, space: None, clustering: None, running_time: None})
    }

    #[getter]
    fn get_k(&self) -> PointCount {
        self.prob.k
    }

    #[setter]
    fn set_k(&mut self, k: PointCount) -> PyResult<()> {
        let prob = ClusteringProblem{k};
        assert_problem_parameters(&prob).map_err(to_py_err)?;
        self.prob = prob;
        self.delete_result();
        Ok(())
    }

    #[getter]
    fn get_data(&self) -> PyResult<Vec<Vec<Value>>> {
        Ok(self.get_space()?.get_positions())
    }

    /// Input: 2d-Array. An array of datapoints, which are arrays of dimension-many floats.
    ///
    /// Stores the data. Use compute_clustering() to compute a clustering.
    fn insert(&mut self, data: Vec<Vec<Value>>) -> PyResult<()> {
        self.space = Some(Dataset::by_ndpoints(data).map_err(to_py_err)?);
        self.delete_result();
        Ok(())
    }

    /// Executes the algorithm.
    ///
    /// # Input:
    /// * 2d-Array. An array of datapoints, which are arrays of dimension-many floats.
    ///
    /// # Optional input as keyword-arguments:
    /// * seed = None (seed of the random initialization; None draws a fresh seed)
    /// * verbose = 1 (0: warnings only, 1: brief, 2: verbose). The log output is set up by the
    /// first call to fit or compute_clustering; later values of verbose have no effect.
    /// * thread_count = #cores (specifying the number of threads used for the assignment)
    /// * max_iterations = 1000 (0: no limit)
    /// * tolerance = None (None: stop when the centroids are exactly equal; otherwise stop when
    /// no centroid moves further than tolerance, which must be finite and non-negative)
    ///
    /// The output is saved into the model and can be accessed via model.centroids,
    /// model.cluster_labels or model.clusters.
    #[args(data, "*", seed = "None", verbose = "1", thread_count = "0", max_iterations = "1000", tolerance = "None")]
    fn fit(&mut self, data: Vec<Vec<Value>>, seed: Option<u64>, verbose: u8, thread_count: usize, max_iterations: usize, tolerance: Option<Value>) -> PyResult<()> {
        self.space = Some(Dataset::by_ndpoints(data).map_err(to_py_err)?);
        self.run(seed, verbose, thread_count, max_iterations, tolerance)
    }

    /// Executes the algorithm. The data must be set beforehand.
    /// Takes the same optional keyword-arguments as fit.
    #[args("*", seed = "None", verbose = "1", thread_count = "0", max_iterations = "1000", tolerance = "None")]
    fn compute_clustering(&mut self, seed: Option<u64>, verbose: u8, thread_count: usize, max_iterations: usize, tolerance: Option<Value>) -> PyResult<()> {
        self.run(seed, verbose, thread_count, max_iterations, tolerance)
    }

    /// Returns the k centroids. All points with label i belong to centroid i.
    #[getter]
    fn get_centroids(&self) -> PyResult<Vec<Vec<Value>>> {
        Ok(self.get_clustering()?.get_centroids().get_all())
    }

    /// Returns the cluster index (0,1,..,k-1) for each point.
    #[getter]
    fn get_cluster_labels(&self) -> PyResult<Vec<ClusterIdx>> {
        Ok(self.get_clustering()?.get_assignment().clone())
    }

    /// Returns the k clusters as lists of points.
    #[getter]
    fn get_clusters(&self) -> PyResult<Vec<Vec<Vec<Value>>>> {
        Ok(self.get_clustering()?.get_clusters(self.get_space()?))
    }

    /// Returns the number of assignment-update rounds of the last computation.
    #[getter]
    fn get_iterations(&self) -> PyResult<usize> {
        Ok(self.get_clustering()?.iterations())
    }

    /// Return as float specifying the running time of the computation in sec.
    #[getter]
    fn get_running_time(&self) -> PyResult<DurationInSec> {
        self.running_time.ok_or_else(|| ClusteringMissingError::new_err(NOCLUSTERING))
    }

    /// Saves clustering in txt-file. One line for each cluster.
    fn save_clustering_to_file(&self, file_path: &str) -> PyResult<()> {
        self.get_clustering()?.save_to_file(file_path).map_err(to_py_err)
    }

    /// Load points from txt-file.
    /// Input: file_path to txt-file in which each line represents one point; coordinates are
    /// separated by ',' (no comma at the end).
    /// Optional: expected can be set to the expected number of points to speed up the process.
    /// (Default: 1000).
    #[args(file_path, "*", expected = "1000")]
    fn load_data_from_file(&mut self, file_path: &str, expected: PointCount) -> PyResult<()> {
        self.space = Some(Dataset::by_file(file_path, expected).map_err(to_py_err)?);
        self.delete_result();
        Ok(())
    }
}
