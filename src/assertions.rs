use crate::{ClusteringProblem,ConvergenceCriterion};
use crate::error::ClusteringError;
use crate::space::Dataset;

use tracing::warn;

/// Checks the parameters of a clustering problem on their own (without data).
///
/// # Errors
/// Returns [ClusteringError::InvalidArgument] if k = 0.
pub fn assert_problem_parameters(prob: &ClusteringProblem) -> Result<(), ClusteringError> {
    if prob.k < 1 {
        return Err(ClusteringError::InvalidArgument(format!("We have k = {}! There should be at least one cluster.", prob.k)));
    }
    Ok(())
}

/// Asserts a clustering problem.
/// Checks whether the clustering problem can be run on the dataset. If these assertions pass,
/// the algorithm returns exactly k clusters that partition the dataset.
///
/// # Inputs
/// * a [Dataset];
/// * a [ClusteringProblem];
///
/// # Errors
/// Returns [ClusteringError::InvalidArgument] if
/// * k is smaller than 1,
/// * the dataset contains no points.
///
/// k > n is allowed; some clusters necessarily stay empty in that case.
pub fn assert_clustering_problem(space: &Dataset, prob: &ClusteringProblem) -> Result<(), ClusteringError> {
    assert_problem_parameters(prob)?;
    if space.n() == 0 {
        return Err(ClusteringError::InvalidArgument("The dataset contains no points.".to_string()));
    }
    if prob.k > space.n() {
        warn!("We have n < k ({} < {})! At least {} clusters will be empty.", space.n(), prob.k, prob.k - space.n());
    }
    Ok(())
}

/// Checks that a convergence criterion can be satisfied by centroids that do not move.
///
/// # Errors
/// Returns [ClusteringError::InvalidArgument] if a tolerance is negative or not finite.
pub fn assert_convergence_criterion(criterion: ConvergenceCriterion) -> Result<(), ClusteringError> {
    if let ConvergenceCriterion::Tolerance(eps) = criterion {
        if !eps.is_finite() || eps < 0.0 {
            return Err(ClusteringError::InvalidArgument(format!("The tolerance must be a finite non-negative distance, but it is {}.", eps)));
        }
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn k_must_be_positive() {
        let space = Dataset::by_array([[1.0, 2.0, 3.0]]).unwrap();
        assert!(matches!(assert_clustering_problem(&space, &ClusteringProblem{k: 0}), Err(ClusteringError::InvalidArgument(_))));
        assert!(assert_clustering_problem(&space, &ClusteringProblem{k: 1}).is_ok());
        assert!(assert_clustering_problem(&space, &ClusteringProblem{k: 4}).is_ok());
    }

    #[test]
    fn tolerance_must_be_finite_and_non_negative() {
        assert!(assert_convergence_criterion(ConvergenceCriterion::Exact).is_ok());
        assert!(assert_convergence_criterion(ConvergenceCriterion::Tolerance(0.0)).is_ok());
        assert!(assert_convergence_criterion(ConvergenceCriterion::Tolerance(1e-9)).is_ok());
        for eps in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(assert_convergence_criterion(ConvergenceCriterion::Tolerance(eps)), Err(ClusteringError::InvalidArgument(_))));
        }
    }
}
