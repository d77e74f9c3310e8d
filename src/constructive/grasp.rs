//! Randomized greedy construction with a restricted candidate list (RCL).
//!
//! Like nearest neighbor, but the next client is drawn uniformly from the
//! `k` nearest clients that still fit the vehicle. The list is rebuilt after
//! every pick since both the position and the remaining capacity change.
//!
//! # Reference
//!
//! Feo, T. A. & Resende, M. G. C. (1995). "Greedy Randomized Adaptive Search
//! Procedures", *Journal of Global Optimization* 6, 109-133.

use std::sync::Arc;

use rand::Rng;

use super::build_greedy;
use crate::error::{Result, SearchError};
use crate::models::{Solution, Specification};

/// Constructs a solution by RCL-randomized nearest neighbor.
///
/// With `rcl_size == 1` this is exactly [`nearest_neighbor`](super::nearest_neighbor).
///
/// # Errors
///
/// [`SearchError::InvalidArgument`] when `rcl_size` is zero.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_cvrp::constructive::grasp_construction;
/// use u_cvrp::models::{Client, Specification};
/// use u_cvrp::random::create_rng;
///
/// let spec = Arc::new(Specification::new(
///     vec![Client::new(0, 0, 0), Client::new(1, 0, 1), Client::new(0, 1, 1), Client::new(2, 2, 1)],
///     0, 2, 1,
/// ).unwrap());
/// let mut rng = create_rng(Some(42));
///
/// let solution = grasp_construction(&spec, 2, &mut rng).unwrap();
/// assert!(solution.is_complete());
/// assert!(solution.is_feasible());
/// ```
pub fn grasp_construction<R: Rng>(
    spec: &Arc<Specification>,
    rcl_size: usize,
    rng: &mut R,
) -> Result<Solution> {
    if rcl_size < 1 {
        return Err(SearchError::invalid_argument("rcl_size", "must be at least 1"));
    }
    let distances = spec.distances();
    Ok(build_greedy(spec, |current, fitting| {
        let rcl = distances.sorted_by_distance(current, fitting);
        let k = rcl_size.min(rcl.len());
        rcl[rng.random_range(0..k)]
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::nearest_neighbor;
    use crate::random::create_rng;
    use crate::test_utils::{random_spec, small_spec};

    #[test]
    fn test_rcl_of_one_is_nearest_neighbor() {
        let mut rng = create_rng(Some(3));
        for _ in 0..10 {
            let spec = random_spec(&mut rng, 12, 15);
            let sol = grasp_construction(&spec, 1, &mut rng).expect("k >= 1");
            assert_eq!(sol, nearest_neighbor(&spec));
        }
    }

    #[test]
    fn test_zero_rcl_is_rejected() {
        let spec = small_spec();
        let mut rng = create_rng(Some(0));
        let err = grasp_construction(&spec, 0, &mut rng).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_large_rcl_diversifies() {
        let spec = small_spec();
        let mut rng = create_rng(Some(8));
        let first = grasp_construction(&spec, 8, &mut rng).expect("k >= 1");
        let differs = (0..50)
            .map(|_| grasp_construction(&spec, 8, &mut rng).expect("k >= 1"))
            .any(|sol| sol != first);
        assert!(differs);
    }

    #[test]
    fn test_rcl_larger_than_candidates() {
        let spec = small_spec();
        let mut rng = create_rng(Some(4));
        let sol = grasp_construction(&spec, 1000, &mut rng).expect("k >= 1");
        assert!(sol.is_complete());
        assert!(sol.is_feasible());
    }
}
