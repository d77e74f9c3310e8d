//! Nearest-neighbor constructive heuristic.
//!
//! Builds routes greedily: starting from the depot, always visit the nearest
//! unvisited client whose demand fits the vehicle. When nothing fits, close
//! the route and start a new one.
//!
//! # Complexity
//!
//! O(n²) where n = number of clients.

use std::sync::Arc;

use super::build_greedy;
use crate::models::{Solution, Specification};

/// Constructs a solution using the nearest-neighbor heuristic.
///
/// Deterministic: ties on distance go to the smaller client id.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_cvrp::constructive::nearest_neighbor;
/// use u_cvrp::models::{Client, Specification};
///
/// let spec = Arc::new(Specification::new(
///     vec![
///         Client::new(0, 0, 0),
///         Client::new(1, 0, 10),
///         Client::new(2, 0, 10),
///         Client::new(3, 0, 10),
///     ],
///     0, 20, 1,
/// ).unwrap());
///
/// let solution = nearest_neighbor(&spec);
/// assert_eq!(solution.route(0), &[1, 2]);
/// assert_eq!(solution.route(1), &[3]);
/// assert!(solution.is_feasible());
/// ```
pub fn nearest_neighbor(spec: &Arc<Specification>) -> Solution {
    let distances = spec.distances();
    build_greedy(spec, |current, fitting| {
        distances
            .nearest_neighbor(current, fitting)
            .unwrap_or(fitting[0])
    })
}
