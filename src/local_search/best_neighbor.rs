//! Steepest-descent local search.
//!
//! # Algorithm
//!
//! Bind the move to the current solution, scan the whole neighbourhood,
//! jump to the cheapest feasible neighbour that strictly improves the
//! current distance, and repeat until no such neighbour exists.

use super::{require_feasible, LocalSearch};
use crate::error::Result;
use crate::models::Solution;
use crate::moves::{neighbor_at, Move, MoveKind};

/// Best-improvement descent over a single move kind.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_cvrp::local_search::{BestNeighborLocalSearch, LocalSearch};
/// use u_cvrp::models::{Client, Solution, Specification, SEPARATOR};
/// use u_cvrp::moves::MoveKind;
///
/// let spec = Arc::new(Specification::new(
///     vec![
///         Client::new(0, 0, 0),
///         Client::new(10, 10, 1),
///         Client::new(20, 0, 1),
///         Client::new(10, -10, 1),
///     ],
///     0, 10, 1,
/// ).unwrap());
/// let crossed = Solution::new(spec, vec![1, 3, 2, SEPARATOR]).unwrap();
///
/// let mut ls = BestNeighborLocalSearch::new(MoveKind::TwoOpt);
/// let optimum = ls.find_local_optimum(&crossed).unwrap();
/// assert!(optimum.total_distance() < crossed.total_distance());
/// ```
pub struct BestNeighborLocalSearch {
    mv: Box<dyn Move>,
}

impl BestNeighborLocalSearch {
    /// Creates a descent over `kind`.
    pub fn new(kind: MoveKind) -> Self {
        Self::with_move(kind.instantiate())
    }

    /// Creates a descent over an existing cursor.
    pub fn with_move(mv: Box<dyn Move>) -> Self {
        Self { mv }
    }

    /// Kind of the move explored.
    pub fn kind(&self) -> MoveKind {
        self.mv.kind()
    }
}

impl LocalSearch for BestNeighborLocalSearch {
    fn name(&self) -> &'static str {
        "best_neighbor"
    }

    fn find_local_optimum(&mut self, base: &Solution) -> Result<Solution> {
        steepest_descent(self.mv.as_mut(), base)
    }
}

/// Runs steepest descent with `mv` from `base`.
pub(crate) fn steepest_descent(mv: &mut dyn Move, base: &Solution) -> Result<Solution> {
    require_feasible(base, "best-neighbor local search")?;

    let mut current = base.clone();
    loop {
        mv.bind(&current);
        let mut best_cost = current.total_distance();
        let mut best_step = None;
        let mut step = 0;
        while mv.has_next()? {
            mv.advance()?;
            let cost = mv.current_cost()?;
            if cost < best_cost && mv.current_feasible()? {
                best_cost = cost;
                best_step = Some(step);
            }
            step += 1;
        }

        match best_step {
            Some(step) => current = neighbor_at(mv, &current, step)?,
            None => return Ok(current),
        }
    }
}
