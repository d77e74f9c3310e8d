//! Variable Neighborhood Descent (VND).
//!
//! # Algorithm
//!
//! 1. Set k = 0
//! 2. Run steepest descent with move k
//! 3. If the solution improved, set k = 0; otherwise k = k + 1
//! 4. Stop when k runs past the last move
//!
//! The result is simultaneously a local optimum for every move in the list.
//!
//! # Reference
//!
//! Hansen, P. & Mladenović, N. (2001). "Variable neighborhood search:
//! Principles and applications", *European Journal of Operational Research*
//! 130(3), 449-467.

use tracing::trace;

use super::best_neighbor::steepest_descent;
use super::{require_feasible, LocalSearch};
use crate::error::{Result, SearchError};
use crate::models::Solution;
use crate::moves::{instantiate_all, Move, MoveKind};

/// Steepest descent cycling through an ordered list of move kinds.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_cvrp::local_search::{LocalSearch, VariableNeighborhoodDescent};
/// use u_cvrp::models::{Client, Solution, Specification};
/// use u_cvrp::moves::MoveKind;
///
/// let spec = Arc::new(Specification::new(
///     vec![Client::new(0, 0, 0), Client::new(5, 0, 1), Client::new(-5, 0, 1), Client::new(6, 1, 1)],
///     0, 2, 2,
/// ).unwrap());
/// let base = Solution::from_routes(spec, &[vec![1, 2], vec![3]]).unwrap();
///
/// let mut vnd = VariableNeighborhoodDescent::new(&MoveKind::ALL).unwrap();
/// let optimum = vnd.find_local_optimum(&base).unwrap();
/// assert!(optimum.total_distance() < base.total_distance());
/// ```
pub struct VariableNeighborhoodDescent {
    moves: Vec<Box<dyn Move>>,
}

impl VariableNeighborhoodDescent {
    /// Creates a VND over `kinds`, tried in the given order.
    ///
    /// Fails with [`SearchError::EmptyMoveList`] when `kinds` is empty.
    pub fn new(kinds: &[MoveKind]) -> Result<Self> {
        Self::with_moves(instantiate_all(kinds))
    }

    /// Creates a VND over existing cursors.
    pub fn with_moves(moves: Vec<Box<dyn Move>>) -> Result<Self> {
        if moves.is_empty() {
            return Err(SearchError::EmptyMoveList);
        }
        Ok(Self { moves })
    }

    /// Kinds explored, in order.
    pub fn kinds(&self) -> Vec<MoveKind> {
        self.moves.iter().map(|mv| mv.kind()).collect()
    }
}

impl LocalSearch for VariableNeighborhoodDescent {
    fn name(&self) -> &'static str {
        "vnd"
    }

    fn find_local_optimum(&mut self, base: &Solution) -> Result<Solution> {
        require_feasible(base, "variable neighborhood descent")?;

        let mut current = base.clone();
        let mut k = 0;
        while k < self.moves.len() {
            let candidate = steepest_descent(self.moves[k].as_mut(), &current)?;
            if candidate.total_distance() < current.total_distance() {
                trace!(
                    kind = %self.moves[k].kind(),
                    distance = candidate.total_distance(),
                    "vnd improved"
                );
                current = candidate;
                k = 0;
            } else {
                k += 1;
            }
        }
        Ok(current)
    }
}
