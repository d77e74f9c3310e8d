//! First-improvement local search.

use super::{require_feasible, LocalSearch};
use crate::error::Result;
use crate::models::Solution;
use crate::moves::{Move, MoveKind};

/// Descent that jumps to the first strictly improving feasible neighbour.
///
/// After every jump the scan restarts from the top of the new solution's
/// neighbourhood; the search ends after a full scan without improvement.
pub struct FirstBetterNeighborLocalSearch {
    mv: Box<dyn Move>,
}

impl FirstBetterNeighborLocalSearch {
    /// Creates a descent over `kind`.
    pub fn new(kind: MoveKind) -> Self {
        Self::with_move(kind.instantiate())
    }

    /// Creates a descent over an existing cursor.
    pub fn with_move(mv: Box<dyn Move>) -> Self {
        Self { mv }
    }
}

impl LocalSearch for FirstBetterNeighborLocalSearch {
    fn name(&self) -> &'static str {
        "first_better_neighbor"
    }

    fn find_local_optimum(&mut self, base: &Solution) -> Result<Solution> {
        require_feasible(base, "first-better local search")?;

        let mv = self.mv.as_mut();
        let mut current = base.clone();
        'descent: loop {
            mv.bind(&current);
            while mv.has_next()? {
                mv.advance()?;
                if mv.current_cost()? < current.total_distance() && mv.current_feasible()? {
                    current = mv.materialize()?;
                    continue 'descent;
                }
            }
            return Ok(current);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_search::BestNeighborLocalSearch;
    use crate::test_utils::{small_spec, solution};

    #[test]
    fn test_reaches_local_optimum() {
        let spec = small_spec();
        let base = solution(&spec, &[&[1, 3, 2, 4], &[5, 7, 8], &[6], &[]]);
        for kind in MoveKind::ALL {
            let mut ls = FirstBetterNeighborLocalSearch::new(kind);
            let optimum = ls.find_local_optimum(&base).expect("feasible");
            assert!(optimum.is_feasible());
            assert!(optimum.total_distance() <= base.total_distance());

            // nothing left for steepest descent to improve
            let mut best = BestNeighborLocalSearch::new(kind);
            let again = best.find_local_optimum(&optimum).expect("feasible");
            assert_eq!(again, optimum);
        }
    }

    #[test]
    fn test_rejects_infeasible_base() {
        let spec = small_spec();
        let overloaded = solution(&spec, &[&[1, 2, 3, 4, 5, 6, 7, 8]]);
        let mut ls = FirstBetterNeighborLocalSearch::new(MoveKind::TwoOpt);
        assert!(ls
            .find_local_optimum(&overloaded)
            .is_err_and(|e| e.is_illegal_state()));
    }
}
