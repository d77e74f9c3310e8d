//! Exchange of two clients inside one route.
//!
//! # Delta
//!
//! For positions `i < j` holding `a` and `b`, with `p(x)`/`n(x)` the nodes
//! around a position (the depot at the route ends):
//!
//! ```text
//! non-adjacent: d(p_i,b) + d(b,n_i) + d(p_j,a) + d(a,n_j) - d(p_i,a) - d(a,n_i) - d(p_j,b) - d(b,n_j)
//! adjacent:     d(p_i,b) + d(b,a) + d(a,n_j) - d(p_i,a) - d(a,b) - d(b,n_j)
//! ```

use super::{route_with_at_least, MoveCursor, MoveKind, MoveSignature, Neighborhood};
use crate::distance::Cost;
use crate::models::Solution;

/// Route and the two positions exchanged (`i < j`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntrarouteSwapPosition {
    /// Route index.
    pub route: usize,
    /// First position.
    pub i: usize,
    /// Second position.
    pub j: usize,
}

/// Neighbourhood rules of [`IntrarouteSwap`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IntrarouteSwapNeighborhood;

/// Cursor over every exchange of two clients of the same route.
///
/// Order: for each route, for each `i < j`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_cvrp::models::{Client, Solution, Specification, SEPARATOR};
/// use u_cvrp::moves::{IntrarouteSwap, Move};
///
/// let spec = Arc::new(Specification::new(
///     vec![Client::new(0, 0, 0), Client::new(1, 0, 1), Client::new(2, 0, 1), Client::new(3, 0, 1)],
///     0, 10, 1,
/// ).unwrap());
/// let sol = Solution::new(spec, vec![1, 3, 2, SEPARATOR]).unwrap();
///
/// let mut mv = IntrarouteSwap::new();
/// mv.bind(&sol);
/// let mut count = 0;
/// while mv.has_next().unwrap() {
///     mv.advance().unwrap();
///     assert_eq!(mv.current_cost().unwrap(), mv.materialize().unwrap().total_distance());
///     count += 1;
/// }
/// assert_eq!(count, 3);
/// ```
pub type IntrarouteSwap = MoveCursor<IntrarouteSwapNeighborhood>;

impl Neighborhood for IntrarouteSwapNeighborhood {
    type Position = IntrarouteSwapPosition;
    const KIND: MoveKind = MoveKind::IntrarouteSwap;

    fn first(base: &Solution) -> Option<Self::Position> {
        route_with_at_least(base, 0, 2).map(|route| IntrarouteSwapPosition { route, i: 0, j: 1 })
    }

    fn after(base: &Solution, p: Self::Position) -> Option<Self::Position> {
        let len = base.route_len(p.route);
        if p.j + 1 < len {
            Some(IntrarouteSwapPosition { j: p.j + 1, ..p })
        } else if p.i + 2 < len {
            Some(IntrarouteSwapPosition {
                i: p.i + 1,
                j: p.i + 2,
                ..p
            })
        } else {
            route_with_at_least(base, p.route + 1, 2)
                .map(|route| IntrarouteSwapPosition { route, i: 0, j: 1 })
        }
    }

    fn delta(base: &Solution, p: Self::Position) -> Cost {
        let spec = base.spec();
        let d = |x, y| spec.distance(x, y);
        let a = base.client_at(p.route, p.i);
        let b = base.client_at(p.route, p.j);
        let prev_i = base.predecessor(p.route, p.i);
        let next_j = base.successor(p.route, p.j);

        if p.j == p.i + 1 {
            let removed = d(prev_i, a) + d(a, b) + d(b, next_j);
            let added = d(prev_i, b) + d(b, a) + d(a, next_j);
            added - removed
        } else {
            let next_i = base.successor(p.route, p.i);
            let prev_j = base.predecessor(p.route, p.j);
            let removed = d(prev_i, a) + d(a, next_i) + d(prev_j, b) + d(b, next_j);
            let added = d(prev_i, b) + d(b, next_i) + d(prev_j, a) + d(a, next_j);
            added - removed
        }
    }

    fn feasible(base: &Solution, _p: Self::Position) -> bool {
        // loads do not change inside a route
        base.is_feasible()
    }

    fn apply(base: &Solution, p: Self::Position) -> Vec<usize> {
        let start = base.route_start(p.route);
        let mut codification = base.codification().to_vec();
        codification.swap(start + p.i, start + p.j);
        codification
    }

    fn signature(base: &Solution, p: Self::Position) -> MoveSignature {
        MoveSignature::new(base.client_at(p.route, p.i), base.client_at(p.route, p.j))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move;
    use crate::test_utils::{small_spec, solution};

    fn positions(sol: &Solution) -> Vec<(usize, usize, usize)> {
        let mut mv = IntrarouteSwap::new();
        mv.bind(sol);
        let mut out = Vec::new();
        while mv.has_next().expect("bound") {
            mv.advance().expect("bound");
            let p = mv.current_position().expect("current");
            out.push((p.route, p.i, p.j));
        }
        out
    }

    #[test]
    fn test_enumeration_order() {
        let spec = small_spec();
        let sol = solution(&spec, &[&[1, 2, 3], &[4], &[], &[5, 6]]);
        assert_eq!(
            positions(&sol),
            vec![(0, 0, 1), (0, 0, 2), (0, 1, 2), (3, 0, 1)]
        );
    }

    #[test]
    fn test_no_neighbors_for_short_routes() {
        let spec = small_spec();
        let sol = solution(&spec, &[&[1], &[2], &[]]);
        assert!(positions(&sol).is_empty());
    }

    #[test]
    fn test_adjacent_swap_cost() {
        let spec = small_spec();
        let sol = solution(&spec, &[&[1, 3, 2]]);
        let mut mv = IntrarouteSwap::new();
        mv.bind(&sol);
        mv.advance().expect("bound");
        let swapped = mv.materialize().expect("bound");
        assert_eq!(swapped.route(0), &[3, 1, 2]);
        assert_eq!(mv.current_cost().expect("bound"), swapped.total_distance());
        assert_eq!(mv.signature().expect("bound"), Some(MoveSignature::new(1, 3)));
    }
}
