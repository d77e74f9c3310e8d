//! Relocation of one client into a different route.
//!
//! # Delta
//!
//! Removing `c` from between `p` and `n` and inserting it between `u` and
//! `v` of another route:
//!
//! ```text
//! d(p,n) - d(p,c) - d(c,n) + d(u,c) + d(c,v) - d(u,v)
//! ```
//!
//! An empty target route has `u = v = depot`, so the split edge costs zero.

use super::{
    route_with_at_least, untouched_routes_feasible, MoveCursor, MoveKind, MoveSignature,
    Neighborhood,
};
use crate::distance::Cost;
use crate::models::Solution;

/// Client `i` of `source` inserted before position `k` of `target`.
///
/// `k == route_len(target)` appends at the tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RelocationPosition {
    /// Route losing the client.
    pub source: usize,
    /// Position of the client in `source`.
    pub i: usize,
    /// Route receiving the client.
    pub target: usize,
    /// Insertion position in `target`.
    pub k: usize,
}

/// Neighbourhood rules of [`Relocation`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RelocationNeighborhood;

/// Cursor over every relocation of a client into another route.
///
/// Order: for each source route and position, for each target route other
/// than the source (empty ones included), for each insertion position.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_cvrp::models::{Client, Solution, Specification, SEPARATOR};
/// use u_cvrp::moves::{Move, Relocation};
///
/// let spec = Arc::new(Specification::new(
///     vec![Client::new(0, 0, 0), Client::new(1, 0, 1), Client::new(0, 1, 1)],
///     0, 10, 1,
/// ).unwrap());
/// let sol = Solution::new(spec, vec![1, 2, SEPARATOR, SEPARATOR]).unwrap();
///
/// let mut mv = Relocation::new();
/// mv.bind(&sol);
/// mv.advance().unwrap();
/// let moved = mv.materialize().unwrap();
/// assert_eq!(moved.codification(), &[2, SEPARATOR, 1, SEPARATOR]);
/// assert_eq!(mv.current_cost().unwrap(), moved.total_distance());
/// ```
pub type Relocation = MoveCursor<RelocationNeighborhood>;

fn first_target(base: &Solution, source: usize, from: usize) -> Option<usize> {
    (from..base.num_routes()).find(|&r| r != source)
}

fn first_from_source(base: &Solution, from: usize) -> Option<RelocationPosition> {
    let source = route_with_at_least(base, from, 1)?;
    let target = first_target(base, source, 0)?;
    Some(RelocationPosition {
        source,
        i: 0,
        target,
        k: 0,
    })
}

impl Neighborhood for RelocationNeighborhood {
    type Position = RelocationPosition;
    const KIND: MoveKind = MoveKind::Relocation;

    fn first(base: &Solution) -> Option<Self::Position> {
        first_from_source(base, 0)
    }

    fn after(base: &Solution, p: Self::Position) -> Option<Self::Position> {
        if p.k < base.route_len(p.target) {
            return Some(RelocationPosition { k: p.k + 1, ..p });
        }
        if let Some(target) = first_target(base, p.source, p.target + 1) {
            return Some(RelocationPosition { target, k: 0, ..p });
        }
        if p.i + 1 < base.route_len(p.source) {
            let target = first_target(base, p.source, 0)?;
            return Some(RelocationPosition {
                i: p.i + 1,
                target,
                k: 0,
                ..p
            });
        }
        first_from_source(base, p.source + 1)
    }

    fn delta(base: &Solution, p: Self::Position) -> Cost {
        let spec = base.spec();
        let client = base.client_at(p.source, p.i);
        let prev = base.predecessor(p.source, p.i);
        let next = base.successor(p.source, p.i);

        let removal =
            spec.distance(prev, next) - spec.distance(prev, client) - spec.distance(client, next);
        removal + base.insertion_delta(p.target, p.k, client)
    }

    fn feasible(base: &Solution, p: Self::Position) -> bool {
        let demand = i64::from(base.spec().demand(base.client_at(p.source, p.i)));

        base.remaining_capacity(p.source) + demand >= 0
            && base.remaining_capacity(p.target) - demand >= 0
            && untouched_routes_feasible(base, p.source, p.target)
    }

    fn apply(base: &Solution, p: Self::Position) -> Vec<usize> {
        let from = base.route_start(p.source) + p.i;
        let to = base.route_start(p.target) + p.k;

        let mut codification = base.codification().to_vec();
        let client = codification.remove(from);
        let to = if to > from { to - 1 } else { to };
        codification.insert(to, client);
        codification
    }

    fn signature(base: &Solution, p: Self::Position) -> MoveSignature {
        MoveSignature::new(
            base.client_at(p.source, p.i),
            base.predecessor(p.target, p.k),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moves::Move;
    use crate::test_utils::{small_spec, solution};

    fn positions(sol: &Solution) -> Vec<(usize, usize, usize, usize)> {
        let mut mv = Relocation::new();
        mv.bind(sol);
        let mut out = Vec::new();
        while mv.has_next().expect("bound") {
            mv.advance().expect("bound");
            let p = mv.current_position().expect("current");
            out.push((p.source, p.i, p.target, p.k));
        }
        out
    }

    #[test]
    fn test_enumeration_order() {
        let spec = small_spec();
        let sol = solution(&spec, &[&[1, 2], &[], &[3]]);
        assert_eq!(
            positions(&sol),
            vec![
                (0, 0, 1, 0),
                (0, 0, 2, 0),
                (0, 0, 2, 1),
                (0, 1, 1, 0),
                (0, 1, 2, 0),
                (0, 1, 2, 1),
                (2, 0, 0, 0),
                (2, 0, 0, 1),
                (2, 0, 0, 2),
                (2, 0, 1, 0),
            ]
        );
    }

    #[test]
    fn test_single_route_has_no_neighbors() {
        let spec = small_spec();
        let sol = solution(&spec, &[&[1, 2, 3]]);
        assert!(positions(&sol).is_empty());
    }

    #[test]
    fn test_relocation_backwards() {
        let spec = small_spec();
        let sol = solution(&spec, &[&[1, 2], &[3, 4]]);
        let mut mv = Relocation::new();
        mv.bind(&sol);
        while mv.has_next().expect("bound") {
            mv.advance().expect("bound");
            let p = mv.current_position().expect("current");
            if p.source == 1 && p.i == 1 && p.target == 0 && p.k == 1 {
                let moved = mv.materialize().expect("bound");
                assert_eq!(moved.route(0), &[1, 4, 2]);
                assert_eq!(moved.route(1), &[3]);
                assert_eq!(mv.current_cost().expect("bound"), moved.total_distance());
                assert_eq!(mv.signature().expect("bound"), Some(MoveSignature::new(4, 1)));
                return;
            }
        }
        panic!("position not enumerated");
    }

    #[test]
    fn test_head_insertion_signature_uses_depot() {
        let spec = small_spec();
        let sol = solution(&spec, &[&[1], &[2]]);
        let mut mv = Relocation::new();
        mv.bind(&sol);
        mv.advance().expect("bound");
        assert_eq!(mv.signature().expect("bound"), Some(MoveSignature::new(1, 0)));
    }

    #[test]
    fn test_capacity_feasibility() {
        let spec = small_spec();
        // loads 9 and 10 out of 10: nothing fits into route 1
        let sol = solution(&spec, &[&[6, 3, 5], &[1, 4, 8, 2, 7]]);
        assert!(sol.is_feasible());
        let mut mv = Relocation::new();
        mv.bind(&sol);
        while mv.has_next().expect("bound") {
            mv.advance().expect("bound");
            let p = mv.current_position().expect("current");
            let neighbor = mv.materialize().expect("bound");
            assert_eq!(mv.current_feasible().expect("bound"), neighbor.is_feasible());
            if p.target == 1 {
                assert!(!neighbor.is_feasible());
            }
        }
    }

    #[test]
    fn test_source_may_become_empty() {
        let spec = small_spec();
        let sol = solution(&spec, &[&[1], &[2]]);
        let mut mv = Relocation::new();
        mv.bind(&sol);
        mv.advance().expect("bound");
        let moved = mv.materialize().expect("bound");
        assert!(moved.route(0).is_empty());
        assert_eq!(moved.route(1), &[1, 2]);
        assert_eq!(moved.num_routes(), 2);
    }
}
