//! Intra-route 2-opt segment reversal.
//!
//! # Delta
//!
//! Reversing positions `i..=j` of a route replaces the two edges at the cut
//! points; interior edges are traversed backwards at the same cost since
//! the metric is symmetric:
//!
//! ```text
//! d(p_i, r[j]) + d(r[i], n_j) - d(p_i, r[i]) - d(r[j], n_j)
//! ```
//!
//! # Reference
//!
//! Croes, G.A. (1958). "A method for solving traveling salesman problems",
//! *Operations Research* 6(6), 791-812.

use super::{route_with_at_least, MoveCursor, MoveKind, MoveSignature, Neighborhood};
use crate::distance::Cost;
use crate::models::Solution;

/// Route and the inclusive segment `i..=j` reversed (`i < j`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwoOptPosition {
    /// Route index.
    pub route: usize,
    /// First reversed position.
    pub i: usize,
    /// Last reversed position.
    pub j: usize,
}

/// Neighbourhood rules of [`TwoOpt`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoOptNeighborhood;

/// Cursor over every segment reversal inside a route.
///
/// Order: for each route, for each `i < j`.
pub type TwoOpt = MoveCursor<TwoOptNeighborhood>;

impl Neighborhood for TwoOptNeighborhood {
    type Position = TwoOptPosition;
    const KIND: MoveKind = MoveKind::TwoOpt;

    fn first(base: &Solution) -> Option<Self::Position> {
        route_with_at_least(base, 0, 2).map(|route| TwoOptPosition { route, i: 0, j: 1 })
    }

    fn after(base: &Solution, p: Self::Position) -> Option<Self::Position> {
        let len = base.route_len(p.route);
        if p.j + 1 < len {
            Some(TwoOptPosition { j: p.j + 1, ..p })
        } else if p.i + 2 < len {
            Some(TwoOptPosition {
                i: p.i + 1,
                j: p.i + 2,
                ..p
            })
        } else {
            route_with_at_least(base, p.route + 1, 2)
                .map(|route| TwoOptPosition { route, i: 0, j: 1 })
        }
    }

    fn delta(base: &Solution, p: Self::Position) -> Cost {
        let spec = base.spec();
        let first = base.client_at(p.route, p.i);
        let last = base.client_at(p.route, p.j);
        let prev = base.predecessor(p.route, p.i);
        let next = base.successor(p.route, p.j);

        let removed = spec.distance(prev, first) + spec.distance(last, next);
        let added = spec.distance(prev, last) + spec.distance(first, next);
        added - removed
    }

    fn feasible(base: &Solution, _p: Self::Position) -> bool {
        base.is_feasible()
    }

    fn apply(base: &Solution, p: Self::Position) -> Vec<usize> {
        let start = base.route_start(p.route);
        let mut codification = base.codification().to_vec();
        codification[start + p.i..=start + p.j].reverse();
        codification
    }

    fn signature(base: &Solution, p: Self::Position) -> MoveSignature {
        MoveSignature::new(base.client_at(p.route, p.i), base.client_at(p.route, p.j))
    }
}
