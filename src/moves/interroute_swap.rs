//! Exchange of two clients between two routes.
//!
//! # Delta
//!
//! With `a` at position `i` of route `A` and `b` at position `j` of route
//! `B`, the two edge pairs around each client are replaced:
//!
//! ```text
//! d(p_a,b) + d(b,n_a) + d(p_b,a) + d(a,n_b) - d(p_a,a) - d(a,n_a) - d(p_b,b) - d(b,n_b)
//! ```

use super::{
    route_with_at_least, untouched_routes_feasible, MoveCursor, MoveKind, MoveSignature,
    Neighborhood,
};
use crate::distance::Cost;
use crate::models::Solution;

/// Client `i` of `route_a` exchanged with client `j` of `route_b` (`route_a < route_b`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterrouteSwapPosition {
    /// First route.
    pub route_a: usize,
    /// Position in the first route.
    pub i: usize,
    /// Second route.
    pub route_b: usize,
    /// Position in the second route.
    pub j: usize,
}

/// Neighbourhood rules of [`InterrouteSwap`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InterrouteSwapNeighborhood;

/// Cursor over every exchange of clients between two non-empty routes.
///
/// Order: for each route `A`, for each later non-empty route `B`, for each
/// position of `A`, for each position of `B`.
pub type InterrouteSwap = MoveCursor<InterrouteSwapNeighborhood>;

/// First pair of non-empty routes with the first route at or after `from`.
fn route_pair_from(base: &Solution, from: usize) -> Option<InterrouteSwapPosition> {
    let route_a = route_with_at_least(base, from, 1)?;
    let route_b = route_with_at_least(base, route_a + 1, 1)?;
    Some(InterrouteSwapPosition {
        route_a,
        i: 0,
        route_b,
        j: 0,
    })
}

impl Neighborhood for InterrouteSwapNeighborhood {
    type Position = InterrouteSwapPosition;
    const KIND: MoveKind = MoveKind::InterrouteSwap;

    fn first(base: &Solution) -> Option<Self::Position> {
        route_pair_from(base, 0)
    }

    fn after(base: &Solution, p: Self::Position) -> Option<Self::Position> {
        if p.j + 1 < base.route_len(p.route_b) {
            return Some(InterrouteSwapPosition { j: p.j + 1, ..p });
        }
        if p.i + 1 < base.route_len(p.route_a) {
            return Some(InterrouteSwapPosition {
                i: p.i + 1,
                j: 0,
                ..p
            });
        }
        match route_with_at_least(base, p.route_b + 1, 1) {
            Some(route_b) => Some(InterrouteSwapPosition {
                route_a: p.route_a,
                i: 0,
                route_b,
                j: 0,
            }),
            None => route_pair_from(base, p.route_a + 1),
        }
    }

    fn delta(base: &Solution, p: Self::Position) -> Cost {
        let spec = base.spec();
        let d = |x, y| spec.distance(x, y);
        let a = base.client_at(p.route_a, p.i);
        let b = base.client_at(p.route_b, p.j);
        let prev_a = base.predecessor(p.route_a, p.i);
        let next_a = base.successor(p.route_a, p.i);
        let prev_b = base.predecessor(p.route_b, p.j);
        let next_b = base.successor(p.route_b, p.j);

        let removed = d(prev_a, a) + d(a, next_a) + d(prev_b, b) + d(b, next_b);
        let added = d(prev_a, b) + d(b, next_a) + d(prev_b, a) + d(a, next_b);
        added - removed
    }

    fn feasible(base: &Solution, p: Self::Position) -> bool {
        let spec = base.spec();
        let demand_a = i64::from(spec.demand(base.client_at(p.route_a, p.i)));
        let demand_b = i64::from(spec.demand(base.client_at(p.route_b, p.j)));

        base.remaining_capacity(p.route_a) + demand_a - demand_b >= 0
            && base.remaining_capacity(p.route_b) + demand_b - demand_a >= 0
            && untouched_routes_feasible(base, p.route_a, p.route_b)
    }

    fn apply(base: &Solution, p: Self::Position) -> Vec<usize> {
        let mut codification = base.codification().to_vec();
        codification.swap(
            base.route_start(p.route_a) + p.i,
            base.route_start(p.route_b) + p.j,
        );
        codification
    }

    fn signature(base: &Solution, p: Self::Position) -> MoveSignature {
        MoveSignature::new(
            base.client_at(p.route_a, p.i),
            base.client_at(p.route_b, p.j),
        )
    }
}
