//! Constructive heuristics for building initial CVRP solutions.
//!
//! - [`nearest_neighbor`] — Greedy nearest-neighbor insertion, O(n²)
//! - [`grasp_construction`] — Nearest-neighbor with a restricted candidate list, O(n² log n)
//! - [`random_construction`] — Random permutation packed into routes, O(n)
//!
//! Every construction serves each client exactly once, never overloads a
//! route, and pads the result with empty routes up to the specification's
//! minimum vehicle count.

mod grasp;
mod nearest_neighbor;
mod random_order;

use std::sync::Arc;

use crate::models::{Solution, Specification, SEPARATOR};

pub use grasp::grasp_construction;
pub use nearest_neighbor::nearest_neighbor;
pub use random_order::random_construction;

/// Builds routes by repeatedly extending the current one from the depot.
///
/// `pick` receives the last visited node and the unvisited clients that
/// still fit the current vehicle (never empty) and returns one of them.
/// A route closes when no unvisited client fits.
fn build_greedy<F>(spec: &Arc<Specification>, mut pick: F) -> Solution
where
    F: FnMut(usize, &[usize]) -> usize,
{
    let capacity = i64::from(spec.capacity());
    let mut unvisited: Vec<usize> = spec.client_ids().collect();
    let mut routes: Vec<Vec<usize>> = Vec::new();

    while !unvisited.is_empty() {
        let mut route = Vec::new();
        let mut current = spec.depot_id();
        let mut load = 0i64;
        loop {
            let fitting: Vec<usize> = unvisited
                .iter()
                .copied()
                .filter(|&c| load + i64::from(spec.demand(c)) <= capacity)
                .collect();
            if fitting.is_empty() {
                break;
            }
            let next = pick(current, &fitting);
            unvisited.retain(|&c| c != next);
            load += i64::from(spec.demand(next));
            route.push(next);
            current = next;
        }
        routes.push(route);
    }

    assemble(spec, routes)
}

/// Turns routes into a solution, padding with empty routes up to the
/// minimum vehicle count (and to at least one route).
fn assemble(spec: &Arc<Specification>, mut routes: Vec<Vec<usize>>) -> Solution {
    let wanted = spec.min_vehicles().max(1);
    if routes.len() < wanted {
        routes.resize(wanted, Vec::new());
    }
    let mut codification = Vec::with_capacity(spec.num_clients() + routes.len());
    for route in routes {
        codification.extend(route);
        codification.push(SEPARATOR);
    }
    Solution::from_codification(Arc::clone(spec), codification)
}
