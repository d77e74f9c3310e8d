//! Random construction used by Multiboot.
//!
//! Shuffles the clients and packs them into routes in that order, opening a
//! new route whenever the next client does not fit the current one.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use super::assemble;
use crate::models::{Solution, Specification};

/// Constructs a solution from a uniformly random client permutation.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_cvrp::constructive::random_construction;
/// use u_cvrp::models::{Client, Specification};
/// use u_cvrp::random::create_rng;
///
/// let spec = Arc::new(Specification::new(
///     vec![Client::new(0, 0, 0), Client::new(1, 0, 3), Client::new(0, 1, 3), Client::new(2, 2, 3)],
///     0, 5, 1,
/// ).unwrap());
/// let solution = random_construction(&spec, &mut create_rng(Some(1)));
/// assert_eq!(solution.num_routes(), 3);
/// assert!(solution.is_feasible());
/// ```
pub fn random_construction<R: Rng>(spec: &Arc<Specification>, rng: &mut R) -> Solution {
    let capacity = i64::from(spec.capacity());
    let mut order: Vec<usize> = spec.client_ids().collect();
    order.shuffle(rng);

    let mut routes: Vec<Vec<usize>> = Vec::new();
    let mut route = Vec::new();
    let mut load = 0i64;
    for client in order {
        let demand = i64::from(spec.demand(client));
        if load + demand > capacity {
            routes.push(std::mem::take(&mut route));
            load = 0;
        }
        route.push(client);
        load += demand;
    }
    if !route.is_empty() {
        routes.push(route);
    }

    assemble(spec, routes)
}
