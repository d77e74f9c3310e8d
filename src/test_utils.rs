//! Shared fixtures for unit tests.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Client, Solution, Specification, SEPARATOR};

/// Eight clients around a depot at the origin, capacity 10, two vehicles.
pub fn small_spec() -> Arc<Specification> {
    Arc::new(
        Specification::new(
            vec![
                Client::new(0, 0, 0),
                Client::new(3, 4, 1),
                Client::new(4, 3, 1),
                Client::new(10, 0, 3),
                Client::new(0, 10, 3),
                Client::new(-5, -5, 2),
                Client::new(8, 8, 4),
                Client::new(-7, 3, 2),
                Client::new(2, -9, 3),
            ],
            0,
            10,
            2,
        )
        .expect("valid specification"),
    )
}

/// Builds a solution from explicit routes.
pub fn solution(spec: &Arc<Specification>, routes: &[&[usize]]) -> Solution {
    let routes: Vec<Vec<usize>> = routes.iter().map(|r| r.to_vec()).collect();
    Solution::from_routes(Arc::clone(spec), &routes).expect("valid routes")
}

/// A random instance with `n` clients plus a depot at id 0.
pub fn random_spec<R: Rng>(rng: &mut R, n: usize, capacity: i32) -> Arc<Specification> {
    let mut clients = vec![Client::new(0, 0, 0)];
    for _ in 0..n {
        clients.push(Client::new(
            rng.random_range(-50..=50),
            rng.random_range(-50..=50),
            rng.random_range(1..=capacity.min(10)),
        ));
    }
    Arc::new(Specification::new(clients, 0, capacity, 1).expect("valid specification"))
}

/// Deals every client into `num_routes` routes at random; empty routes and
/// overloaded routes are both possible.
pub fn random_solution<R: Rng>(
    spec: &Arc<Specification>,
    rng: &mut R,
    num_routes: usize,
) -> Solution {
    let mut ids: Vec<usize> = spec.client_ids().collect();
    ids.shuffle(rng);
    let mut routes = vec![Vec::new(); num_routes.max(1)];
    for id in ids {
        let r = rng.random_range(0..routes.len());
        routes[r].push(id);
    }
    let mut codification = Vec::new();
    for route in routes {
        codification.extend(route);
        codification.push(SEPARATOR);
    }
    Solution::new(Arc::clone(spec), codification).expect("valid codification")
}
