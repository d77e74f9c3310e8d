//! Flat route codification with derived aggregates.

use std::fmt;
use std::sync::Arc;

use super::Specification;
use crate::distance::Cost;
use crate::error::{Result, SearchError};

/// Sentinel terminating every route in a codification.
pub const SEPARATOR: usize = usize::MAX;

/// A candidate answer to a [`Specification`].
///
/// The codification is a single sequence of client ids in which every
/// route is terminated by [`SEPARATOR`]: `[1, 2, SEP, 3, SEP]` holds the
/// routes `depot → 1 → 2 → depot` and `depot → 3 → depot`. Two adjacent
/// separators (or a leading one) denote an empty route.
///
/// Route starts, remaining capacities, total distance and feasibility are
/// derived once on construction. Infeasible solutions (some route over
/// capacity) are representable; feasibility is a flag.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_cvrp::models::{Client, Solution, Specification, SEPARATOR};
///
/// let spec = Arc::new(
///     Specification::new(
///         vec![Client::new(0, 0, 0), Client::new(3, 4, 1), Client::new(4, 3, 1)],
///         0,
///         100,
///         1,
///     )
///     .unwrap(),
/// );
/// let sol = Solution::new(spec, vec![1, 2, SEPARATOR]).unwrap();
/// assert_eq!(sol.total_distance(), 5 + 1 + 5);
/// assert!(sol.is_feasible());
/// ```
#[derive(Debug, Clone)]
pub struct Solution {
    spec: Arc<Specification>,
    codification: Vec<usize>,
    route_start: Vec<usize>,
    remaining_capacity: Vec<i64>,
    total_distance: Cost,
    infeasible_routes: usize,
}

impl Solution {
    /// Creates a solution after validating the codification.
    ///
    /// The codification must be non-empty, end with [`SEPARATOR`], and
    /// contain each non-depot client id at most once.
    pub fn new(spec: Arc<Specification>, codification: Vec<usize>) -> Result<Self> {
        if codification.last() != Some(&SEPARATOR) {
            return Err(SearchError::InvalidCodification(
                "a codification must end with a separator".into(),
            ));
        }
        let mut seen = vec![false; spec.num_nodes()];
        for &id in codification.iter().filter(|&&id| id != SEPARATOR) {
            if id >= spec.num_nodes() {
                return Err(SearchError::InvalidCodification(format!(
                    "unknown client id {id}"
                )));
            }
            if id == spec.depot_id() {
                return Err(SearchError::InvalidCodification(
                    "the depot cannot appear inside a route".into(),
                ));
            }
            if std::mem::replace(&mut seen[id], true) {
                return Err(SearchError::InvalidCodification(format!(
                    "client {id} appears twice"
                )));
            }
        }
        Ok(Self::from_codification(spec, codification))
    }

    /// Creates a solution from routes given as client sequences.
    pub fn from_routes(spec: Arc<Specification>, routes: &[Vec<usize>]) -> Result<Self> {
        let mut codification = Vec::with_capacity(spec.num_nodes() + routes.len());
        for route in routes {
            codification.extend_from_slice(route);
            codification.push(SEPARATOR);
        }
        Self::new(spec, codification)
    }

    /// Derives every aggregate of a codification already known to be valid.
    pub(crate) fn from_codification(spec: Arc<Specification>, codification: Vec<usize>) -> Self {
        let depot = spec.depot_id();
        let capacity = i64::from(spec.capacity());

        let mut route_start = Vec::new();
        let mut remaining_capacity = Vec::new();
        let mut total_distance = 0;
        let mut infeasible_routes = 0;

        let mut start = 0;
        let mut load = 0i64;
        let mut prev = depot;
        for (idx, &id) in codification.iter().enumerate() {
            if id == SEPARATOR {
                total_distance += spec.distance(prev, depot);
                route_start.push(start);
                remaining_capacity.push(capacity - load);
                if load > capacity {
                    infeasible_routes += 1;
                }
                start = idx + 1;
                load = 0;
                prev = depot;
            } else {
                total_distance += spec.distance(prev, id);
                load += i64::from(spec.demand(id));
                prev = id;
            }
        }

        Self {
            spec,
            codification,
            route_start,
            remaining_capacity,
            total_distance,
            infeasible_routes,
        }
    }

    /// The specification this solution answers.
    pub fn spec(&self) -> &Arc<Specification> {
        &self.spec
    }

    /// The flat sequence of client ids and separators.
    pub fn codification(&self) -> &[usize] {
        &self.codification
    }

    /// Consumes the solution and returns its codification.
    pub fn into_codification(self) -> Vec<usize> {
        self.codification
    }

    /// Number of routes (equal to the number of separators).
    pub fn num_routes(&self) -> usize {
        self.route_start.len()
    }

    /// Index in the codification where route `r` begins.
    pub fn route_start(&self, r: usize) -> usize {
        self.route_start[r]
    }

    /// Number of clients in route `r`.
    pub fn route_len(&self, r: usize) -> usize {
        let next_start = self
            .route_start
            .get(r + 1)
            .copied()
            .unwrap_or(self.codification.len());
        next_start - 1 - self.route_start[r]
    }

    /// Clients of route `r`, in visiting order.
    pub fn route(&self, r: usize) -> &[usize] {
        let start = self.route_start[r];
        &self.codification[start..start + self.route_len(r)]
    }

    /// Iterates over all routes.
    pub fn routes(&self) -> impl Iterator<Item = &[usize]> + '_ {
        (0..self.num_routes()).map(move |r| self.route(r))
    }

    /// Capacity minus the demand served by route `r`; negative when overloaded.
    pub fn remaining_capacity(&self, r: usize) -> i64 {
        self.remaining_capacity[r]
    }

    /// Remaining capacity of every route.
    pub fn remaining_capacities(&self) -> &[i64] {
        &self.remaining_capacity
    }

    /// Sum of all route lengths, depot legs included.
    pub fn total_distance(&self) -> Cost {
        self.total_distance
    }

    /// `true` iff no route exceeds the vehicle capacity.
    pub fn is_feasible(&self) -> bool {
        self.infeasible_routes == 0
    }

    /// Number of routes whose demand exceeds the capacity.
    pub fn infeasible_routes(&self) -> usize {
        self.infeasible_routes
    }

    /// Number of clients served (codification length minus separators).
    pub fn num_clients(&self) -> usize {
        self.codification.len() - self.num_routes()
    }

    /// `true` iff every client of the specification is served.
    pub fn is_complete(&self) -> bool {
        self.num_clients() == self.spec.num_clients()
    }

    /// Node visited before position `pos` of route `r` (the depot at the head).
    #[inline]
    pub fn predecessor(&self, r: usize, pos: usize) -> usize {
        if pos == 0 {
            self.spec.depot_id()
        } else {
            self.codification[self.route_start[r] + pos - 1]
        }
    }

    /// Node visited after position `pos` of route `r` (the depot at the tail).
    #[inline]
    pub fn successor(&self, r: usize, pos: usize) -> usize {
        // the separator closing the route stands for the depot
        match self.codification[self.route_start[r] + pos + 1] {
            SEPARATOR => self.spec.depot_id(),
            id => id,
        }
    }

    /// Client at position `pos` of route `r`.
    #[inline]
    pub fn client_at(&self, r: usize, pos: usize) -> usize {
        self.codification[self.route_start[r] + pos]
    }

    /// Length of route `r`, depot legs included.
    pub fn route_distance(&self, r: usize) -> Cost {
        let route = self.route(r);
        let depot = self.spec.depot_id();
        let Some((&first, _)) = route.split_first() else {
            return 0;
        };
        let inner: Cost = route
            .windows(2)
            .map(|w| self.spec.distance(w[0], w[1]))
            .sum();
        self.spec.distance(depot, first) + inner + self.spec.distance(route[route.len() - 1], depot)
    }

    /// Distance change caused by inserting `client` before position `pos` of route `r`.
    ///
    /// `pos == route_len(r)` appends at the tail.
    pub fn insertion_delta(&self, r: usize, pos: usize, client: usize) -> Cost {
        let depot = self.spec.depot_id();
        let prev = self.predecessor(r, pos);
        let next = if pos == self.route_len(r) {
            depot
        } else {
            self.client_at(r, pos)
        };
        self.spec.distance(prev, client) + self.spec.distance(client, next)
            - self.spec.distance(prev, next)
    }

    /// Returns a copy with `client` inserted before position `pos` of route `r`.
    ///
    /// Route starts, the capacity of `r` and the total distance are updated
    /// incrementally instead of being derived again.
    ///
    /// # Panics
    ///
    /// Panics if `r` is not a route or `pos > route_len(r)`.
    pub fn with_client_inserted(&self, r: usize, pos: usize, client: usize) -> Self {
        assert!(pos <= self.route_len(r), "insertion position out of range");
        let delta = self.insertion_delta(r, pos, client);

        let mut next = self.clone();
        next.codification.insert(self.route_start[r] + pos, client);
        for start in &mut next.route_start[r + 1..] {
            *start += 1;
        }

        let before = next.remaining_capacity[r];
        let after = before - i64::from(self.spec.demand(client));
        next.remaining_capacity[r] = after;
        if before >= 0 && after < 0 {
            next.infeasible_routes += 1;
        }
        next.total_distance += delta;
        next
    }

    /// Returns a copy with the given clients taken out of their routes.
    ///
    /// Routes are kept even when they become empty. Ids that are not nodes
    /// of the specification, [`SEPARATOR`] included, are ignored.
    pub fn without_clients(&self, clients: &[usize]) -> Self {
        let mut removed = vec![false; self.spec.num_nodes()];
        for &c in clients {
            if let Some(flag) = removed.get_mut(c) {
                *flag = true;
            }
        }
        let codification = self
            .codification
            .iter()
            .copied()
            .filter(|&id| id == SEPARATOR || !removed[id])
            .collect();
        Self::from_codification(Arc::clone(&self.spec), codification)
    }
}

impl PartialEq for Solution {
    fn eq(&self, other: &Self) -> bool {
        self.codification == other.codification
    }
}

impl Eq for Solution {}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let depot = self.spec.depot_id();
        for (r, route) in self.routes().enumerate() {
            if r > 0 {
                write!(f, " | ")?;
            }
            write!(f, "{depot}")?;
            for id in route {
                write!(f, " -> {id}")?;
            }
            write!(f, " -> {depot}")?;
        }
        Ok(())
    }
}
