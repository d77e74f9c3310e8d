//! Large Neighborhood Search with random removal and greedy reinsertion.
//!
//! # Algorithm
//!
//! 1. Start from a feasible solution (the incumbent)
//! 2. For each reconstruction:
//!    a. **Destroy**: remove `floor(pct * n)` random clients (at least one),
//!    never emptying a route
//!    b. **Repair**: reinsert them one by one at their cheapest position,
//!    first among routes with enough spare capacity, then anywhere
//!    c. Accept the result only if it is feasible and cheaper; when the
//!    relative gain exceeds the threshold, polish it with the local search
//! 3. Polish the incumbent with the local search and return it
//!
//! # Reference
//!
//! Shaw, P. (1998). "Using Constraint Programming and Local Search Methods
//! to Solve Vehicle Routing Problems", *CP-98*, LNCS 1520, 417-431.

use std::time::Duration;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::{SearchBudget, SearchResult};
use crate::distance::Cost;
use crate::error::{Result, SearchError};
use crate::local_search::{require_feasible, LocalSearch};
use crate::models::Solution;
use crate::random::create_rng;
use crate::recorder::AlgorithmRecorder;

/// Configuration parameters for Large Neighborhood Search.
///
/// # Examples
///
/// ```
/// use u_cvrp::metaheuristics::LnsConfig;
///
/// let config = LnsConfig::default()
///     .with_max_reconstructions(500)
///     .with_destruction_percentage(0.3);
/// assert_eq!(config.max_reconstructions, 500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LnsConfig {
    /// Number of destroy/repair rounds.
    pub max_reconstructions: usize,
    /// Share of the clients removed per round, in `(0, 1]`.
    pub destruction_percentage: f64,
    /// Relative gain above which an accepted reconstruction is polished.
    pub local_search_threshold: f64,
    /// Random seed (None for OS entropy).
    pub seed: Option<u64>,
    /// Wall-clock limit, checked between rounds.
    pub time_limit: Option<Duration>,
}

impl Default for LnsConfig {
    fn default() -> Self {
        Self {
            max_reconstructions: 1000,
            destruction_percentage: 0.2,
            local_search_threshold: 0.01,
            seed: None,
            time_limit: None,
        }
    }
}

impl LnsConfig {
    /// Sets the number of reconstructions.
    pub fn with_max_reconstructions(mut self, n: usize) -> Self {
        self.max_reconstructions = n;
        self
    }

    /// Sets the share of clients removed per round.
    pub fn with_destruction_percentage(mut self, pct: f64) -> Self {
        self.destruction_percentage = pct;
        self
    }

    /// Sets the local search threshold.
    pub fn with_local_search_threshold(mut self, threshold: f64) -> Self {
        self.local_search_threshold = threshold;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the wall-clock limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Checks the round count and both ratios.
    pub fn validate(&self) -> Result<()> {
        if self.max_reconstructions < 1 {
            return Err(SearchError::invalid_argument("max_reconstructions", "must be at least 1"));
        }
        if !(self.destruction_percentage > 0.0 && self.destruction_percentage <= 1.0) {
            return Err(SearchError::invalid_argument(
                "destruction_percentage",
                format!("must be in (0, 1], got {}", self.destruction_percentage),
            ));
        }
        if !(self.local_search_threshold.is_finite() && self.local_search_threshold >= 0.0) {
            return Err(SearchError::invalid_argument(
                "local_search_threshold",
                format!(
                    "must be a non-negative number, got {}",
                    self.local_search_threshold
                ),
            ));
        }
        Ok(())
    }

    fn budget(&self) -> SearchBudget {
        SearchBudget {
            max_iterations: self.max_reconstructions,
            max_iterations_without_improvement: usize::MAX,
            time_limit: self.time_limit,
        }
    }
}

/// Large Neighborhood Search runner.
pub struct LnsRunner;

impl LnsRunner {
    /// Executes LNS from `initial`.
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidArgument`] for an invalid `config`
    /// - [`SearchError::InfeasibleSolution`] when `initial` is infeasible;
    ///   nothing is destroyed in that case
    ///
    /// # Examples
    ///
    /// ```
    /// use u_cvrp::constructive::nearest_neighbor;
    /// use u_cvrp::local_search::VariableNeighborhoodDescent;
    /// use u_cvrp::metaheuristics::{LnsConfig, LnsRunner};
    /// use u_cvrp::models::{Client, Specification};
    /// use u_cvrp::moves::MoveKind;
    /// use u_cvrp::recorder::NoopRecorder;
    /// use std::sync::Arc;
    ///
    /// let spec = Arc::new(Specification::new(
    ///     vec![
    ///         Client::new(0, 0, 0),
    ///         Client::new(3, 1, 1),
    ///         Client::new(6, 0, 1),
    ///         Client::new(-3, 1, 1),
    ///         Client::new(-6, 0, 1),
    ///     ],
    ///     0, 3, 2,
    /// ).unwrap());
    /// let initial = nearest_neighbor(&spec);
    /// let mut ls = VariableNeighborhoodDescent::new(&MoveKind::ALL).unwrap();
    /// let config = LnsConfig::default().with_max_reconstructions(50).with_seed(2);
    ///
    /// let result = LnsRunner::run(&initial, &mut ls, &config, &mut NoopRecorder).unwrap();
    /// assert!(result.best.is_feasible());
    /// assert!(result.best_cost() <= initial.total_distance());
    /// ```
    #[instrument(skip_all, fields(pct = config.destruction_percentage))]
    pub fn run(
        initial: &Solution,
        local_search: &mut dyn LocalSearch,
        config: &LnsConfig,
        recorder: &mut dyn AlgorithmRecorder,
    ) -> Result<SearchResult> {
        config.validate()?;
        require_feasible(initial, "large neighborhood search")?;

        let mut rng = create_rng(config.seed);
        info!(
            local_search = local_search.name(),
            distance = initial.total_distance(),
            "lns starting"
        );
        recorder.starting();

        let mut tracker = config.budget().start();
        let mut incumbent = initial.clone();
        while tracker.should_continue() {
            recorder.about_to_do_next_iteration();

            let removed = choose_removals(&incumbent, config.destruction_percentage, &mut rng);
            let mut candidate = incumbent.without_clients(&removed);
            for &client in &removed {
                candidate = reinsert(&candidate, client);
            }

            let improved =
                candidate.is_feasible() && candidate.total_distance() < incumbent.total_distance();
            if improved {
                let margin = relative_gain(incumbent.total_distance(), candidate.total_distance());
                if margin > config.local_search_threshold {
                    candidate = local_search.find_local_optimum(&candidate)?;
                }
                debug!(
                    iteration = tracker.iterations() + 1,
                    removed = removed.len(),
                    margin,
                    distance = candidate.total_distance(),
                    "lns accepted a reconstruction"
                );
                recorder.found_better_solution(&candidate);
                incumbent = candidate;
            }
            tracker.record(improved);
        }

        let polished = local_search.find_local_optimum(&incumbent)?;
        if polished.total_distance() < incumbent.total_distance() {
            recorder.found_better_solution(&polished);
            incumbent = polished;
        }

        recorder.finishing();
        info!(
            iterations = tracker.iterations(),
            distance = incumbent.total_distance(),
            "lns finished"
        );
        Ok(tracker.finish(incumbent))
    }
}

/// `(incumbent - candidate) / incumbent`, zero for a zero-cost incumbent.
fn relative_gain(incumbent: Cost, candidate: Cost) -> f64 {
    if incumbent == 0 {
        return 0.0;
    }
    (incumbent - candidate) as f64 / incumbent as f64
}

/// Picks the clients to remove, in removal order.
///
/// Takes `floor(pct * n)` clients (at least one) at random, skipping any
/// whose removal would empty its route.
fn choose_removals<R: Rng>(solution: &Solution, pct: f64, rng: &mut R) -> Vec<usize> {
    let target = ((solution.num_clients() as f64 * pct).floor() as usize).max(1);

    let mut served: Vec<(usize, usize)> = (0..solution.num_routes())
        .flat_map(|r| solution.route(r).iter().map(move |&c| (c, r)))
        .collect();
    served.shuffle(rng);

    let mut left: Vec<usize> = (0..solution.num_routes())
        .map(|r| solution.route_len(r))
        .collect();
    let mut removed = Vec::with_capacity(target);
    for (client, r) in served {
        if removed.len() == target {
            break;
        }
        if left[r] > 1 {
            left[r] -= 1;
            removed.push(client);
        }
    }
    removed
}

/// Inserts `client` at its cheapest position.
///
/// Only routes with room for the client's demand are considered; when none
/// has room, every position of every route is.
fn reinsert(solution: &Solution, client: usize) -> Solution {
    let demand = i64::from(solution.spec().demand(client));
    let fits = |r: usize| solution.remaining_capacity(r) >= demand;
    let position = cheapest_insertion(solution, client, fits)
        .or_else(|| cheapest_insertion(solution, client, |_| true));
    match position {
        Some((r, pos)) => solution.with_client_inserted(r, pos, client),
        // a solution always has at least one route
        None => solution.clone(),
    }
}

/// Cheapest `(route, position)` for `client` among routes accepted by `allowed`.
fn cheapest_insertion<F>(solution: &Solution, client: usize, allowed: F) -> Option<(usize, usize)>
where
    F: Fn(usize) -> bool,
{
    let mut best: Option<(Cost, usize, usize)> = None;
    for r in (0..solution.num_routes()).filter(|&r| allowed(r)) {
        for pos in 0..=solution.route_len(r) {
            let delta = solution.insertion_delta(r, pos, client);
            if best.map_or(true, |(d, _, _)| delta < d) {
                best = Some((delta, r, pos));
            }
        }
    }
    best.map(|(_, r, pos)| (r, pos))
}
