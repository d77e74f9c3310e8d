//! Variable Neighborhood Search execution engine.
//!
//! # Algorithm (Basic VNS)
//!
//! 1. Start from a feasible solution x
//! 2. While the budget allows:
//!    a. **Shaking**: pick a shaking move at random and apply
//!    `shake_strength` random feasible neighbours of it to x, giving x'
//!    b. **Local search**: x'' = local optimum from x'
//!    c. **Move or not**: if f(x'') < f(x), set x = x''
//! 3. Return x
//!
//! # Reference
//!
//! Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//! *Computers & Operations Research* 24(11), 1097-1100.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::{SearchBudget, SearchResult};
use crate::error::{Result, SearchError};
use crate::local_search::{require_feasible, LocalSearch};
use crate::models::Solution;
use crate::moves::{instantiate_all, random_feasible_neighbor, MoveKind};
use crate::random::create_rng;
use crate::recorder::AlgorithmRecorder;

/// Configuration parameters for Variable Neighborhood Search.
///
/// # Examples
///
/// ```
/// use u_cvrp::metaheuristics::VnsConfig;
///
/// let config = VnsConfig::default().with_shake_strength(3).with_seed(42);
/// assert_eq!(config.shake_strength, 3);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VnsConfig {
    /// Iteration and time budget.
    pub budget: SearchBudget,
    /// Random neighbours applied per shake.
    pub shake_strength: usize,
    /// Random seed (None for OS entropy).
    pub seed: Option<u64>,
}

impl Default for VnsConfig {
    fn default() -> Self {
        Self {
            budget: SearchBudget::default(),
            shake_strength: 2,
            seed: None,
        }
    }
}

impl VnsConfig {
    /// Sets the budget.
    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Sets the shake strength.
    pub fn with_shake_strength(mut self, n: usize) -> Self {
        self.shake_strength = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the budget and that every shake changes something.
    pub fn validate(&self) -> Result<()> {
        self.budget.validate()?;
        if self.shake_strength < 1 {
            return Err(SearchError::invalid_argument("shake_strength", "must be at least 1"));
        }
        Ok(())
    }
}

/// Variable Neighborhood Search runner.
pub struct VnsRunner;

impl VnsRunner {
    /// Executes VNS from `initial`, shaking with `shaking` moves.
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidArgument`] for an invalid `config`
    /// - [`SearchError::EmptyMoveList`] when `shaking` is empty
    /// - [`SearchError::InfeasibleSolution`] when `initial` is infeasible
    ///
    /// # Examples
    ///
    /// ```
    /// use u_cvrp::constructive::nearest_neighbor;
    /// use u_cvrp::local_search::BestNeighborLocalSearch;
    /// use u_cvrp::metaheuristics::{SearchBudget, VnsConfig, VnsRunner};
    /// use u_cvrp::models::{Client, Specification};
    /// use u_cvrp::moves::MoveKind;
    /// use u_cvrp::recorder::NoopRecorder;
    /// use std::sync::Arc;
    ///
    /// let spec = Arc::new(Specification::new(
    ///     vec![Client::new(0, 0, 0), Client::new(4, 0, 1), Client::new(0, 4, 1), Client::new(-4, 0, 1)],
    ///     0, 2, 2,
    /// ).unwrap());
    /// let initial = nearest_neighbor(&spec);
    /// let config = VnsConfig::default()
    ///     .with_budget(SearchBudget::default().with_max_iterations(30))
    ///     .with_seed(5);
    /// let mut ls = BestNeighborLocalSearch::new(MoveKind::Relocation);
    ///
    /// let result = VnsRunner::run(&initial, &MoveKind::ALL, &mut ls, &config, &mut NoopRecorder).unwrap();
    /// assert!(result.best_cost() <= initial.total_distance());
    /// ```
    #[instrument(skip_all, fields(shake_strength = config.shake_strength))]
    pub fn run(
        initial: &Solution,
        shaking: &[MoveKind],
        local_search: &mut dyn LocalSearch,
        config: &VnsConfig,
        recorder: &mut dyn AlgorithmRecorder,
    ) -> Result<SearchResult> {
        config.validate()?;
        if shaking.is_empty() {
            return Err(SearchError::EmptyMoveList);
        }
        require_feasible(initial, "variable neighborhood search")?;

        let mut rng = create_rng(config.seed);
        let mut moves = instantiate_all(shaking);
        info!(
            local_search = local_search.name(),
            distance = initial.total_distance(),
            "vns starting"
        );
        recorder.starting();

        let mut tracker = config.budget.start();
        let mut incumbent = initial.clone();
        while tracker.should_continue() {
            recorder.about_to_do_next_iteration();

            let k = rng.random_range(0..moves.len());
            let mv = moves[k].as_mut();
            let mut shaken = incumbent.clone();
            for _ in 0..config.shake_strength {
                match random_feasible_neighbor(mv, &shaken, &mut rng)? {
                    Some(next) => shaken = next,
                    None => break,
                }
            }

            let candidate = local_search.find_local_optimum(&shaken)?;
            let improved = candidate.total_distance() < incumbent.total_distance();
            if improved {
                debug!(
                    iteration = tracker.iterations() + 1,
                    kind = %mv.kind(),
                    distance = candidate.total_distance(),
                    "vns improved"
                );
                recorder.found_better_solution(&candidate);
                incumbent = candidate;
            }
            tracker.record(improved);
        }

        recorder.finishing();
        info!(
            iterations = tracker.iterations(),
            distance = incumbent.total_distance(),
            "vns finished"
        );
        Ok(tracker.finish(incumbent))
    }
}
