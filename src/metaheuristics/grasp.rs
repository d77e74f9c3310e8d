//! GRASP: Greedy Randomized Adaptive Search Procedure.
//!
//! # Algorithm
//!
//! 1. Build a solution with the RCL-randomized nearest neighbor
//! 2. Run the local search to a local optimum
//! 3. Keep it if it beats the incumbent
//! 4. Repeat until the budget is spent
//!
//! # Reference
//!
//! Feo, T. A. & Resende, M. G. C. (1995). "Greedy Randomized Adaptive Search
//! Procedures", *Journal of Global Optimization* 6, 109-133.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{multi_start, SearchBudget, SearchResult};
use crate::constructive::grasp_construction;
use crate::error::{Result, SearchError};
use crate::local_search::LocalSearch;
use crate::models::Specification;
use crate::random::create_rng;
use crate::recorder::AlgorithmRecorder;

/// Configuration parameters for GRASP.
///
/// # Examples
///
/// ```
/// use u_cvrp::metaheuristics::{GraspConfig, SearchBudget};
///
/// let config = GraspConfig::default()
///     .with_rcl_size(5)
///     .with_budget(SearchBudget::default().with_max_iterations(100))
///     .with_seed(42);
/// assert_eq!(config.rcl_size, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraspConfig {
    /// Iteration and time budget.
    pub budget: SearchBudget,
    /// Number of nearest fitting clients drawn from at each step.
    pub rcl_size: usize,
    /// Random seed (None for OS entropy).
    pub seed: Option<u64>,
}

impl Default for GraspConfig {
    fn default() -> Self {
        Self {
            budget: SearchBudget::default(),
            rcl_size: 3,
            seed: None,
        }
    }
}

impl GraspConfig {
    /// Sets the budget.
    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Sets the RCL size.
    pub fn with_rcl_size(mut self, k: usize) -> Self {
        self.rcl_size = k;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the budget and that the RCL holds at least one client.
    pub fn validate(&self) -> Result<()> {
        self.budget.validate()?;
        if self.rcl_size < 1 {
            return Err(SearchError::invalid_argument("rcl_size", "must be at least 1"));
        }
        Ok(())
    }
}

/// GRASP runner.
pub struct GraspRunner;

impl GraspRunner {
    /// Executes GRASP on `spec`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use u_cvrp::local_search::VariableNeighborhoodDescent;
    /// use u_cvrp::metaheuristics::{GraspConfig, GraspRunner, SearchBudget};
    /// use u_cvrp::models::{Client, Specification};
    /// use u_cvrp::moves::MoveKind;
    /// use u_cvrp::recorder::NoopRecorder;
    ///
    /// let spec = Arc::new(Specification::new(
    ///     vec![
    ///         Client::new(0, 0, 0),
    ///         Client::new(5, 5, 2),
    ///         Client::new(-5, 5, 2),
    ///         Client::new(5, -5, 2),
    ///         Client::new(-5, -5, 2),
    ///     ],
    ///     0, 4, 2,
    /// ).unwrap());
    /// let config = GraspConfig::default()
    ///     .with_budget(SearchBudget::default().with_max_iterations(20))
    ///     .with_seed(1);
    /// let mut ls = VariableNeighborhoodDescent::new(&MoveKind::ALL).unwrap();
    ///
    /// let result = GraspRunner::run(&spec, &config, &mut ls, &mut NoopRecorder).unwrap();
    /// assert!(result.best.is_feasible());
    /// assert!(result.best.is_complete());
    /// ```
    #[instrument(skip_all, fields(rcl_size = config.rcl_size))]
    pub fn run(
        spec: &Arc<Specification>,
        config: &GraspConfig,
        local_search: &mut dyn LocalSearch,
        recorder: &mut dyn AlgorithmRecorder,
    ) -> Result<SearchResult> {
        config.validate()?;
        let mut rng = create_rng(config.seed);
        multi_start(
            "grasp",
            &config.budget,
            &mut rng,
            |rng| grasp_construction(spec, config.rcl_size, rng),
            local_search,
            recorder,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_search::{BestNeighborLocalSearch, VariableNeighborhoodDescent};
    use crate::moves::MoveKind;
    use crate::random::create_rng;
    use crate::recorder::{HistoryRecorder, NoopRecorder};
    use crate::test_utils::{random_spec, small_spec};

    #[test]
    fn test_thousand_iterations_always_feasible() {
        let mut rng = create_rng(Some(21));
        for rcl_size in [1, 2, 5] {
            let spec = random_spec(&mut rng, 10, 15);
            let config = GraspConfig::default()
                .with_rcl_size(rcl_size)
                .with_budget(
                    SearchBudget::default()
                        .with_max_iterations(1000)
                        .with_max_iterations_without_improvement(1000),
                )
                .with_seed(rcl_size as u64);
            let mut ls = BestNeighborLocalSearch::new(MoveKind::Relocation);
            let result =
                GraspRunner::run(&spec, &config, &mut ls, &mut NoopRecorder).expect("valid");
            assert!(result.best.is_feasible());
            assert!(result.best.is_complete());
            assert_eq!(result.iterations, 1000);
        }
    }

    #[test]
    fn test_recorder_sees_every_iteration() {
        let spec = small_spec();
        let config = GraspConfig::default()
            .with_budget(
                SearchBudget::default()
                    .with_max_iterations(25)
                    .with_max_iterations_without_improvement(25),
            )
            .with_seed(3);
        let mut ls = VariableNeighborhoodDescent::new(&MoveKind::ALL).expect("non-empty");
        let mut recorder = HistoryRecorder::default();
        let result = GraspRunner::run(&spec, &config, &mut ls, &mut recorder).expect("valid");

        assert!(recorder.started && recorder.finished);
        assert_eq!(recorder.iterations, 25);
        assert_eq!(recorder.improvements.first().map(|i| i.0), Some(1));
        // improvements strictly decrease and end at the returned best
        for pair in recorder.improvements.windows(2) {
            assert!(pair[1].1 < pair[0].1);
        }
        assert_eq!(
            recorder.improvements.last().map(|i| i.1),
            Some(result.best_cost())
        );
        assert_eq!(
            recorder.improvements.last().map(|i| i.0),
            Some(result.best_iteration)
        );
    }

    #[test]
    fn test_stops_on_stagnation() {
        let spec = small_spec();
        let config = GraspConfig::default()
            .with_rcl_size(1)
            .with_budget(
                SearchBudget::default()
                    .with_max_iterations(500)
                    .with_max_iterations_without_improvement(5),
            );
        let mut ls = BestNeighborLocalSearch::new(MoveKind::TwoOpt);
        // rcl of one is deterministic: nothing after the first iteration improves
        let result = GraspRunner::run(&spec, &config, &mut ls, &mut NoopRecorder).expect("valid");
        assert_eq!(result.iterations, 6);
        assert_eq!(result.best_iteration, 1);
    }

    #[test]
    fn test_rejects_zero_rcl() {
        let spec = small_spec();
        let config = GraspConfig::default().with_rcl_size(0);
        let mut ls = BestNeighborLocalSearch::new(MoveKind::TwoOpt);
        let mut recorder = HistoryRecorder::default();
        let err = GraspRunner::run(&spec, &config, &mut ls, &mut recorder).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(!recorder.started);
    }
}
