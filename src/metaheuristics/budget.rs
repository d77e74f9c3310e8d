//! Iteration and wall-clock budgets shared by every orchestrator.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::distance::Cost;
use crate::error::{Result, SearchError};
use crate::models::Solution;

/// When an orchestrator stops iterating.
///
/// Budgets are checked between iterations only; a running construction or
/// local search is never interrupted. The first iteration always runs.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_cvrp::metaheuristics::SearchBudget;
///
/// let budget = SearchBudget::default()
///     .with_max_iterations(200)
///     .with_time_limit(Duration::from_secs(5));
/// assert_eq!(budget.max_iterations, 200);
/// assert!(budget.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchBudget {
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// Stop after this many consecutive iterations without improvement.
    pub max_iterations_without_improvement: usize,
    /// Wall-clock limit, checked between iterations.
    pub time_limit: Option<Duration>,
}

impl Default for SearchBudget {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            max_iterations_without_improvement: 100,
            time_limit: None,
        }
    }
}

impl SearchBudget {
    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the maximum iterations without improvement.
    pub fn with_max_iterations_without_improvement(mut self, n: usize) -> Self {
        self.max_iterations_without_improvement = n;
        self
    }

    /// Sets the wall-clock limit.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Checks both iteration counts are at least one.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations < 1 {
            return Err(SearchError::invalid_argument("max_iterations", "must be at least 1"));
        }
        if self.max_iterations_without_improvement < 1 {
            return Err(SearchError::invalid_argument(
                "max_iterations_without_improvement",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Starts tracking a run against this budget.
    pub fn start(&self) -> BudgetTracker {
        BudgetTracker {
            max_iterations: self.max_iterations,
            max_without_improvement: self.max_iterations_without_improvement,
            started: Instant::now(),
            deadline: self.time_limit,
            iterations: 0,
            since_improvement: 0,
            best_iteration: 0,
        }
    }
}

/// Runtime counters of one run.
#[derive(Debug, Clone)]
pub struct BudgetTracker {
    max_iterations: usize,
    max_without_improvement: usize,
    started: Instant,
    deadline: Option<Duration>,
    iterations: usize,
    since_improvement: usize,
    best_iteration: usize,
}

impl BudgetTracker {
    /// `true` while another iteration is allowed.
    pub fn should_continue(&self) -> bool {
        if self.iterations == 0 {
            return true;
        }
        self.iterations < self.max_iterations
            && self.since_improvement < self.max_without_improvement
            && self.deadline.map_or(true, |limit| self.started.elapsed() < limit)
    }

    /// Records the outcome of the iteration that just ran.
    pub fn record(&mut self, improved: bool) {
        self.iterations += 1;
        if improved {
            self.since_improvement = 0;
            self.best_iteration = self.iterations;
        } else {
            self.since_improvement += 1;
        }
    }

    /// Iterations completed so far.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Iteration (one based) that produced the incumbent, zero if none did.
    pub fn best_iteration(&self) -> usize {
        self.best_iteration
    }

    /// Time since the run started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Packs the final incumbent with the run statistics.
    pub fn finish(self, best: Solution) -> SearchResult {
        SearchResult {
            best,
            iterations: self.iterations,
            best_iteration: self.best_iteration,
            elapsed: self.started.elapsed(),
        }
    }
}

/// Result of an orchestrator run.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Best solution found.
    pub best: Solution,
    /// Total iterations executed.
    pub iterations: usize,
    /// Iteration (one based) at which the best solution was found; zero
    /// when the starting solution was never improved.
    pub best_iteration: usize,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

impl SearchResult {
    /// Total distance of the best solution.
    pub fn best_cost(&self) -> Cost {
        self.best.total_distance()
    }
}
