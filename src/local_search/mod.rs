//! Local search strategies driving the move engine to a local optimum.
//!
//! - [`BestNeighborLocalSearch`] — steepest descent over one move kind
//! - [`FirstBetterNeighborLocalSearch`] — first-improvement descent
//! - [`VariableNeighborhoodDescent`] — steepest descent cycling over several kinds
//! - [`TabuSearch`] — short-term memory search over a random move kind per iteration
//!
//! Every strategy requires a feasible starting solution and only ever
//! returns feasible solutions.

mod best_neighbor;
mod first_better;
mod tabu;
mod vnd;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};
use crate::models::Solution;
use crate::moves::MoveKind;

pub use best_neighbor::BestNeighborLocalSearch;
pub use first_better::FirstBetterNeighborLocalSearch;
pub use tabu::{TabuConfig, TabuList, TabuSearch, TabuStep};
pub use vnd::VariableNeighborhoodDescent;

/// A strategy turning a solution into a local optimum.
///
/// Strategies own their move cursors (and, for Tabu Search, their random
/// generator and tabu memory), hence `&mut self`.
pub trait LocalSearch: Send {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Improves `base` until the strategy's stopping rule fires.
    ///
    /// Fails with [`SearchError::InfeasibleSolution`] when `base` is infeasible.
    fn find_local_optimum(&mut self, base: &Solution) -> Result<Solution>;
}

/// Serializable description of a local search, for harness configuration.
///
/// # Examples
///
/// ```
/// use u_cvrp::local_search::LocalSearchConfig;
/// use u_cvrp::moves::MoveKind;
///
/// let config = LocalSearchConfig::Vnd {
///     moves: vec![MoveKind::Relocation, MoveKind::TwoOpt],
/// };
/// let strategy = config.build().unwrap();
/// assert_eq!(strategy.name(), "vnd");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum LocalSearchConfig {
    /// Steepest descent.
    BestNeighbor {
        /// Neighbourhood explored.
        #[serde(rename = "move")]
        kind: MoveKind,
    },
    /// First-improvement descent.
    FirstBetterNeighbor {
        /// Neighbourhood explored.
        #[serde(rename = "move")]
        kind: MoveKind,
    },
    /// Variable neighbourhood descent.
    Vnd {
        /// Neighbourhoods, in the order they are tried.
        moves: Vec<MoveKind>,
    },
    /// Tabu Search.
    Tabu {
        /// Neighbourhoods sampled from.
        moves: Vec<MoveKind>,
        /// Tenure and stopping rules.
        #[serde(default)]
        config: TabuConfig,
    },
}

impl LocalSearchConfig {
    /// Instantiates the described strategy.
    pub fn build(&self) -> Result<Box<dyn LocalSearch>> {
        Ok(match self {
            LocalSearchConfig::BestNeighbor { kind } => {
                Box::new(BestNeighborLocalSearch::new(*kind))
            }
            LocalSearchConfig::FirstBetterNeighbor { kind } => {
                Box::new(FirstBetterNeighborLocalSearch::new(*kind))
            }
            LocalSearchConfig::Vnd { moves } => Box::new(VariableNeighborhoodDescent::new(moves)?),
            LocalSearchConfig::Tabu { moves, config } => {
                Box::new(TabuSearch::new(moves, config.clone())?)
            }
        })
    }
}

/// Fails unless `solution` is feasible.
pub(crate) fn require_feasible(solution: &Solution, who: &'static str) -> Result<()> {
    if solution.is_feasible() {
        Ok(())
    } else {
        Err(SearchError::InfeasibleSolution(who))
    }
}
