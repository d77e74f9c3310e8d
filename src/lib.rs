//! # u-cvrp
//!
//! Capacitated vehicle routing engine: a flat solution codification, move
//! cursors with incremental evaluation, local searches, constructive
//! heuristics and metaheuristic orchestrators.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Client, Specification, Solution)
//! - [`distance`] — Truncated Euclidean distance matrix
//! - [`moves`] — Neighbourhood cursors (swaps, relocation, 2-opt) with O(1) deltas
//! - [`local_search`] — Steepest/first-improvement descent, VND, Tabu Search
//! - [`constructive`] — Nearest neighbor, GRASP RCL and random constructions
//! - [`metaheuristics`] — GRASP, Multiboot, VNS and LNS orchestrators
//! - [`recorder`] — Progress callbacks injected into every orchestrator
//! - [`random`] — Instance-scoped random generators
//! - [`error`] — Error type shared by the whole crate
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use u_cvrp::local_search::VariableNeighborhoodDescent;
//! use u_cvrp::metaheuristics::{GraspConfig, GraspRunner, SearchBudget};
//! use u_cvrp::models::{Client, Specification};
//! use u_cvrp::moves::MoveKind;
//! use u_cvrp::recorder::TracingRecorder;
//!
//! let spec = Arc::new(Specification::new(
//!     vec![
//!         Client::new(0, 0, 0),
//!         Client::new(3, 4, 1),
//!         Client::new(4, 3, 1),
//!         Client::new(-6, 2, 2),
//!     ],
//!     0, 3, 1,
//! ).unwrap());
//!
//! let mut vnd = VariableNeighborhoodDescent::new(&MoveKind::ALL).unwrap();
//! let config = GraspConfig::default()
//!     .with_budget(SearchBudget::default().with_max_iterations(10))
//!     .with_seed(42);
//! let mut recorder = TracingRecorder::new("grasp");
//!
//! let result = GraspRunner::run(&spec, &config, &mut vnd, &mut recorder).unwrap();
//! assert!(result.best.is_feasible());
//! assert!(result.best.is_complete());
//! ```

pub mod constructive;
pub mod distance;
pub mod error;
pub mod local_search;
pub mod metaheuristics;
pub mod models;
pub mod moves;
pub mod random;
pub mod recorder;

#[cfg(test)]
mod test_utils;

pub use error::{Result, SearchError};
