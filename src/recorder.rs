//! Progress callbacks for metaheuristic runs.
//!
//! Orchestrators never format output themselves; they report to an
//! injected [`AlgorithmRecorder`], which owns timing, CSV or logging
//! concerns.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::distance::Cost;
use crate::models::Solution;

/// Receives lifecycle events from an orchestrator.
///
/// Every method has an empty default so implementors only override what
/// they need.
pub trait AlgorithmRecorder {
    /// Called once before the first iteration.
    fn starting(&mut self) {}

    /// Called once after the last iteration.
    fn finishing(&mut self) {}

    /// Called at the top of every iteration.
    fn about_to_do_next_iteration(&mut self) {}

    /// Called whenever the incumbent improves.
    fn found_better_solution(&mut self, _solution: &Solution) {}
}

/// Recorder that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRecorder;

impl AlgorithmRecorder for NoopRecorder {}

/// Recorder that forwards events to `tracing`.
///
/// # Examples
///
/// ```
/// use u_cvrp::recorder::{AlgorithmRecorder, TracingRecorder};
///
/// let mut recorder = TracingRecorder::new("grasp");
/// recorder.starting();
/// recorder.about_to_do_next_iteration();
/// recorder.finishing();
/// assert_eq!(recorder.iterations(), 1);
/// ```
#[derive(Debug)]
pub struct TracingRecorder {
    name: &'static str,
    started: Option<Instant>,
    iterations: usize,
}

impl TracingRecorder {
    /// Creates a recorder tagging its events with `name`.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            started: None,
            iterations: 0,
        }
    }

    /// Iterations announced so far.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    fn elapsed(&self) -> Duration {
        self.started.map(|s| s.elapsed()).unwrap_or_default()
    }
}

impl AlgorithmRecorder for TracingRecorder {
    fn starting(&mut self) {
        self.started = Some(Instant::now());
        self.iterations = 0;
        info!(algorithm = self.name, "starting");
    }

    fn finishing(&mut self) {
        info!(
            algorithm = self.name,
            iterations = self.iterations,
            elapsed_ms = self.elapsed().as_millis() as u64,
            "finishing"
        );
    }

    fn about_to_do_next_iteration(&mut self) {
        self.iterations += 1;
    }

    fn found_better_solution(&mut self, solution: &Solution) {
        debug!(
            algorithm = self.name,
            iteration = self.iterations,
            distance = solution.total_distance(),
            routes = solution.num_routes(),
            elapsed_ms = self.elapsed().as_millis() as u64,
            "found better solution"
        );
    }
}

/// Recorder that keeps the cost of every improvement in memory.
#[derive(Debug, Default, Clone)]
pub struct HistoryRecorder {
    /// Whether `starting` was called.
    pub started: bool,
    /// Whether `finishing` was called.
    pub finished: bool,
    /// Number of iterations announced.
    pub iterations: usize,
    /// `(iteration, distance)` of each reported improvement.
    pub improvements: Vec<(usize, Cost)>,
}

impl AlgorithmRecorder for HistoryRecorder {
    fn starting(&mut self) {
        self.started = true;
    }

    fn finishing(&mut self) {
        self.finished = true;
    }

    fn about_to_do_next_iteration(&mut self) {
        self.iterations += 1;
    }

    fn found_better_solution(&mut self, solution: &Solution) {
        self.improvements
            .push((self.iterations, solution.total_distance()));
    }
}
