//! Metaheuristic orchestrators combining constructions, moves and local searches.
//!
//! - [`GraspRunner`] — RCL construction + local search, repeated
//! - [`MultibootRunner`] — random construction + local search, repeated
//! - [`VnsRunner`] — Variable Neighborhood Search with feasible shaking
//! - [`LnsRunner`] — Large Neighborhood Search with random removal and greedy reinsertion
//!
//! Every run owns its random generator, reports to an injected
//! [`AlgorithmRecorder`] and returns a [`SearchResult`].

mod budget;
mod grasp;
mod lns;
mod multiboot;
mod vns;

use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::error::Result;
use crate::local_search::LocalSearch;
use crate::models::Solution;
use crate::recorder::AlgorithmRecorder;

pub use budget::{BudgetTracker, SearchBudget, SearchResult};
pub use grasp::{GraspConfig, GraspRunner};
pub use lns::{LnsConfig, LnsRunner};
pub use multiboot::{MultibootConfig, MultibootRunner};
pub use vns::{VnsConfig, VnsRunner};

/// Construct-then-improve loop shared by GRASP and Multiboot.
///
/// Keeps the cheapest local optimum; the first one counts as an improvement.
fn multi_start<C>(
    name: &'static str,
    budget: &SearchBudget,
    rng: &mut StdRng,
    mut construct: C,
    local_search: &mut dyn LocalSearch,
    recorder: &mut dyn AlgorithmRecorder,
) -> Result<SearchResult>
where
    C: FnMut(&mut StdRng) -> Result<Solution>,
{
    info!(
        algorithm = name,
        local_search = local_search.name(),
        max_iterations = budget.max_iterations,
        "starting"
    );
    recorder.starting();

    let mut tracker = budget.start();
    recorder.about_to_do_next_iteration();
    let mut best = local_search.find_local_optimum(&construct(rng)?)?;
    recorder.found_better_solution(&best);
    tracker.record(true);

    while tracker.should_continue() {
        recorder.about_to_do_next_iteration();
        let constructed = construct(rng)?;
        let candidate = local_search.find_local_optimum(&constructed)?;

        let improved = candidate.total_distance() < best.total_distance();
        if improved {
            debug!(
                algorithm = name,
                iteration = tracker.iterations() + 1,
                distance = candidate.total_distance(),
                "new best"
            );
            recorder.found_better_solution(&candidate);
            best = candidate;
        }
        tracker.record(improved);
    }

    recorder.finishing();
    info!(
        algorithm = name,
        iterations = tracker.iterations(),
        distance = best.total_distance(),
        "finished"
    );
    Ok(tracker.finish(best))
}
