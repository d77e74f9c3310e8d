//! Multiboot: random restarts followed by local search.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{multi_start, SearchBudget, SearchResult};
use crate::constructive::random_construction;
use crate::error::Result;
use crate::local_search::LocalSearch;
use crate::models::Specification;
use crate::random::create_rng;
use crate::recorder::AlgorithmRecorder;

/// Configuration parameters for Multiboot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MultibootConfig {
    /// Iteration and time budget.
    pub budget: SearchBudget,
    /// Random seed (None for OS entropy).
    pub seed: Option<u64>,
}

impl MultibootConfig {
    /// Sets the budget.
    pub fn with_budget(mut self, budget: SearchBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the budget.
    pub fn validate(&self) -> Result<()> {
        self.budget.validate()
    }
}

/// Multiboot runner: random construction, local search, keep the best.
pub struct MultibootRunner;

impl MultibootRunner {
    /// Executes Multiboot on `spec`.
    #[instrument(skip_all)]
    pub fn run(
        spec: &Arc<Specification>,
        config: &MultibootConfig,
        local_search: &mut dyn LocalSearch,
        recorder: &mut dyn AlgorithmRecorder,
    ) -> Result<SearchResult> {
        config.validate()?;
        let mut rng = create_rng(config.seed);
        multi_start(
            "multiboot",
            &config.budget,
            &mut rng,
            |rng| Ok(random_construction(spec, rng)),
            local_search,
            recorder,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constructive::random_construction;
    use crate::local_search::FirstBetterNeighborLocalSearch;
    use crate::moves::MoveKind;
    use crate::random::create_rng;
    use crate::recorder::HistoryRecorder;
    use crate::test_utils::small_spec;

    #[test]
    fn test_beats_a_plain_random_construction() {
        let spec = small_spec();
        let config = MultibootConfig::default()
            .with_budget(SearchBudget::default().with_max_iterations(50))
            .with_seed(11);
        let mut ls = FirstBetterNeighborLocalSearch::new(MoveKind::Relocation);
        let mut recorder = HistoryRecorder::default();
        let result = MultibootRunner::run(&spec, &config, &mut ls, &mut recorder).expect("valid");

        assert!(result.best.is_feasible());
        assert!(result.best.is_complete());
        assert!(recorder.started && recorder.finished);
        assert_eq!(recorder.iterations, result.iterations);

        // the first restart of the run is one of the candidates it improved on
        let first = random_construction(&spec, &mut create_rng(Some(11)));
        assert!(result.best_cost() <= first.total_distance());
    }

    #[test]
    fn test_same_seed_same_result() {
        let spec = small_spec();
        let config = MultibootConfig::default()
            .with_budget(SearchBudget::default().with_max_iterations(20))
            .with_seed(4);
        let mut a = FirstBetterNeighborLocalSearch::new(MoveKind::TwoOpt);
        let mut b = FirstBetterNeighborLocalSearch::new(MoveKind::TwoOpt);
        let ra = MultibootRunner::run(&spec, &config, &mut a, &mut HistoryRecorder::default())
            .expect("valid");
        let rb = MultibootRunner::run(&spec, &config, &mut b, &mut HistoryRecorder::default())
            .expect("valid");
        assert_eq!(ra.best, rb.best);
        assert_eq!(ra.iterations, rb.iterations);
    }

    #[test]
    fn test_rejects_invalid_budget() {
        let spec = small_spec();
        let config = MultibootConfig::default()
            .with_budget(SearchBudget::default().with_max_iterations(0));
        let mut ls = FirstBetterNeighborLocalSearch::new(MoveKind::TwoOpt);
        assert!(
            MultibootRunner::run(&spec, &config, &mut ls, &mut HistoryRecorder::default())
                .is_err_and(|e| e.is_invalid_argument())
        );
    }
}
