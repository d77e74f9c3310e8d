//! Tabu Search over the move engine.
//!
//! # Algorithm
//!
//! 1. Start from a feasible solution; it is also the best feasible so far
//! 2. At each iteration:
//!    a. Pick one move kind at random and scan its whole neighbourhood; when it
//!       offers no admissible candidate, scan the other kinds in order
//!    b. Keep the best admissible candidate: non-tabu, or tabu but feasible
//!       and cheaper than the best feasible cost (aspiration)
//!    c. While the current solution is infeasible, rank feasible candidates first
//!    d. After `stagnation_limit` iterations without a new best, accept a
//!       weighted-random non-tabu neighbour instead (cheaper is likelier)
//!    e. Age the tabu list, then make the accepted signature tabu for `tenure` iterations
//! 3. Terminate on the iteration cap, the no-improvement cap, or when no move
//!    is selectable: the sampled kind has no admissible candidate and neither
//!    has any other kind
//!
//! # Reference
//!
//! Glover, F. (1989). "Tabu Search, Part I", *ORSA Journal on Computing* 1(3), 190-206.
//! Gendreau, M., Hertz, A. & Laporte, G. (1994). "A Tabu Search Heuristic for
//! the Vehicle Routing Problem", *Management Science* 40(10), 1276-1290.

use std::collections::HashMap;

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{require_feasible, LocalSearch};
use crate::distance::Cost;
use crate::error::{Result, SearchError};
use crate::models::Solution;
use crate::moves::{instantiate_all, neighbor_at, Move, MoveKind, MoveSignature};
use crate::random::create_rng;

/// Configuration parameters for Tabu Search.
///
/// # Examples
///
/// ```
/// use u_cvrp::local_search::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_tenure(10)
///     .with_max_iterations(500)
///     .with_seed(42);
/// assert_eq!(config.tenure, 10);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabuConfig {
    /// How many iterations an accepted move signature stays tabu.
    pub tenure: usize,
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// Stop after this many consecutive iterations without a new best.
    pub max_iterations_without_improvement: usize,
    /// Iterations without a new best before the weighted-random escape.
    pub stagnation_limit: usize,
    /// Random seed (None for OS entropy).
    pub seed: Option<u64>,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            tenure: 7,
            max_iterations: 1000,
            max_iterations_without_improvement: 300,
            stagnation_limit: 50,
            seed: None,
        }
    }
}

impl TabuConfig {
    /// Sets the tabu tenure.
    pub fn with_tenure(mut self, tenure: usize) -> Self {
        self.tenure = tenure;
        self
    }

    /// Sets the maximum number of iterations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the no-improvement stopping rule.
    pub fn with_max_iterations_without_improvement(mut self, n: usize) -> Self {
        self.max_iterations_without_improvement = n;
        self
    }

    /// Sets the stagnation period that triggers an escape.
    pub fn with_stagnation_limit(mut self, n: usize) -> Self {
        self.stagnation_limit = n;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks every iteration count is at least one.
    pub fn validate(&self) -> Result<()> {
        let counts = [
            ("max_iterations", self.max_iterations),
            (
                "max_iterations_without_improvement",
                self.max_iterations_without_improvement,
            ),
            ("stagnation_limit", self.stagnation_limit),
        ];
        for (name, value) in counts {
            if value < 1 {
                return Err(SearchError::invalid_argument(name, "must be at least 1"));
            }
        }
        Ok(())
    }
}

/// Short-term memory: move signatures with their remaining tenure.
///
/// # Examples
///
/// ```
/// use u_cvrp::local_search::TabuList;
/// use u_cvrp::moves::MoveSignature;
///
/// let mut list = TabuList::new();
/// let sig = MoveSignature::new(3, 7);
/// list.insert(sig, 2);
/// assert!(list.is_tabu(&sig));
/// list.tick();
/// list.tick();
/// assert!(!list.is_tabu(&sig));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TabuList {
    entries: HashMap<MoveSignature, usize>,
}

impl TabuList {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `signature` tabu for the next `tenure` ticks, replacing any
    /// previous countdown. A zero tenure records nothing.
    pub fn insert(&mut self, signature: MoveSignature, tenure: usize) {
        if tenure > 0 {
            self.entries.insert(signature, tenure);
        }
    }

    /// `true` while `signature` has tenure left.
    pub fn is_tabu(&self, signature: &MoveSignature) -> bool {
        self.entries.contains_key(signature)
    }

    /// Remaining tenure of `signature`, zero when not tabu.
    pub fn remaining(&self, signature: &MoveSignature) -> usize {
        self.entries.get(signature).copied().unwrap_or(0)
    }

    /// Decrements every tenure and evicts entries reaching zero.
    pub fn tick(&mut self) {
        self.entries.retain(|_, tenure| {
            *tenure -= 1;
            *tenure > 0
        });
    }

    /// Number of tabu signatures.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// `true` when nothing is tabu.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forgets every signature.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// One accepted move of the last run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TabuStep {
    /// Iteration (zero based) in which the move was accepted.
    pub iteration: usize,
    /// Kind of the accepted move.
    pub kind: MoveKind,
    /// Tabu key of the accepted move.
    pub signature: MoveSignature,
    /// Total distance after the move.
    pub cost: Cost,
    /// Feasibility after the move.
    pub feasible: bool,
    /// Accepted although tabu, because it set a new best.
    pub aspiration: bool,
    /// Accepted by the stagnation escape.
    pub escape: bool,
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    step: usize,
    cost: Cost,
    feasible: bool,
    signature: MoveSignature,
    aspiration: bool,
}

impl Candidate {
    /// Ranking used to pick the accepted neighbour. While hunting for
    /// feasibility, any feasible candidate beats every infeasible one.
    fn beats(&self, other: &Candidate, hunting: bool) -> bool {
        if hunting && self.feasible != other.feasible {
            return self.feasible;
        }
        self.cost < other.cost
    }
}

/// Outcome of scanning one neighbourhood of the current solution.
struct Scan {
    /// Best admissible candidate, if any.
    chosen: Option<Candidate>,
    /// Non-tabu candidates, only collected for the stagnation escape.
    pool: Vec<Candidate>,
}

fn scan(
    mv: &mut dyn Move,
    current: &Solution,
    tabu: &TabuList,
    best_cost: Cost,
    hunting: bool,
    collect_pool: bool,
) -> Result<Scan> {
    mv.bind(current);
    let mut chosen: Option<Candidate> = None;
    let mut pool = Vec::new();
    let mut step = 0;
    while mv.has_next()? {
        mv.advance()?;
        if let Some(signature) = mv.signature()? {
            let is_tabu = tabu.is_tabu(&signature);
            let cost = mv.current_cost()?;
            let feasible = mv.current_feasible()?;
            let candidate = Candidate {
                step,
                cost,
                feasible,
                signature,
                aspiration: is_tabu && feasible && cost < best_cost,
            };
            let admissible = !is_tabu || candidate.aspiration;
            if admissible && chosen.map_or(true, |c| candidate.beats(&c, hunting)) {
                chosen = Some(candidate);
            }
            if collect_pool && !is_tabu {
                pool.push(candidate);
            }
        }
        step += 1;
    }
    Ok(Scan { chosen, pool })
}

/// Draws an escape candidate, weight `1 / (1 + cost - min_cost)`.
///
/// While hunting, only feasible candidates are drawn when there are any.
fn escape_pick<R: Rng>(pool: &[Candidate], hunting: bool, rng: &mut R) -> Option<Candidate> {
    let feasible_only = hunting && pool.iter().any(|c| c.feasible);
    let eligible: Vec<&Candidate> = pool
        .iter()
        .filter(|c| !feasible_only || c.feasible)
        .collect();
    let min = eligible.iter().map(|c| c.cost).min()?;
    let weights: Vec<f64> = eligible
        .iter()
        .map(|c| 1.0 / (1.0 + (c.cost - min) as f64))
        .collect();
    let dist = WeightedIndex::new(&weights).ok()?;
    Some(*eligible[dist.sample(rng)])
}

/// Tabu Search sampling one move kind per iteration.
///
/// The search owns its random generator and tabu list; the list is cleared
/// at the start of every [`find_local_optimum`](LocalSearch::find_local_optimum)
/// call while the generator keeps its stream.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_cvrp::local_search::{LocalSearch, TabuConfig, TabuSearch};
/// use u_cvrp::models::{Client, Solution, Specification};
/// use u_cvrp::moves::MoveKind;
///
/// let spec = Arc::new(Specification::new(
///     vec![Client::new(0, 0, 0), Client::new(5, 0, 1), Client::new(-5, 0, 1), Client::new(6, 1, 1)],
///     0, 2, 2,
/// ).unwrap());
/// let base = Solution::from_routes(spec, &[vec![1, 2], vec![3]]).unwrap();
///
/// let config = TabuConfig::default().with_max_iterations(50).with_seed(3);
/// let mut tabu = TabuSearch::new(&MoveKind::ALL, config).unwrap();
/// let best = tabu.find_local_optimum(&base).unwrap();
/// assert!(best.is_feasible());
/// assert!(best.total_distance() < base.total_distance());
/// ```
pub struct TabuSearch {
    moves: Vec<Box<dyn Move>>,
    config: TabuConfig,
    rng: StdRng,
    tabu: TabuList,
    trace: Vec<TabuStep>,
}

impl TabuSearch {
    /// Creates a Tabu Search over `kinds`.
    ///
    /// Fails with [`SearchError::EmptyMoveList`] when `kinds` is empty and
    /// with [`SearchError::InvalidArgument`] when `config` is invalid.
    pub fn new(kinds: &[MoveKind], config: TabuConfig) -> Result<Self> {
        Self::with_moves(instantiate_all(kinds), config)
    }

    /// Creates a Tabu Search over existing cursors.
    pub fn with_moves(moves: Vec<Box<dyn Move>>, config: TabuConfig) -> Result<Self> {
        config.validate()?;
        if moves.is_empty() {
            return Err(SearchError::EmptyMoveList);
        }
        let rng = create_rng(config.seed);
        Ok(Self {
            moves,
            config,
            rng,
            tabu: TabuList::new(),
            trace: Vec::new(),
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &TabuConfig {
        &self.config
    }

    /// Moves accepted during the last run, in order.
    pub fn trace(&self) -> &[TabuStep] {
        &self.trace
    }

    /// Tabu memory as left by the last run.
    pub fn tabu_list(&self) -> &TabuList {
        &self.tabu
    }
}

impl LocalSearch for TabuSearch {
    fn name(&self) -> &'static str {
        "tabu"
    }

    fn find_local_optimum(&mut self, base: &Solution) -> Result<Solution> {
        require_feasible(base, "tabu search")?;

        self.tabu.clear();
        self.trace.clear();

        let mut current = base.clone();
        let mut best = base.clone();
        let mut since_improvement = 0;
        let mut stagnation = 0;

        for iteration in 0..self.config.max_iterations {
            let hunting = !current.is_feasible();
            let escaping = stagnation >= self.config.stagnation_limit;
            let best_cost = best.total_distance();

            // the sampled kind first, then the others in order
            let first = self.rng.random_range(0..self.moves.len());
            let mut selected = None;
            for offset in 0..self.moves.len() {
                let k = (first + offset) % self.moves.len();
                let mv = self.moves[k].as_mut();
                let found = scan(mv, &current, &self.tabu, best_cost, hunting, escaping)?;
                if let Some(chosen) = found.chosen {
                    selected = Some((k, chosen, found.pool));
                    break;
                }
            }
            let (k, chosen, pool) = match selected {
                Some(found) => found,
                None => {
                    debug!(iteration, "tabu search has no selectable move");
                    break;
                }
            };
            let kind = self.moves[k].kind();

            let mut accepted = chosen;
            let mut escaped = false;
            if escaping {
                if let Some(pick) = escape_pick(&pool, hunting, &mut self.rng) {
                    trace!(iteration, cost = pick.cost, "tabu search escapes stagnation");
                    accepted = pick;
                    escaped = true;
                }
            }

            current = neighbor_at(self.moves[k].as_mut(), &current, accepted.step)?;
            let improved = current.is_feasible() && current.total_distance() < best_cost;
            if improved {
                debug!(
                    iteration,
                    %kind,
                    distance = current.total_distance(),
                    "tabu search found a new best"
                );
                best = current.clone();
            }
            self.trace.push(TabuStep {
                iteration,
                kind,
                signature: accepted.signature,
                cost: accepted.cost,
                feasible: accepted.feasible,
                aspiration: accepted.aspiration,
                escape: escaped,
            });

            self.tabu.tick();
            self.tabu.insert(accepted.signature, self.config.tenure);

            if improved {
                since_improvement = 0;
                stagnation = 0;
            } else {
                since_improvement += 1;
                stagnation = if escaped { 0 } else { stagnation + 1 };
            }
            if since_improvement >= self.config.max_iterations_without_improvement {
                break;
            }
        }

        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::constructive::nearest_neighbor;
    use crate::models::{Client, Specification};
    use crate::random::create_rng;
    use crate::test_utils::{random_spec, small_spec, solution};

    fn candidate(step: usize, cost: Cost, feasible: bool) -> Candidate {
        Candidate {
            step,
            cost,
            feasible,
            signature: MoveSignature::new(step + 1, step + 2),
            aspiration: false,
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(TabuConfig::default().validate().is_ok());
        let bad = TabuConfig::default().with_stagnation_limit(0);
        assert!(bad.validate().is_err_and(|e| e.is_invalid_argument()));
        let bad = TabuConfig::default().with_max_iterations(0);
        assert!(matches!(
            TabuSearch::new(&MoveKind::ALL, bad),
            Err(SearchError::InvalidArgument {
                name: "max_iterations",
                ..
            })
        ));
    }

    #[test]
    fn test_empty_move_list() {
        assert!(matches!(
            TabuSearch::new(&[], TabuConfig::default()),
            Err(SearchError::EmptyMoveList)
        ));
    }

    #[test]
    fn test_tabu_list_countdown() {
        let mut list = TabuList::new();
        let a = MoveSignature::new(1, 2);
        let b = MoveSignature::new(3, 4);
        list.insert(a, 3);
        list.insert(b, 1);
        assert_eq!(list.len(), 2);
        assert_eq!(list.remaining(&a), 3);

        list.tick();
        assert_eq!(list.remaining(&a), 2);
        assert!(!list.is_tabu(&b));
        assert_eq!(list.len(), 1);

        list.tick();
        list.tick();
        assert!(list.is_empty());
    }

    #[test]
    fn test_tabu_list_zero_tenure_is_noop() {
        let mut list = TabuList::new();
        list.insert(MoveSignature::new(1, 2), 0);
        assert!(list.is_empty());
    }

    #[test]
    fn test_rejects_infeasible_base() {
        let spec = small_spec();
        let overloaded = solution(&spec, &[&[1, 2, 3, 4, 5, 6, 7, 8]]);
        let mut tabu = TabuSearch::new(&MoveKind::ALL, TabuConfig::default()).expect("valid");
        assert_eq!(
            tabu.find_local_optimum(&overloaded),
            Err(SearchError::InfeasibleSolution("tabu search"))
        );
    }

    #[test]
    fn test_returns_feasible_best() {
        let spec = small_spec();
        let base = solution(&spec, &[&[1, 3, 2, 4], &[5, 7, 8], &[6]]);
        let config = TabuConfig::default()
            .with_max_iterations(300)
            .with_stagnation_limit(10)
            .with_seed(42);
        let mut tabu = TabuSearch::new(&MoveKind::ALL, config).expect("valid");
        let best = tabu.find_local_optimum(&base).expect("feasible base");
        assert!(best.is_feasible());
        assert!(best.is_complete());
        assert!(best.total_distance() < base.total_distance());
        assert!(!tabu.trace().is_empty());
    }

    #[test]
    fn test_no_signature_repeated_within_tenure() {
        let mut rng = create_rng(Some(9));
        let tenure = 5;
        for _ in 0..5 {
            let spec = random_spec(&mut rng, 12, 25);
            let base = nearest_neighbor(&spec);
            let config = TabuConfig::default()
                .with_tenure(tenure)
                .with_max_iterations(200)
                .with_stagnation_limit(15)
                .with_seed(rng.random());
            let mut tabu = TabuSearch::new(&MoveKind::ALL, config).expect("valid");
            tabu.find_local_optimum(&base).expect("feasible base");

            let steps = tabu.trace();
            for (k, later) in steps.iter().enumerate() {
                if later.aspiration {
                    continue;
                }
                for earlier in &steps[..k] {
                    if earlier.signature == later.signature {
                        assert!(
                            later.iteration - earlier.iteration > tenure,
                            "{:?} repeated after {} iterations",
                            later.signature,
                            later.iteration - earlier.iteration
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_trajectory() {
        let spec = small_spec();
        let base = solution(&spec, &[&[1, 3, 2, 4], &[5, 7, 8], &[6]]);
        let config = TabuConfig::default().with_max_iterations(100).with_seed(7);
        let mut a = TabuSearch::new(&MoveKind::ALL, config.clone()).expect("valid");
        let mut b = TabuSearch::new(&MoveKind::ALL, config).expect("valid");
        let best_a = a.find_local_optimum(&base).expect("feasible");
        let best_b = b.find_local_optimum(&base).expect("feasible");
        assert_eq!(best_a, best_b);
        assert_eq!(a.trace(), b.trace());
    }

    #[test]
    fn test_stops_without_neighbors() {
        let spec = small_spec();
        // a single one-client route has no intraroute neighbour at all
        let lonely = solution(&spec, &[&[1]]);
        let kinds = [MoveKind::IntrarouteSwap, MoveKind::TwoOpt];
        let mut tabu = TabuSearch::new(&kinds, TabuConfig::default()).expect("valid");
        let best = tabu.find_local_optimum(&lonely).expect("feasible");
        assert_eq!(best, lonely);
        assert!(tabu.trace().is_empty());
    }

    #[test]
    fn test_stops_when_every_move_is_tabu() {
        let spec = small_spec();
        // the only neighbour of [1, 2] is the swap back, which is never a new best
        let base = solution(&spec, &[&[1, 2]]);
        let config = TabuConfig::default()
            .with_tenure(1000)
            .with_max_iterations(5000)
            .with_max_iterations_without_improvement(5000)
            .with_stagnation_limit(5000)
            .with_seed(1);
        let mut tabu = TabuSearch::new(&[MoveKind::IntrarouteSwap], config).expect("valid");
        let best = tabu.find_local_optimum(&base).expect("feasible");

        assert_eq!(best, base);
        assert_eq!(tabu.trace().len(), 1);
        assert_eq!(tabu.trace()[0].iteration, 0);
        // no later iteration aged the list
        let swap = MoveSignature::new(1, 2);
        assert_eq!(tabu.tabu_list().remaining(&swap), 1000);
    }

    #[test]
    fn test_candidate_ranking() {
        let cheap_infeasible = candidate(0, 10, false);
        let dear_feasible = candidate(1, 50, true);
        assert!(cheap_infeasible.beats(&dear_feasible, false));
        assert!(!dear_feasible.beats(&cheap_infeasible, false));
        assert!(dear_feasible.beats(&cheap_infeasible, true));
        assert!(!cheap_infeasible.beats(&dear_feasible, true));

        // equal feasibility falls back to cost, ties keep the incumbent
        assert!(candidate(2, 5, true).beats(&dear_feasible, true));
        assert!(!candidate(3, 50, true).beats(&dear_feasible, true));
    }

    #[test]
    fn test_aspiration_admits_tabu_new_best() {
        let mut rng = create_rng(Some(12));
        let spec = random_spec(&mut rng, 10, 1000);
        let base = nearest_neighbor(&spec);
        let mut mv = MoveKind::IntrarouteSwap.instantiate();

        let open = scan(mv.as_mut(), &base, &TabuList::new(), Cost::MAX, false, false)
            .expect("bound")
            .chosen
            .expect("has neighbours");
        assert!(open.feasible);
        assert!(!open.aspiration);

        let mut list = TabuList::new();
        list.insert(open.signature, 5);

        let aspiring = scan(mv.as_mut(), &base, &list, open.cost + 1, false, true).expect("bound");
        let chosen = aspiring.chosen.expect("admissible");
        assert_eq!(chosen.signature, open.signature);
        assert_eq!(chosen.cost, open.cost);
        assert!(chosen.aspiration);
        // ten clients on one route give 45 swaps, one of them tabu
        assert_eq!(aspiring.pool.len(), 44);
        assert!(aspiring.pool.iter().all(|c| c.signature != open.signature));

        let blocked = scan(mv.as_mut(), &base, &list, open.cost, false, false)
            .expect("bound")
            .chosen
            .expect("other swaps stay admissible");
        assert_ne!(blocked.signature, open.signature);
        assert!(!blocked.aspiration);
    }

    #[test]
    fn test_hunting_prefers_feasible_neighbor() {
        let clients = vec![
            Client::new(0, 0, 0),
            Client::new(10, 0, 2),
            Client::new(11, 0, 2),
            Client::new(-10, 0, 1),
        ];
        let spec = Arc::new(Specification::new(clients, 0, 3, 1).expect("valid"));
        // route 0 carries 4 of 3
        let overloaded = solution(&spec, &[&[1, 2], &[3]]);
        let mut mv = MoveKind::Relocation.instantiate();
        let empty = TabuList::new();

        // pulling 3 into route 0 costs 42 but stays overloaded
        let greedy = scan(mv.as_mut(), &overloaded, &empty, Cost::MAX, false, false)
            .expect("bound")
            .chosen
            .expect("has neighbours");
        assert_eq!(greedy.cost, 42);
        assert!(!greedy.feasible);

        // moving 1 or 2 out costs 62 and repairs the load
        let hunted = scan(mv.as_mut(), &overloaded, &empty, Cost::MAX, true, false)
            .expect("bound")
            .chosen
            .expect("has neighbours");
        assert_eq!(hunted.cost, 62);
        assert!(hunted.feasible);
    }

    #[test]
    fn test_escape_pick() {
        let mut rng = create_rng(Some(5));
        assert!(escape_pick(&[], false, &mut rng).is_none());

        let pool = [
            candidate(0, 10, false),
            candidate(1, 10, true),
            candidate(2, 900, true),
        ];
        for _ in 0..100 {
            let pick = escape_pick(&pool, true, &mut rng).expect("non-empty pool");
            assert!(pick.feasible);
        }
        let dear = (0..1000)
            .filter(|_| escape_pick(&pool, false, &mut rng).map(|c| c.step) == Some(2))
            .count();
        assert!(dear < 50, "expensive candidate drawn {dear} times");
    }

    #[test]
    fn test_escape_after_stagnation() {
        let spec = small_spec();
        let base = solution(&spec, &[&[1, 2, 3]]);
        let config = TabuConfig::default()
            .with_tenure(1)
            .with_stagnation_limit(1)
            .with_max_iterations(50)
            .with_max_iterations_without_improvement(50)
            .with_seed(3);
        let mut tabu = TabuSearch::new(&[MoveKind::IntrarouteSwap], config).expect("valid");
        tabu.find_local_optimum(&base).expect("feasible");

        let steps = tabu.trace();
        assert!(steps.iter().any(|s| s.escape));
        for pair in steps.windows(2) {
            let (before, escape) = (pair[0], pair[1]);
            if escape.escape {
                assert!(!escape.aspiration);
                // with tenure 1 only the previous move is tabu
                assert_ne!(escape.signature, before.signature);
            }
        }
    }
}
