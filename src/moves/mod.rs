//! Neighbourhood enumeration with incremental cost and feasibility.
//!
//! A [`Move`] is a restartable, forward-only cursor over the neighbourhood
//! of one bound [`Solution`]. Advancing the cursor evaluates the next
//! neighbour from the edges it touches only; nothing is materialized until
//! [`Move::materialize`] is called.
//!
//! - [`IntrarouteSwap`] — exchange two clients of the same route
//! - [`InterrouteSwap`] — exchange two clients of different routes
//! - [`Relocation`] — move one client into another route
//! - [`TwoOpt`] — reverse a segment of a route
//!
//! Every kind is a [`MoveCursor`] over a [`Neighborhood`] implementation.

mod interroute_swap;
mod intraroute_swap;
mod relocation;
mod two_opt;


use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::distance::Cost;
use crate::error::{Result, SearchError};
use crate::models::Solution;

pub use interroute_swap::{InterrouteSwap, InterrouteSwapNeighborhood, InterrouteSwapPosition};
pub use intraroute_swap::{IntrarouteSwap, IntrarouteSwapNeighborhood, IntrarouteSwapPosition};
pub use relocation::{Relocation, RelocationNeighborhood, RelocationPosition};
pub use two_opt::{TwoOpt, TwoOptNeighborhood, TwoOptPosition};

/// Identity of a move for tabu bookkeeping: the unordered pair of nodes it touches.
///
/// Positions and routes are deliberately not part of the key.
///
/// # Examples
///
/// ```
/// use u_cvrp::moves::MoveSignature;
///
/// assert_eq!(MoveSignature::new(7, 3), MoveSignature::new(3, 7));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MoveSignature {
    low: usize,
    high: usize,
}

impl MoveSignature {
    /// Creates the signature of a move touching `a` and `b`, in any order.
    pub fn new(a: usize, b: usize) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    /// The two nodes, smallest first.
    pub fn nodes(&self) -> (usize, usize) {
        (self.low, self.high)
    }
}

/// The four move kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveKind {
    /// Exchange two clients of the same route.
    IntrarouteSwap,
    /// Exchange two clients of different routes.
    InterrouteSwap,
    /// Move one client into a different route.
    Relocation,
    /// Reverse a segment of one route.
    TwoOpt,
}

impl MoveKind {
    /// Every kind, in a fixed order.
    pub const ALL: [MoveKind; 4] = [
        MoveKind::IntrarouteSwap,
        MoveKind::InterrouteSwap,
        MoveKind::Relocation,
        MoveKind::TwoOpt,
    ];

    /// Creates a fresh, unbound cursor of this kind.
    pub fn instantiate(self) -> Box<dyn Move> {
        match self {
            MoveKind::IntrarouteSwap => Box::new(IntrarouteSwap::new()),
            MoveKind::InterrouteSwap => Box::new(InterrouteSwap::new()),
            MoveKind::Relocation => Box::new(Relocation::new()),
            MoveKind::TwoOpt => Box::new(TwoOpt::new()),
        }
    }

    /// Snake-case name, as used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            MoveKind::IntrarouteSwap => "intraroute_swap",
            MoveKind::InterrouteSwap => "interroute_swap",
            MoveKind::Relocation => "relocation",
            MoveKind::TwoOpt => "two_opt",
        }
    }
}

impl fmt::Display for MoveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MoveKind {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        MoveKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| SearchError::invalid_argument("move", format!("unknown move `{s}`")))
    }
}

/// Instantiates one cursor per kind.
pub fn instantiate_all(kinds: &[MoveKind]) -> Vec<Box<dyn Move>> {
    kinds.iter().map(|kind| kind.instantiate()).collect()
}

/// A stateful cursor over the neighbourhood of a bound solution.
///
/// Before the first [`advance`](Move::advance) and once the neighbourhood
/// is exhausted there is no current neighbour: the accessors then describe
/// the base solution itself. Every accessor fails with
/// [`SearchError::UnboundMove`] until [`bind`](Move::bind) is called.
pub trait Move: Send {
    /// Which kind of move this is.
    fn kind(&self) -> MoveKind;

    /// Binds the cursor to `solution` and rewinds it.
    fn bind(&mut self, solution: &Solution);

    /// The bound solution.
    fn base(&self) -> Result<&Solution>;

    /// `true` if another neighbour remains.
    fn has_next(&self) -> Result<bool>;

    /// Moves to the next neighbour, evaluating its cost and feasibility.
    ///
    /// Does nothing once the neighbourhood is exhausted.
    fn advance(&mut self) -> Result<()>;

    /// Total distance of the current neighbour.
    fn current_cost(&self) -> Result<Cost>;

    /// Whether the current neighbour respects every capacity.
    fn current_feasible(&self) -> Result<bool>;

    /// Builds the current neighbour.
    fn materialize(&self) -> Result<Solution>;

    /// Tabu key of the current neighbour, if any.
    fn signature(&self) -> Result<Option<MoveSignature>>;
}

/// Enumeration order and evaluation rules of one move kind.
///
/// Implementations are stateless; [`MoveCursor`] carries the state.
pub trait Neighborhood: Send {
    /// Identifies one neighbour of a solution.
    type Position: Copy + fmt::Debug + Send;

    /// Kind reported by the cursor.
    const KIND: MoveKind;

    /// First neighbour of `base`, if any.
    fn first(base: &Solution) -> Option<Self::Position>;

    /// Neighbour following `position`, if any.
    fn after(base: &Solution, position: Self::Position) -> Option<Self::Position>;

    /// Change of total distance, from the touched edges only.
    fn delta(base: &Solution, position: Self::Position) -> Cost;

    /// Feasibility of the neighbour, from the touched routes only.
    fn feasible(base: &Solution, position: Self::Position) -> bool;

    /// Codification of the neighbour.
    fn apply(base: &Solution, position: Self::Position) -> Vec<usize>;

    /// Tabu key of the neighbour.
    fn signature(base: &Solution, position: Self::Position) -> MoveSignature;
}

#[derive(Debug, Clone, Copy)]
struct Evaluated<P> {
    position: P,
    delta: Cost,
    feasible: bool,
}

/// Generic cursor driving a [`Neighborhood`].
#[derive(Debug)]
pub struct MoveCursor<N: Neighborhood> {
    base: Option<Solution>,
    next: Option<N::Position>,
    current: Option<Evaluated<N::Position>>,
}

impl<N: Neighborhood> MoveCursor<N> {
    /// Creates an unbound cursor.
    pub fn new() -> Self {
        Self {
            base: None,
            next: None,
            current: None,
        }
    }

    /// Position of the current neighbour, if any.
    pub fn current_position(&self) -> Option<N::Position> {
        self.current.map(|c| c.position)
    }

    fn bound(&self) -> Result<&Solution> {
        self.base.as_ref().ok_or(SearchError::UnboundMove)
    }
}

impl<N: Neighborhood> Default for MoveCursor<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Neighborhood> Move for MoveCursor<N> {
    fn kind(&self) -> MoveKind {
        N::KIND
    }

    fn bind(&mut self, solution: &Solution) {
        self.next = N::first(solution);
        self.current = None;
        self.base = Some(solution.clone());
    }

    fn base(&self) -> Result<&Solution> {
        self.bound()
    }

    fn has_next(&self) -> Result<bool> {
        self.bound()?;
        Ok(self.next.is_some())
    }

    fn advance(&mut self) -> Result<()> {
        let base = self.base.as_ref().ok_or(SearchError::UnboundMove)?;
        self.current = self.next.map(|position| Evaluated {
            position,
            delta: N::delta(base, position),
            feasible: N::feasible(base, position),
        });
        self.next = self.next.and_then(|position| N::after(base, position));
        Ok(())
    }

    fn current_cost(&self) -> Result<Cost> {
        let base = self.bound()?;
        Ok(base.total_distance() + self.current.map_or(0, |c| c.delta))
    }

    fn current_feasible(&self) -> Result<bool> {
        let base = self.bound()?;
        Ok(self.current.map_or(base.is_feasible(), |c| c.feasible))
    }

    fn materialize(&self) -> Result<Solution> {
        let base = self.bound()?;
        Ok(match self.current {
            Some(c) => Solution::from_codification(
                std::sync::Arc::clone(base.spec()),
                N::apply(base, c.position),
            ),
            None => base.clone(),
        })
    }

    fn signature(&self) -> Result<Option<MoveSignature>> {
        let base = self.bound()?;
        Ok(self.current.map(|c| N::signature(base, c.position)))
    }
}

/// Rebinds `mv` to `base` and materializes its neighbour number `step` (zero based).
///
/// Lets a strategy scan with cheap deltas, remember the step it liked and
/// build only that neighbour. The cursor is left on the replayed neighbour,
/// so [`Move::signature`] describes it.
pub fn neighbor_at(mv: &mut dyn Move, base: &Solution, step: usize) -> Result<Solution> {
    mv.bind(base);
    for _ in 0..=step {
        mv.advance()?;
    }
    mv.materialize()
}

/// Draws a feasible neighbour of `base` uniformly at random.
///
/// Scans the whole neighbourhood once (reservoir sampling) and returns
/// `None` when no neighbour is feasible.
pub fn random_feasible_neighbor<R: Rng>(
    mv: &mut dyn Move,
    base: &Solution,
    rng: &mut R,
) -> Result<Option<Solution>> {
    mv.bind(base);
    let mut chosen = None;
    let mut seen = 0usize;
    let mut step = 0usize;
    while mv.has_next()? {
        mv.advance()?;
        if mv.current_feasible()? {
            seen += 1;
            if rng.random_range(0..seen) == 0 {
                chosen = Some(step);
            }
        }
        step += 1;
    }
    chosen.map(|step| neighbor_at(mv, base, step)).transpose()
}

/// Index of the first route at or after `from` holding at least `min_len` clients.
pub(crate) fn route_with_at_least(base: &Solution, from: usize, min_len: usize) -> Option<usize> {
    (from..base.num_routes()).find(|&r| base.route_len(r) >= min_len)
}

/// `true` if every route other than `a` and `b` is within capacity.
///
/// Uses the infeasible-route count derived on construction, so the check
/// is constant time whatever the number of routes.
pub(crate) fn untouched_routes_feasible(base: &Solution, a: usize, b: usize) -> bool {
    let touched_infeasible = [a, b]
        .iter()
        .filter(|&&r| base.remaining_capacity(r) < 0)
        .count();
    base.infeasible_routes() == touched_infeasible
}
