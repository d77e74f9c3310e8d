//! Error type shared by every search component.

use thiserror::Error;

/// Errors raised by specifications, solutions, moves and search strategies.
///
/// Variants fall into two families: invalid arguments (bad configuration or
/// input data, see [`SearchError::is_invalid_argument`]) and illegal states
/// (an operation called at the wrong time or on an unsuitable solution, see
/// [`SearchError::is_illegal_state`]).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// A tunable parameter is out of its valid range.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// Parameter name.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// A strategy was configured without any move.
    #[error("invalid argument: the move list is empty")]
    EmptyMoveList,

    /// The problem description violates its invariants.
    #[error("invalid specification: {0}")]
    InvalidSpecification(String),

    /// A codification cannot be turned into a solution.
    #[error("invalid codification: {0}")]
    InvalidCodification(String),

    /// A move accessor was called before any solution was bound.
    #[error("illegal state: no solution is bound to the move")]
    UnboundMove,

    /// A feasible solution was required.
    #[error("illegal state: {0} requires a feasible solution")]
    InfeasibleSolution(&'static str),
}

impl SearchError {
    /// Shorthand for [`SearchError::InvalidArgument`].
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }

    /// Returns `true` for configuration and input-data errors.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Self::InvalidArgument { .. }
                | Self::EmptyMoveList
                | Self::InvalidSpecification(_)
                | Self::InvalidCodification(_)
        )
    }

    /// Returns `true` for errors caused by calling an operation in the wrong state.
    pub fn is_illegal_state(&self) -> bool {
        matches!(self, Self::UnboundMove | Self::InfeasibleSolution(_))
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, SearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(SearchError::EmptyMoveList.is_invalid_argument());
        assert!(SearchError::invalid_argument("rcl_size", "must be >= 1").is_invalid_argument());
        assert!(SearchError::UnboundMove.is_illegal_state());
        assert!(SearchError::InfeasibleSolution("lns").is_illegal_state());
        assert!(!SearchError::UnboundMove.is_invalid_argument());
    }

    #[test]
    fn test_display() {
        let err = SearchError::invalid_argument("max_iterations", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid argument `max_iterations`: must be at least 1"
        );
        assert_eq!(
            SearchError::InfeasibleSolution("tabu search").to_string(),
            "illegal state: tabu search requires a feasible solution"
        );
    }
}
