//! Client (or depot) locations with demands.

use serde::{Deserialize, Serialize};

/// A node of the routing problem: integer coordinates plus a demand.
///
/// The depot is an ordinary client whose id is designated by the
/// [`Specification`](super::Specification); its demand is ignored.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Client;
///
/// let depot = Client::new(0, 0, 0);
/// let a = Client::new(3, 4, 1);
/// assert_eq!(depot.distance_to(&a), 5);
/// assert_eq!(a.demand(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Client {
    x: i32,
    y: i32,
    demand: i32,
}

impl Client {
    /// Creates a client at `(x, y)` with the given demand.
    pub fn new(x: i32, y: i32, demand: i32) -> Self {
        Self { x, y, demand }
    }

    /// X-coordinate.
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Y-coordinate.
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Units to deliver to this client.
    pub fn demand(&self) -> i32 {
        self.demand
    }

    /// Euclidean distance to another client, truncated towards zero.
    ///
    /// All costs in the crate are built from this metric so that
    /// incremental deltas and full recomputations agree exactly.
    pub fn distance_to(&self, other: &Client) -> i64 {
        // squared offsets of two i32 coordinates overflow i64
        let dx = i128::from(self.x) - i128::from(other.x);
        let dy = i128::from(self.y) - i128::from(other.y);
        ((dx * dx + dy * dy) as f64).sqrt() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_new() {
        let c = Client::new(10, 20, 5);
        assert_eq!(c.x(), 10);
        assert_eq!(c.y(), 20);
        assert_eq!(c.demand(), 5);
    }

    #[test]
    fn test_distance_exact() {
        let a = Client::new(0, 0, 0);
        let b = Client::new(3, 4, 0);
        assert_eq!(a.distance_to(&b), 5);
    }

    #[test]
    fn test_distance_truncated() {
        // sqrt(2) = 1.414.., sqrt(8) = 2.828..
        let a = Client::new(0, 0, 0);
        assert_eq!(a.distance_to(&Client::new(1, 1, 0)), 1);
        assert_eq!(a.distance_to(&Client::new(2, 2, 0)), 2);
        assert_eq!(a.distance_to(&Client::new(-2, -2, 0)), 2);
    }

    #[test]
    fn test_distance_symmetric() {
        let a = Client::new(1, 2, 0);
        let b = Client::new(4, 9, 0);
        assert_eq!(a.distance_to(&b), b.distance_to(&a));
        assert_eq!(a.distance_to(&a), 0);
    }

    #[test]
    fn test_distance_extreme_coordinates() {
        let low = Client::new(i32::MIN, i32::MIN, 0);
        let high = Client::new(i32::MAX, i32::MAX, 0);
        // (2^32 - 1) * sqrt(2) = 6074000998.53..
        assert_eq!(low.distance_to(&high), 6_074_000_998);
        assert_eq!(high.distance_to(&low), 6_074_000_998);
    }
}
