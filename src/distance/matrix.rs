//! Dense distance matrix.

use crate::models::Client;

/// Distance, cost and delta unit used throughout the crate.
pub type Cost = i64;

/// A dense n×n distance matrix stored in row-major order.
///
/// Built once per [`Specification`](crate::models::Specification) from the
/// truncated Euclidean metric of [`Client::distance_to`].
///
/// # Examples
///
/// ```
/// use u_cvrp::models::Client;
/// use u_cvrp::distance::DistanceMatrix;
///
/// let clients = vec![
///     Client::new(0, 0, 0),
///     Client::new(3, 4, 1),
///     Client::new(4, 3, 1),
/// ];
/// let dm = DistanceMatrix::from_clients(&clients);
/// assert_eq!(dm.get(0, 1), 5);
/// assert_eq!(dm.get(1, 2), 1);
/// assert_eq!(dm.size(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    data: Vec<Cost>,
    size: usize,
}

impl DistanceMatrix {
    /// Computes the matrix from client coordinates.
    pub fn from_clients(clients: &[Client]) -> Self {
        let n = clients.len();
        let mut data = vec![0; n * n];
        for i in 0..n {
            for j in (i + 1)..n {
                let d = clients[i].distance_to(&clients[j]);
                data[i * n + j] = d;
                data[j * n + i] = d;
            }
        }
        Self { data, size: n }
    }

    /// Returns the distance from node `from` to node `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of bounds.
    #[inline]
    pub fn get(&self, from: usize, to: usize) -> Cost {
        self.data[from * self.size + to]
    }

    /// Number of nodes in this matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the candidates ordered by distance from `from`, ties broken by id.
    pub fn sorted_by_distance(&self, from: usize, candidates: &[usize]) -> Vec<usize> {
        let mut sorted = candidates.to_vec();
        sorted.sort_by_key(|&c| (self.get(from, c), c));
        sorted
    }

    /// Returns the nearest of `candidates` to `from`, ties broken by id.
    ///
    /// Returns `None` if `candidates` is empty.
    pub fn nearest_neighbor(&self, from: usize, candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .min_by_key(|&c| (self.get(from, c), c))
    }
}
