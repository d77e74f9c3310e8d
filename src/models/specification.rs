//! Immutable problem description.

use serde::{Deserialize, Serialize};

use super::Client;
use crate::distance::{Cost, DistanceMatrix};
use crate::error::{Result, SearchError};

/// A capacitated vehicle routing instance.
///
/// Clients are indexed by their position in the list; one of them is the
/// depot. The full distance matrix is computed on construction, so a
/// specification is meant to be built once and shared (usually behind an
/// [`Arc`](std::sync::Arc)) by every solution of a run.
///
/// # Examples
///
/// ```
/// use u_cvrp::models::{Client, Specification};
///
/// let spec = Specification::new(
///     vec![Client::new(0, 0, 0), Client::new(3, 4, 1), Client::new(4, 3, 1)],
///     0,
///     100,
///     1,
/// )
/// .unwrap();
/// assert_eq!(spec.num_clients(), 2);
/// assert_eq!(spec.distance(1, 2), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "SpecificationData", into = "SpecificationData")]
pub struct Specification {
    clients: Vec<Client>,
    depot_id: usize,
    capacity: i32,
    min_vehicles: usize,
    distances: DistanceMatrix,
}

/// Wire form of a [`Specification`], without the derived matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SpecificationData {
    clients: Vec<Client>,
    depot_id: usize,
    capacity: i32,
    min_vehicles: usize,
}

impl Specification {
    /// Creates and validates a specification.
    ///
    /// Fails with [`SearchError::InvalidSpecification`] when there are no
    /// clients, the depot id is out of range, the capacity is not positive,
    /// or some client's demand is negative or larger than the capacity.
    pub fn new(
        clients: Vec<Client>,
        depot_id: usize,
        capacity: i32,
        min_vehicles: usize,
    ) -> Result<Self> {
        if clients.is_empty() {
            return Err(SearchError::InvalidSpecification("at least the depot is required".into()));
        }
        if depot_id >= clients.len() {
            return Err(SearchError::InvalidSpecification(format!(
                "depot id {depot_id} out of range for {} clients",
                clients.len()
            )));
        }
        if capacity <= 0 {
            return Err(SearchError::InvalidSpecification(format!(
                "capacity must be positive, got {capacity}"
            )));
        }
        for (id, client) in clients.iter().enumerate() {
            if id != depot_id && !(0..=capacity).contains(&client.demand()) {
                return Err(SearchError::InvalidSpecification(format!(
                    "client {id} has demand {} outside 0..={capacity}",
                    client.demand()
                )));
            }
        }

        let distances = DistanceMatrix::from_clients(&clients);
        Ok(Self {
            clients,
            depot_id,
            capacity,
            min_vehicles,
            distances,
        })
    }

    /// All nodes, depot included.
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// Id of the depot node.
    pub fn depot_id(&self) -> usize {
        self.depot_id
    }

    /// Capacity of every vehicle.
    pub fn capacity(&self) -> i32 {
        self.capacity
    }

    /// Minimum number of routes a constructed solution carries.
    pub fn min_vehicles(&self) -> usize {
        self.min_vehicles
    }

    /// Number of nodes including the depot.
    pub fn num_nodes(&self) -> usize {
        self.clients.len()
    }

    /// Number of clients to serve (depot excluded).
    pub fn num_clients(&self) -> usize {
        self.clients.len() - 1
    }

    /// Ids of every node except the depot, in ascending order.
    pub fn client_ids(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.clients.len()).filter(move |&id| id != self.depot_id)
    }

    /// Demand of node `id`.
    #[inline]
    pub fn demand(&self, id: usize) -> i32 {
        self.clients[id].demand()
    }

    /// Truncated Euclidean distance between two nodes.
    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> Cost {
        self.distances.get(from, to)
    }

    /// The precomputed distance matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Sum of all client demands.
    pub fn total_demand(&self) -> i64 {
        self.client_ids().map(|id| i64::from(self.demand(id))).sum()
    }
}

impl TryFrom<SpecificationData> for Specification {
    type Error = SearchError;

    fn try_from(data: SpecificationData) -> Result<Self> {
        Self::new(data.clients, data.depot_id, data.capacity, data.min_vehicles)
    }
}

impl From<Specification> for SpecificationData {
    fn from(spec: Specification) -> Self {
        Self {
            clients: spec.clients,
            depot_id: spec.depot_id,
            capacity: spec.capacity,
            min_vehicles: spec.min_vehicles,
        }
    }
}
