//! Domain model types for capacitated vehicle routing.
//!
//! Provides the immutable problem description (clients with demands, a
//! depot and a vehicle capacity) and the flat route codification that every
//! move and search strategy operates on.

mod client;
mod solution;
mod specification;

pub use client::Client;
pub use solution::{Solution, SEPARATOR};
pub use specification::Specification;
