//! Distance matrix over truncated Euclidean distances.

mod matrix;

pub use matrix::{Cost, DistanceMatrix};
