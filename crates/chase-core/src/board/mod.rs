//! Board vocabulary and one-move reachability.
//!
//! This module is composed of:
//! - `location`: the `LocationId` label type shared by the board and the
//!   belief tracker.
//! - `topology`: the `BoardTopology` reachability trait plus the
//!   `MoveConstraints` passed through to it.
//! - `adjacency`: `AdjacencyBoard`, an undirected adjacency-map topology
//!   used by the harness and the tests.

mod adjacency;
mod location;
mod topology;

pub use adjacency::AdjacencyBoard;
pub use location::LocationId;
pub use topology::{BoardTopology, MoveConstraints, TopologyError};
