//! Belief tracking for the hidden mover's possible positions.
//!
//! This module is composed of:
//! - `tree`: the belief DAG (`BeliefTree`, `BeliefNode`) with its two
//!   mutating operations, frontier expansion and result-driven pruning.
//! - `result`: the `InvestigatorResult` input shape reported by seekers.
//! - `snapshot`: serde snapshot of a tree for diagnostics and saves.

mod result;
mod snapshot;
mod tree;

pub use result::{ClueAnswer, InvestigatorResult};
pub use snapshot::{BeliefSnapshot, SnapshotError};
pub use tree::{BeliefNode, BeliefTree};
