use crate::board::location::LocationId;
use std::collections::HashSet;
use std::fmt;

/// Per-turn movement restrictions handed through to the board.
///
/// The belief tracker never interprets these; only `BoardTopology`
/// implementations do. Currently a restriction is a set of locations the
/// mover cannot enter (seeker-occupied junctions).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveConstraints {
    blocked: HashSet<LocationId>,
}

impl MoveConstraints {
    /// No restrictions: every adjacent location is enterable.
    pub fn none() -> Self {
        Self::default()
    }

    /// Restrictions blocking every location in `blocked`.
    pub fn blocking(blocked: impl IntoIterator<Item = LocationId>) -> Self {
        Self {
            blocked: blocked.into_iter().collect(),
        }
    }

    pub fn block(&mut self, location: LocationId) {
        self.blocked.insert(location);
    }

    pub fn is_blocked(&self, location: &LocationId) -> bool {
        self.blocked.contains(location)
    }

    pub fn blocked_count(&self) -> usize {
        self.blocked.len()
    }
}

/// Failure reported by a reachability query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// The queried source location is not part of the board.
    UnknownLocation(LocationId),
    /// The board rejected the supplied constraints.
    InvalidConstraints { reason: String },
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopologyError::UnknownLocation(location) => {
                write!(f, "location {location} is not on the board")
            }
            TopologyError::InvalidConstraints { reason } => {
                write!(f, "invalid movement constraints: {reason}")
            }
        }
    }
}

impl std::error::Error for TopologyError {}

/// One-move reachability oracle for a board.
///
/// Queries are pure and synchronous. An empty result is a normal outcome
/// (the mover is walled in), never an error.
pub trait BoardTopology {
    /// Locations reachable from `from` in a single move under `constraints`.
    fn neighbors(
        &self,
        from: &LocationId,
        constraints: &MoveConstraints,
    ) -> Result<HashSet<LocationId>, TopologyError>;
}
