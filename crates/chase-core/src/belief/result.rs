use crate::board::LocationId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-location answer to a clue search.
///
/// `Yes` means a clue was found: under the game rules, proof the hider is
/// not currently at that location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClueAnswer {
    Yes,
    No,
}

impl ClueAnswer {
    pub fn is_yes(self) -> bool {
        matches!(self, ClueAnswer::Yes)
    }
}

/// Resolved outcome of one seeker action.
///
/// Closed set: the belief tree matches exhaustively, so introducing a new
/// kind of action is a compile-time-visible change for every consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvestigatorResult {
    /// Clue searches resolved this turn, one answer per probed location.
    Search {
        answers: HashMap<LocationId, ClueAnswer>,
    },
    /// A capture attempt at one location; `success` means the location was
    /// conclusively cleared.
    Capture { location: LocationId, success: bool },
}

impl InvestigatorResult {
    /// Convenience constructor for a single-location search.
    pub fn single_search(location: impl Into<LocationId>, answer: ClueAnswer) -> Self {
        let mut answers = HashMap::new();
        answers.insert(location.into(), answer);
        InvestigatorResult::Search { answers }
    }

    pub fn capture(location: impl Into<LocationId>, success: bool) -> Self {
        InvestigatorResult::Capture {
            location: location.into(),
            success,
        }
    }
}
