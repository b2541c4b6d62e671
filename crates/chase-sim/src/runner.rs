use std::collections::HashMap;
use std::fmt;

use chase_core::belief::{BeliefTree, ClueAnswer, InvestigatorResult};
use chase_core::board::{AdjacencyBoard, BoardTopology, LocationId, MoveConstraints, TopologyError};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use thiserror::Error;
use tracing::{Level, event};

use crate::config::ScenarioConfig;

/// Replays one seeded hunt against the belief tracker.
///
/// Each turn: seekers man random posts (those junctions become impassable),
/// the hider takes a random legal step, the tree expands under the same
/// constraints, and the seekers probe frontier junctions. A probe away from
/// the hider turns up a clue — proof of absence — and prunes the tree; once
/// the frontier narrows to a single junction the seekers attempt a capture.
pub struct HuntRunner {
    config: ScenarioConfig,
    board: AdjacencyBoard,
}

/// How a hunt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuntOutcome {
    /// The seekers took the hider at the only remaining junction.
    Captured,
    /// The hider had no legal move left.
    Cornered,
    /// The turn budget ran out with the hider still loose.
    Evaded,
    /// Every tracked position was eliminated; the belief went cold.
    TrailLost,
}

impl fmt::Display for HuntOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HuntOutcome::Captured => write!(f, "captured"),
            HuntOutcome::Cornered => write!(f, "cornered"),
            HuntOutcome::Evaded => write!(f, "evaded"),
            HuntOutcome::TrailLost => write!(f, "trail lost"),
        }
    }
}

/// Summary details returned after a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub turns_played: usize,
    pub outcome: HuntOutcome,
    pub final_frontier: usize,
    pub tracked_locations: usize,
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("hider start {0} is not on the board")]
    StartOffBoard(LocationId),
    #[error("board query failed: {0}")]
    Topology(#[from] TopologyError),
}

impl HuntRunner {
    /// Build a runner from a validated scenario.
    pub fn new(config: ScenarioConfig) -> Result<Self, RunnerError> {
        let board = config.board.build();
        let start = config.hunt.start_location();
        if !board.contains(&start) {
            return Err(RunnerError::StartOffBoard(start));
        }
        Ok(Self { config, board })
    }

    /// Execute the hunt until capture, a cornered hider, a cold trail, or
    /// the turn budget.
    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        let mut rng = StdRng::seed_from_u64(self.config.hunt.seed.unwrap_or(0));
        let start = self.config.hunt.start_location();
        let mut tree = BeliefTree::new(start.clone());
        let mut hider = start;

        // Sorted so seeded runs are reproducible regardless of map order.
        let mut all_locations: Vec<LocationId> = self.board.locations().cloned().collect();
        all_locations.sort();

        for turn in 1..=self.config.hunt.turns {
            let posts: Vec<LocationId> = all_locations
                .choose_multiple(&mut rng, self.config.seekers.count)
                .cloned()
                .collect();
            let constraints = MoveConstraints::blocking(posts);

            let mut options: Vec<LocationId> = self
                .board
                .neighbors(&hider, &constraints)?
                .into_iter()
                .collect();
            options.sort();
            let Some(next) = options.choose(&mut rng).cloned() else {
                event!(Level::INFO, turn, at = %hider, "hider cornered");
                return Ok(self.summary(turn, HuntOutcome::Cornered, &tree));
            };
            hider = next;

            tree.expand(&self.board, &constraints)?;
            if !tree.frontier().contains(&hider) {
                event!(Level::DEBUG, turn, "hider slipped outside the tracked frontier");
            }

            let mut frontier: Vec<LocationId> = tree.frontier().into_iter().collect();
            frontier.sort();
            if frontier.is_empty() {
                return Ok(self.summary(turn, HuntOutcome::TrailLost, &tree));
            }

            let answers: HashMap<LocationId, ClueAnswer> = frontier
                .choose_multiple(&mut rng, self.config.seekers.searches_per_turn)
                .cloned()
                .map(|location| {
                    let answer = if location == hider {
                        ClueAnswer::No
                    } else {
                        ClueAnswer::Yes
                    };
                    (location, answer)
                })
                .collect();
            tree.apply_result(&InvestigatorResult::Search { answers });

            let mut remaining: Vec<LocationId> = tree.frontier().into_iter().collect();
            remaining.sort();
            event!(
                Level::INFO,
                turn,
                frontier = remaining.len(),
                tracked = tree.node_count(),
                "turn resolved"
            );

            if remaining.len() == 1 {
                let target = remaining[0].clone();
                if resolve_capture(&mut tree, &target, &hider) {
                    event!(Level::INFO, turn, at = %target, "capture attempt succeeded");
                    return Ok(self.summary(turn, HuntOutcome::Captured, &tree));
                }
                event!(Level::DEBUG, turn, at = %target, "missed capture ruled out the junction");
                if tree.frontier().is_empty() {
                    return Ok(self.summary(turn, HuntOutcome::TrailLost, &tree));
                }
            }
        }

        Ok(self.summary(self.config.hunt.turns, HuntOutcome::Evaded, &tree))
    }

    fn summary(&self, turns_played: usize, outcome: HuntOutcome, tree: &BeliefTree) -> RunSummary {
        RunSummary {
            turns_played,
            outcome,
            final_frontier: tree.frontier().len(),
            tracked_locations: tree.node_count(),
        }
    }
}

/// Resolves a capture attempt at `target`. A hit ends the hunt; a miss only
/// proves the hider was elsewhere, so it is fed back as a `Yes` clue answer.
fn resolve_capture(tree: &mut BeliefTree, target: &LocationId, hider: &LocationId) -> bool {
    if target == hider {
        return true;
    }
    tree.apply_result(&InvestigatorResult::single_search(
        target.clone(),
        ClueAnswer::Yes,
    ));
    false
}
