//! End-to-end hunts over a fragment of a real board, driven through the
//! public API the way a game loop would drive it.

use chase_core::belief::{BeliefSnapshot, BeliefTree, ClueAnswer, InvestigatorResult};
use chase_core::board::{AdjacencyBoard, LocationId, MoveConstraints};
use std::collections::{HashMap, HashSet};

/// The junction C27 and its nine neighbors, as printed on the board.
const C27_NEIGHBORS: [&str; 9] = [
    "C26", "C44", "C79", "C46", "C28", "C29", "C48", "C45", "C47",
];

fn east_end_board() -> AdjacencyBoard {
    let mut board = AdjacencyBoard::new();
    for neighbor in C27_NEIGHBORS {
        board.link(LocationId::from("C27"), LocationId::from(neighbor));
    }
    // A second ring so multi-turn hunts have somewhere to go.
    board.link(LocationId::from("C45"), LocationId::from("C63"));
    board.link(LocationId::from("C45"), LocationId::from("C64"));
    board.link(LocationId::from("C46"), LocationId::from("C64"));
    board.link(LocationId::from("C26"), LocationId::from("C25"));
    board
}

fn ids(labels: &[&str]) -> HashSet<LocationId> {
    labels.iter().map(|&label| LocationId::from(label)).collect()
}

#[test]
fn one_move_from_the_kill_spot_reaches_all_nine_neighbors() {
    let board = east_end_board();
    let mut tree = BeliefTree::new("C27");
    tree.expand(&board, &MoveConstraints::none()).unwrap();

    assert_eq!(tree.frontier(), ids(&C27_NEIGHBORS));
    assert!(tree.contains(&LocationId::from("C27")));
    assert!(!tree.frontier().contains(&LocationId::from("C27")));
}

#[test]
fn clue_at_c45_eliminates_it_and_spares_the_rest() {
    let board = east_end_board();
    let mut tree = BeliefTree::new("C27");
    tree.expand(&board, &MoveConstraints::none()).unwrap();

    tree.apply_result(&InvestigatorResult::single_search("C45", ClueAnswer::Yes));

    assert!(!tree.contains(&LocationId::from("C45")));
    assert!(!tree.frontier().contains(&LocationId::from("C45")));
    for neighbor in C27_NEIGHBORS {
        if neighbor == "C45" {
            continue;
        }
        assert!(tree.contains(&LocationId::from(neighbor)), "{neighbor} lost");
        assert!(tree.frontier().contains(&LocationId::from(neighbor)));
    }
}

#[test]
fn capture_attempt_at_an_untracked_circle_changes_nothing() {
    let board = east_end_board();
    let mut tree = BeliefTree::new("C27");
    tree.expand(&board, &MoveConstraints::none()).unwrap();
    let before = BeliefSnapshot::capture(&tree);

    tree.apply_result(&InvestigatorResult::capture("C62", true));

    assert_eq!(BeliefSnapshot::capture(&tree), before);
}

#[test]
fn second_turn_grows_the_second_ring_and_merges_shared_circles() {
    let board = east_end_board();
    let mut tree = BeliefTree::new("C27");
    tree.expand(&board, &MoveConstraints::none()).unwrap();
    let constraints = MoveConstraints::blocking([LocationId::from("C27")]);
    tree.expand(&board, &constraints).unwrap();

    // C64 is reachable from both C45 and C46 and must appear once.
    let frontier = tree.frontier();
    assert!(frontier.contains(&LocationId::from("C63")));
    assert!(frontier.contains(&LocationId::from("C64")));
    assert!(frontier.contains(&LocationId::from("C25")));
    assert_eq!(
        tree.edges()
            .filter(|(_, child)| *child == &LocationId::from("C64"))
            .count(),
        2
    );
}

#[test]
fn eliminating_one_approach_keeps_circles_reachable_the_other_way() {
    let board = east_end_board();
    let mut tree = BeliefTree::new("C27");
    tree.expand(&board, &MoveConstraints::none()).unwrap();
    tree.expand(&board, &MoveConstraints::blocking([LocationId::from("C27")]))
        .unwrap();

    // C45 falls, taking C63 with it; C64 survives through C46.
    tree.apply_result(&InvestigatorResult::single_search("C45", ClueAnswer::Yes));

    assert!(!tree.contains(&LocationId::from("C45")));
    assert!(!tree.contains(&LocationId::from("C63")));
    assert!(tree.contains(&LocationId::from("C64")));
    assert!(tree.frontier().contains(&LocationId::from("C64")));
}

#[test]
fn mixed_search_batch_applies_every_yes_answer() {
    let board = east_end_board();
    let mut tree = BeliefTree::new("C27");
    tree.expand(&board, &MoveConstraints::none()).unwrap();

    let mut answers = HashMap::new();
    answers.insert(LocationId::from("C44"), ClueAnswer::Yes);
    answers.insert(LocationId::from("C79"), ClueAnswer::Yes);
    answers.insert(LocationId::from("C28"), ClueAnswer::No);
    answers.insert(LocationId::from("C99"), ClueAnswer::Yes);
    tree.apply_result(&InvestigatorResult::Search { answers });

    assert!(!tree.contains(&LocationId::from("C44")));
    assert!(!tree.contains(&LocationId::from("C79")));
    assert!(tree.contains(&LocationId::from("C28")));
    assert_eq!(tree.frontier().len(), 7);
}

#[test]
fn frontier_tracks_a_hider_that_never_doubles_back() {
    let board = east_end_board();
    let mut tree = BeliefTree::new("C27");

    // C27 -> C45 -> C63 never revisits earlier ground, so every step of
    // the true walk must be among the possible positions.
    for step in ["C45", "C63"] {
        tree.expand(&board, &MoveConstraints::none()).unwrap();
        assert!(
            tree.frontier().contains(&LocationId::from(step)),
            "{step} should still be a possible position"
        );
    }
}

#[test]
fn hider_doubling_back_onto_its_path_leaves_the_frontier() {
    let board = east_end_board();
    let mut tree = BeliefTree::new("C27");

    // C27 -> C26 -> C27: the return step targets an ancestor, so the edge
    // is declined and the true position drops out of the frontier.
    tree.expand(&board, &MoveConstraints::none()).unwrap();
    assert!(tree.frontier().contains(&LocationId::from("C26")));

    tree.expand(&board, &MoveConstraints::none()).unwrap();
    assert!(!tree.frontier().contains(&LocationId::from("C27")));
    assert!(!tree.frontier().is_empty());
}

#[test]
fn snapshot_of_a_mid_hunt_tree_survives_a_json_roundtrip() {
    let board = east_end_board();
    let mut tree = BeliefTree::new("C27");
    tree.expand(&board, &MoveConstraints::none()).unwrap();
    tree.apply_result(&InvestigatorResult::single_search("C47", ClueAnswer::Yes));

    let json = BeliefSnapshot::to_json(&tree).unwrap();
    let restored = BeliefSnapshot::from_json(&json).unwrap().restore().unwrap();

    assert_eq!(restored.frontier(), tree.frontier());
    assert_eq!(restored.all_tracked_locations(), tree.all_tracked_locations());
}
