use super::tree::BeliefTree;
use crate::board::LocationId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Serializable image of a belief tree for diagnostics and saves.
///
/// Nodes, edges, and the frontier are emitted in sorted order so two
/// captures of the same tree compare and serialize identically.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BeliefSnapshot {
    pub root: LocationId,
    pub nodes: Vec<NodeRecord>,
    pub edges: Vec<(LocationId, LocationId)>,
    pub frontier: Vec<LocationId>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeRecord {
    pub location: LocationId,
    pub clue_found: bool,
}

impl BeliefSnapshot {
    pub fn capture(tree: &BeliefTree) -> Self {
        let mut nodes: Vec<NodeRecord> = tree
            .nodes()
            .map(|node| NodeRecord {
                location: node.id().clone(),
                clue_found: node.clue_found(),
            })
            .collect();
        nodes.sort_by(|a, b| a.location.cmp(&b.location));

        let mut edges: Vec<(LocationId, LocationId)> = tree
            .edges()
            .map(|(parent, child)| (parent.clone(), child.clone()))
            .collect();
        edges.sort();

        let mut frontier: Vec<LocationId> = tree.frontier().into_iter().collect();
        frontier.sort();

        BeliefSnapshot {
            root: tree.root().clone(),
            nodes,
            edges,
            frontier,
        }
    }

    /// Rebuilds a live tree, rejecting snapshots that violate the tree's
    /// structural invariants.
    pub fn restore(self) -> Result<BeliefTree, SnapshotError> {
        if !self.nodes.iter().any(|record| record.location == self.root) {
            return Err(SnapshotError::MissingRoot);
        }
        let nodes = self
            .nodes
            .into_iter()
            .map(|record| (record.location, record.clue_found))
            .collect();
        BeliefTree::rebuild(self.root, nodes, &self.edges, &self.frontier)
    }

    pub fn to_json(tree: &BeliefTree) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::capture(tree))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// A snapshot that cannot be turned back into a valid tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    MissingRoot,
    DuplicateNode(LocationId),
    UnknownEdgeEndpoint(LocationId),
    UnknownFrontierLocation(LocationId),
    CyclicEdges,
    UnreachableNode(LocationId),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::MissingRoot => write!(f, "snapshot has no record for its root"),
            SnapshotError::DuplicateNode(location) => {
                write!(f, "snapshot lists {location} more than once")
            }
            SnapshotError::UnknownEdgeEndpoint(location) => {
                write!(f, "snapshot edge references unknown location {location}")
            }
            SnapshotError::UnknownFrontierLocation(location) => {
                write!(f, "snapshot frontier references unknown location {location}")
            }
            SnapshotError::CyclicEdges => write!(f, "snapshot edges contain a cycle"),
            SnapshotError::UnreachableNode(location) => {
                write!(f, "snapshot node {location} has no path from the root")
            }
        }
    }
}

impl std::error::Error for SnapshotError {}
