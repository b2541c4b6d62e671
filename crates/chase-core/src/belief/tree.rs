//! The belief DAG tracking every position the hider could occupy.

use crate::belief::result::InvestigatorResult;
use crate::belief::snapshot::SnapshotError;
use crate::board::{BoardTopology, LocationId, MoveConstraints, TopologyError};
use std::collections::{HashMap, HashSet, VecDeque};

/// Stable index into the tree's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct NodeHandle(usize);

/// One vertex of the belief DAG.
#[derive(Debug, Clone)]
pub struct BeliefNode {
    id: LocationId,
    clue_found: bool,
}

impl BeliefNode {
    fn new(id: LocationId) -> Self {
        Self {
            id,
            clue_found: false,
        }
    }

    pub fn id(&self) -> &LocationId {
        &self.id
    }

    /// Whether a clue search reported a find at this position.
    pub fn clue_found(&self) -> bool {
        self.clue_found
    }
}

#[derive(Debug, Clone)]
struct NodeSlot {
    node: BeliefNode,
    parents: Vec<NodeHandle>,
    children: Vec<NodeHandle>,
}

impl NodeSlot {
    fn new(node: BeliefNode) -> Self {
        Self {
            node,
            parents: Vec::new(),
            children: Vec::new(),
        }
    }
}

/// Directed acyclic history of the hider's possible movements.
///
/// The root is the known starting location and is fixed for the life of the
/// tree. Each `expand` advances the belief by one hider move; each
/// `apply_result` eliminates positions ruled out by seeker feedback. The
/// frontier — the currently possible positions — is maintained in lock-step
/// with every edge mutation and is only ever handed out as an owned copy.
///
/// Node identity is the location label: at most one live node exists per
/// label. A label that recurs after its node was pruned gets a fresh node;
/// removed identities are never resurrected.
#[derive(Debug, Clone)]
pub struct BeliefTree {
    slots: Vec<Option<NodeSlot>>,
    index: HashMap<LocationId, NodeHandle>,
    root: NodeHandle,
    frontier: HashSet<NodeHandle>,
}

impl BeliefTree {
    /// Creates a tree rooted at the hider's known starting location.
    pub fn new(root_location: impl Into<LocationId>) -> Self {
        let id = root_location.into();
        let root = NodeHandle(0);
        let mut index = HashMap::new();
        index.insert(id.clone(), root);
        Self {
            slots: vec![Some(NodeSlot::new(BeliefNode::new(id)))],
            index,
            root,
            frontier: HashSet::from([root]),
        }
    }

    /// The known starting location.
    pub fn root(&self) -> &LocationId {
        &self.slot(self.root).node.id
    }

    /// Owned snapshot of the currently possible positions.
    pub fn frontier(&self) -> HashSet<LocationId> {
        self.frontier
            .iter()
            .map(|&handle| self.slot(handle).node.id.clone())
            .collect()
    }

    /// Whether a live node for `location` exists anywhere in the tree.
    pub fn contains(&self, location: &LocationId) -> bool {
        self.index.contains_key(location)
    }

    /// The live node for `location`, if any.
    pub fn node(&self, location: &LocationId) -> Option<&BeliefNode> {
        self.index
            .get(location)
            .map(|&handle| &self.slot(handle).node)
    }

    /// Every location currently tracked, root included.
    pub fn all_tracked_locations(&self) -> HashSet<LocationId> {
        self.index.keys().cloned().collect()
    }

    /// Iterates over every live node.
    pub fn nodes(&self) -> impl Iterator<Item = &BeliefNode> {
        self.slots
            .iter()
            .filter_map(|slot| slot.as_ref())
            .map(|slot| &slot.node)
    }

    /// Iterates over every live edge as `(parent, child)` labels.
    pub fn edges(&self) -> impl Iterator<Item = (&LocationId, &LocationId)> {
        self.slots
            .iter()
            .filter_map(|slot| slot.as_ref())
            .flat_map(move |slot| {
                slot.children
                    .iter()
                    .map(move |&child| (&slot.node.id, &self.slot(child).node.id))
            })
    }

    pub fn node_count(&self) -> usize {
        self.index.len()
    }

    pub fn edge_count(&self) -> usize {
        self.slots
            .iter()
            .filter_map(|slot| slot.as_ref())
            .map(|slot| slot.children.len())
            .sum()
    }

    /// Advances the belief state by exactly one hider move.
    ///
    /// Every frontier node is asked for its one-move destinations under
    /// `constraints`. Destinations without a live node get a fresh node; a
    /// destination already tracked is reused (paths converge) unless the
    /// edge would close a cycle, in which case that single edge is declined
    /// and the round continues. The new frontier is the set of distinct
    /// nodes targeted by this round's moves, old frontier members excluded;
    /// re-proposing an edge the tree already holds does not duplicate it.
    ///
    /// All topology queries run before any mutation: a `TopologyError`
    /// leaves the tree exactly as it was.
    pub fn expand<T: BoardTopology + ?Sized>(
        &mut self,
        board: &T,
        constraints: &MoveConstraints,
    ) -> Result<(), TopologyError> {
        let mut moves = Vec::with_capacity(self.frontier.len());
        for &source in &self.frontier {
            let destinations = board.neighbors(&self.slot(source).node.id, constraints)?;
            moves.push((source, destinations));
        }

        let old_frontier = std::mem::take(&mut self.frontier);
        let mut next = HashSet::new();
        for (source, destinations) in moves {
            for location in destinations {
                match self.index.get(&location).copied() {
                    Some(existing) => {
                        if self.is_ancestor(existing, source) {
                            // Wiring this edge would close a cycle; the
                            // destination is skipped for this source.
                            continue;
                        }
                        self.add_edge(source, existing);
                        if !old_frontier.contains(&existing) {
                            next.insert(existing);
                        }
                    }
                    None => {
                        let created = self.insert_node(location);
                        self.add_edge(source, created);
                        next.insert(created);
                    }
                }
            }
        }
        self.frontier = next;
        Ok(())
    }

    /// Eliminates positions ruled out by a resolved seeker action.
    ///
    /// A `Yes` clue answer or a successful capture removes that location's
    /// node together with everything left unreachable from the root.
    /// Locations with no live node are ignored: the hider could never have
    /// been there under current beliefs, which is consistent. The root is
    /// never removed; a hit there only records the clue.
    pub fn apply_result(&mut self, result: &InvestigatorResult) {
        match result {
            InvestigatorResult::Search { answers } => {
                for (location, answer) in answers {
                    if answer.is_yes() {
                        self.eliminate(location);
                    }
                }
            }
            InvestigatorResult::Capture { location, success } => {
                if *success {
                    self.eliminate(location);
                }
            }
        }
    }

    fn eliminate(&mut self, location: &LocationId) {
        let Some(&target) = self.index.get(location) else {
            return;
        };
        if target == self.root {
            self.slot_mut(target).node.clue_found = true;
            return;
        }
        self.detach(target);
        self.drop_unreachable();
    }

    /// Severs `target` from all of its parents, leaving it (and any node
    /// whose every root path ran through it) unreachable.
    fn detach(&mut self, target: NodeHandle) {
        let parents = std::mem::take(&mut self.slot_mut(target).parents);
        for parent in parents {
            self.slot_mut(parent).children.retain(|&child| child != target);
        }
    }

    /// Removes every node without a path from the root and scrubs dangling
    /// adjacency entries, re-establishing the reachability invariant.
    fn drop_unreachable(&mut self) {
        let mut reachable = HashSet::from([self.root]);
        let mut queue = VecDeque::from([self.root]);
        while let Some(handle) = queue.pop_front() {
            for &child in &self.slot(handle).children {
                if reachable.insert(child) {
                    queue.push_back(child);
                }
            }
        }

        for raw in 0..self.slots.len() {
            let handle = NodeHandle(raw);
            if reachable.contains(&handle) {
                continue;
            }
            if let Some(slot) = self.slots[raw].take() {
                self.index.remove(&slot.node.id);
                self.frontier.remove(&handle);
            }
        }

        for slot in self.slots.iter_mut().flatten() {
            slot.children.retain(|child| reachable.contains(child));
            slot.parents.retain(|parent| reachable.contains(parent));
        }
    }

    /// Whether `candidate` lies on some path from the root to `of`,
    /// `of` itself included. Walks the backward adjacency lists.
    fn is_ancestor(&self, candidate: NodeHandle, of: NodeHandle) -> bool {
        if candidate == of {
            return true;
        }
        let mut seen = HashSet::from([of]);
        let mut queue = VecDeque::from([of]);
        while let Some(handle) = queue.pop_front() {
            for &parent in &self.slot(handle).parents {
                if parent == candidate {
                    return true;
                }
                if seen.insert(parent) {
                    queue.push_back(parent);
                }
            }
        }
        false
    }

    fn insert_node(&mut self, id: LocationId) -> NodeHandle {
        let handle = NodeHandle(self.slots.len());
        self.index.insert(id.clone(), handle);
        self.slots.push(Some(NodeSlot::new(BeliefNode::new(id))));
        handle
    }

    /// Records the edge if it is not already present; the edge set never
    /// holds the same (parent, child) pair twice.
    fn add_edge(&mut self, parent: NodeHandle, child: NodeHandle) {
        if self.slot(parent).children.contains(&child) {
            return;
        }
        self.slot_mut(parent).children.push(child);
        self.slot_mut(child).parents.push(parent);
    }

    fn slot(&self, handle: NodeHandle) -> &NodeSlot {
        self.slots[handle.0]
            .as_ref()
            .unwrap_or_else(|| unreachable!("live handle {} points at an empty slot", handle.0))
    }

    fn slot_mut(&mut self, handle: NodeHandle) -> &mut NodeSlot {
        self.slots[handle.0]
            .as_mut()
            .unwrap_or_else(|| unreachable!("live handle {} points at an empty slot", handle.0))
    }

    /// Reassembles a tree from snapshot parts, re-validating the structural
    /// invariants the snapshot format cannot guarantee on its own.
    pub(crate) fn rebuild(
        root: LocationId,
        nodes: Vec<(LocationId, bool)>,
        edges: &[(LocationId, LocationId)],
        frontier: &[LocationId],
    ) -> Result<Self, SnapshotError> {
        let mut tree = BeliefTree::new(root.clone());
        tree.frontier.clear();

        for (id, clue_found) in nodes {
            let handle = if id == root {
                tree.root
            } else {
                if tree.index.contains_key(&id) {
                    return Err(SnapshotError::DuplicateNode(id));
                }
                tree.insert_node(id)
            };
            tree.slot_mut(handle).node.clue_found = clue_found;
        }

        for (parent, child) in edges {
            let &parent = tree
                .index
                .get(parent)
                .ok_or_else(|| SnapshotError::UnknownEdgeEndpoint(parent.clone()))?;
            let &child = tree
                .index
                .get(child)
                .ok_or_else(|| SnapshotError::UnknownEdgeEndpoint(child.clone()))?;
            tree.add_edge(parent, child);
        }

        if tree.has_cycle() {
            return Err(SnapshotError::CyclicEdges);
        }
        if let Some(stranded) = tree.first_unreachable() {
            return Err(SnapshotError::UnreachableNode(stranded));
        }

        for location in frontier {
            let &handle = tree
                .index
                .get(location)
                .ok_or_else(|| SnapshotError::UnknownFrontierLocation(location.clone()))?;
            tree.frontier.insert(handle);
        }
        Ok(tree)
    }

    fn has_cycle(&self) -> bool {
        // Kahn's algorithm: a DAG drains completely.
        let mut in_degree: HashMap<NodeHandle, usize> = HashMap::new();
        let mut live = 0usize;
        for raw in 0..self.slots.len() {
            let handle = NodeHandle(raw);
            if let Some(slot) = self.slots[raw].as_ref() {
                live += 1;
                in_degree.insert(handle, slot.parents.len());
            }
        }
        let mut queue: VecDeque<NodeHandle> = in_degree
            .iter()
            .filter(|&(_, &degree)| degree == 0)
            .map(|(&handle, _)| handle)
            .collect();
        let mut drained = 0usize;
        while let Some(handle) = queue.pop_front() {
            drained += 1;
            for &child in &self.slot(handle).children {
                let degree = in_degree
                    .get_mut(&child)
                    .unwrap_or_else(|| unreachable!("child handle missing from degree map"));
                *degree -= 1;
                if *degree == 0 {
                    queue.push_back(child);
                }
            }
        }
        drained != live
    }

    fn first_unreachable(&self) -> Option<LocationId> {
        let mut reachable = HashSet::from([self.root]);
        let mut queue = VecDeque::from([self.root]);
        while let Some(handle) = queue.pop_front() {
            for &child in &self.slot(handle).children {
                if reachable.insert(child) {
                    queue.push_back(child);
                }
            }
        }
        self.index
            .iter()
            .find(|(_, handle)| !reachable.contains(handle))
            .map(|(id, _)| id.clone())
    }
}
