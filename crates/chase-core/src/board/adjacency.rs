use crate::board::location::LocationId;
use crate::board::topology::{BoardTopology, MoveConstraints, TopologyError};
use std::collections::{HashMap, HashSet};

/// Undirected adjacency-map board.
///
/// The minimal `BoardTopology` implementation: links are symmetric and a
/// move is legal when the destination is adjacent and not blocked by the
/// current constraints. Game-specific legality (transport types, one-way
/// passages) belongs in richer implementations, not here.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyBoard {
    links: HashMap<LocationId, HashSet<LocationId>>,
}

impl AdjacencyBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from undirected location pairs.
    pub fn with_links<A, B>(pairs: impl IntoIterator<Item = (A, B)>) -> Self
    where
        A: Into<LocationId>,
        B: Into<LocationId>,
    {
        let mut board = Self::new();
        for (a, b) in pairs {
            board.link(a.into(), b.into());
        }
        board
    }

    /// Adds a symmetric link between `a` and `b`.
    pub fn link(&mut self, a: LocationId, b: LocationId) {
        self.links.entry(a.clone()).or_default().insert(b.clone());
        self.links.entry(b).or_default().insert(a);
    }

    pub fn contains(&self, location: &LocationId) -> bool {
        self.links.contains_key(location)
    }

    pub fn locations(&self) -> impl Iterator<Item = &LocationId> {
        self.links.keys()
    }

    pub fn location_count(&self) -> usize {
        self.links.len()
    }
}

impl BoardTopology for AdjacencyBoard {
    fn neighbors(
        &self,
        from: &LocationId,
        constraints: &MoveConstraints,
    ) -> Result<HashSet<LocationId>, TopologyError> {
        let adjacent = self
            .links
            .get(from)
            .ok_or_else(|| TopologyError::UnknownLocation(from.clone()))?;
        Ok(adjacent
            .iter()
            .filter(|location| !constraints.is_blocked(location))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::AdjacencyBoard;
    use crate::board::location::LocationId;
    use crate::board::topology::{BoardTopology, MoveConstraints, TopologyError};

    fn triangle() -> AdjacencyBoard {
        AdjacencyBoard::with_links([("A", "B"), ("B", "C"), ("C", "A")])
    }

    #[test]
    fn links_are_symmetric() {
        let board = triangle();
        let from_a = board
            .neighbors(&LocationId::from("A"), &MoveConstraints::none())
            .unwrap();
        let from_b = board
            .neighbors(&LocationId::from("B"), &MoveConstraints::none())
            .unwrap();
        assert!(from_a.contains(&LocationId::from("B")));
        assert!(from_b.contains(&LocationId::from("A")));
    }

    #[test]
    fn blocked_destinations_are_filtered() {
        let board = triangle();
        let constraints = MoveConstraints::blocking([LocationId::from("C")]);
        let reachable = board
            .neighbors(&LocationId::from("A"), &constraints)
            .unwrap();
        assert_eq!(reachable.len(), 1);
        assert!(reachable.contains(&LocationId::from("B")));
    }

    #[test]
    fn unknown_source_is_an_error() {
        let board = triangle();
        let err = board
            .neighbors(&LocationId::from("Z"), &MoveConstraints::none())
            .unwrap_err();
        assert_eq!(err, TopologyError::UnknownLocation(LocationId::from("Z")));
    }

    #[test]
    fn fully_blocked_junction_yields_empty_set() {
        let board = triangle();
        let constraints =
            MoveConstraints::blocking([LocationId::from("B"), LocationId::from("C")]);
        let reachable = board
            .neighbors(&LocationId::from("A"), &constraints)
            .unwrap();
        assert!(reachable.is_empty());
    }
}
