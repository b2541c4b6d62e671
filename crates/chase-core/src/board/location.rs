use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque label naming one board location.
///
/// Equality and hashing are value-based: two ids denote the same location
/// iff their labels are equal. Ordering exists only so snapshots and logs
/// can be emitted stably.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(String);

impl LocationId {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LocationId {
    fn from(label: &str) -> Self {
        Self(label.to_string())
    }
}

impl From<String> for LocationId {
    fn from(label: String) -> Self {
        Self(label)
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::LocationId;
    use std::collections::HashSet;

    #[test]
    fn equality_is_by_label() {
        assert_eq!(LocationId::from("C27"), LocationId::new("C27"));
        assert_ne!(LocationId::from("C27"), LocationId::from("C28"));
    }

    #[test]
    fn hashes_like_its_label() {
        let mut set = HashSet::new();
        set.insert(LocationId::from("C44"));
        assert!(set.contains(&LocationId::new(String::from("C44"))));
    }

    #[test]
    fn displays_the_raw_label() {
        assert_eq!(LocationId::from("C79").to_string(), "C79");
    }
}
