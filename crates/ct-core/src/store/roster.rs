//! Player roster.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Ordered list of unique player names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Roster {
    players: Vec<String>,
}

impl Roster {
    /// Create an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a player. Empty and duplicate (exact match) names are rejected.
    pub fn add(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyPlayerName);
        }
        if self.contains(&name) {
            return Err(ValidationError::DuplicatePlayer(name));
        }
        self.players.push(name);
        Ok(())
    }

    /// Whether `name` is on the roster.
    pub fn contains(&self, name: &str) -> bool {
        self.players.iter().any(|p| p == name)
    }

    /// Players in the order they were added.
    pub fn names(&self) -> &[String] {
        &self.players
    }

    /// Number of players.
    pub fn len(&self) -> usize {
        self.players.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// First duplicated name, if any.
    pub(crate) fn first_duplicate(&self) -> Option<&str> {
        self.players
            .iter()
            .enumerate()
            .find(|(i, p)| self.players[..*i].contains(p))
            .map(|(_, p)| p.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_preserves_order() {
        let mut r = Roster::new();
        r.add("Alice").unwrap();
        r.add("Bob").unwrap();
        assert_eq!(r.names(), ["Alice", "Bob"]);
    }

    #[test]
    fn duplicate_rejected() {
        let mut r = Roster::new();
        r.add("Alice").unwrap();
        assert_eq!(
            r.add("Alice"),
            Err(ValidationError::DuplicatePlayer("Alice".into()))
        );
        assert_eq!(r.len(), 1);
    }

    #[test]
    fn match_is_case_sensitive() {
        let mut r = Roster::new();
        r.add("Alice").unwrap();
        assert!(r.add("alice").is_ok());
        assert_eq!(r.len(), 2);
    }

    #[test]
    fn empty_rejected() {
        let mut r = Roster::new();
        assert_eq!(r.add(""), Err(ValidationError::EmptyPlayerName));
        assert_eq!(r.add("   "), Err(ValidationError::EmptyPlayerName));
        assert!(r.is_empty());
    }

    #[test]
    fn serializes_as_plain_list() {
        let mut r = Roster::new();
        r.add("Alice").unwrap();
        assert_eq!(serde_json::to_string(&r).unwrap(), r#"["Alice"]"#);
    }

    #[test]
    fn finds_duplicates_from_raw_data() {
        let r: Roster = serde_json::from_str(r#"["A", "B", "A"]"#).unwrap();
        assert_eq!(r.first_duplicate(), Some("A"));
    }
}
