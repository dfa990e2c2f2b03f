//! Favorite characters, keyed by name

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::Character;

/// Ordered set of favorite characters.
///
/// Membership is decided by `name` alone, so two fetched records with the
/// same name count as one favorite. Serializes as a plain JSON array.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct FavoritesSet(Vec<Character>);

impl FavoritesSet {
    pub fn new(characters: Vec<Character>) -> Self {
        let mut set = Self::default();
        for character in characters {
            if !set.contains(&character) {
                set.0.push(character);
            }
        }
        set
    }

    pub fn contains(&self, character: &Character) -> bool {
        self.0.iter().any(|fav| fav.same_as(character))
    }

    /// Remove the entry with the same name, or append `character`.
    /// Returns `true` when the character is a favorite afterwards.
    pub fn toggle(&mut self, character: Character) -> bool {
        let before = self.0.len();
        self.0.retain(|fav| !fav.same_as(&character));
        if self.0.len() == before {
            self.0.push(character);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Character> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Character] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Stat;

    fn character(name: &str, height: &str) -> Character {
        Character {
            name: name.into(),
            height: Stat::from(height),
            ..Default::default()
        }
    }

    #[test]
    fn test_toggle_twice_restores_set() {
        let mut set = FavoritesSet::new(vec![character("Leia Organa", "150")]);
        let before = set.clone();

        assert!(set.toggle(character("Luke Skywalker", "172")));
        assert_eq!(set.len(), 2);
        assert!(!set.toggle(character("Luke Skywalker", "172")));
        assert_eq!(set, before);
    }

    #[test]
    fn test_membership_ignores_other_fields() {
        let set = FavoritesSet::new(vec![character("Luke Skywalker", "172")]);

        assert!(set.contains(&character("Luke Skywalker", "unknown")));
        assert!(!set.contains(&character("Darth Vader", "172")));
    }

    #[test]
    fn test_toggle_removes_by_name() {
        let mut set = FavoritesSet::new(vec![character("Luke Skywalker", "172")]);

        let now_favorite = set.toggle(character("Luke Skywalker", "999"));

        assert!(!now_favorite);
        assert!(set.is_empty());
    }

    #[test]
    fn test_new_drops_duplicate_names() {
        let set = FavoritesSet::new(vec![
            character("R2-D2", "96"),
            character("R2-D2", "96"),
            character("C-3PO", "167"),
        ]);
        let names: Vec<_> = set.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["R2-D2", "C-3PO"]);
    }

    #[test]
    fn test_serializes_as_array() {
        let set = FavoritesSet::new(vec![character("Yoda", "66")]);
        let json = serde_json::to_value(&set).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["name"], "Yoda");
    }
}
