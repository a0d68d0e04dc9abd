use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical form of a user name: ASCII lowercase with every
/// non-alphanumeric character removed. Override keys and cache keys both
/// use this form, so "Ash", "a s h" and "ASH!" all address the same user.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    pub fn new(name: &str) -> Self {
        Self(to_id(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for UserId {
    fn from(name: String) -> Self {
        Self::new(&name)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

pub fn to_id(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn to_id_lowercases_and_strips() {
        assert_eq!(to_id("Ash Ketchum!"), "ashketchum");
        assert_eq!(to_id("  A.s.h  "), "ash");
        assert_eq!(to_id("Zarel-42"), "zarel42");
    }

    #[test]
    fn to_id_drops_non_ascii() {
        assert_eq!(to_id("Pokémon"), "pokmon");
        assert_eq!(to_id("★★★"), "");
    }

    #[test]
    fn user_id_equality_follows_canonical_form() {
        assert_eq!(UserId::new("ASH"), UserId::new("a-s-h"));
        assert!(UserId::new("!!").is_empty());
    }
}
