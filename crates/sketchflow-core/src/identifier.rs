//! Identifier management using string interning for efficient string storage and comparison
//!
//! This module provides the [`Id`] type used for node and edge identities. Ids
//! are cheap `Copy` handles; the text lives once in a global interner.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for efficient identifier storage.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Efficient identifier type using string interning
///
/// # Examples
///
/// ```
/// use sketchflow_core::identifier::Id;
///
/// let start = Id::new("node_1");
/// assert_eq!(start, "node_1");
///
/// let copy = start.with_suffix(2);
/// assert_eq!(copy, "node_1-2");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Creates a sibling id by appending `-<n>`, used to disambiguate
    /// generated ids that would otherwise collide.
    pub fn with_suffix(&self, n: usize) -> Self {
        with_interner(|interner| {
            let base = interner
                .resolve(self.0)
                .expect("Symbol should exist in interner");
            let name = format!("{base}-{n}");
            Self(interner.get_or_intern(&name))
        })
    }

    /// Returns `true` when the id text is empty or whitespace only.
    pub fn is_blank(&self) -> bool {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                .trim()
                .is_empty()
        })
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                .to_owned()
        });
        f.write_str(&value)
    }
}

impl std::str::FromStr for Id {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    /// Creates an `Id` from a string slice
    ///
    /// # Examples
    ///
    /// ```
    /// use sketchflow_core::identifier::Id;
    ///
    /// let id: Id = "edge_1".into();
    /// assert_eq!(id, "edge_1");
    /// ```
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                == other
        })
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::new(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let id1 = Id::new("node_1");
        let id2 = Id::new("node_1");
        let id3 = Id::new("node_2");
        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_with_suffix() {
        let base = Id::new("e1-2");
        assert_eq!(base.with_suffix(1), "e1-2-1");
        assert_eq!(base.with_suffix(1), base.with_suffix(1));
        assert_ne!(base.with_suffix(1), base.with_suffix(2));
    }

    #[test]
    fn test_is_blank() {
        assert!(Id::new("").is_blank());
        assert!(Id::new("   ").is_blank());
        assert!(!Id::new("a").is_blank());
    }

    #[test]
    fn test_display_and_from() {
        let id: Id = "node_42".into();
        assert_eq!(id.to_string(), "node_42");
        assert_eq!(format!("{id}"), "node_42");
    }

    #[test]
    fn test_partial_eq_str() {
        let id = Id::new("process");
        assert!(id == "process");
        assert!(id != "decision");
        let name = "process";
        assert!(id == name);
    }

    #[test]
    fn test_serde_as_plain_string() {
        let id = Id::new("node_7");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"node_7\"");

        let back: Id = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_hash_and_eq() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Id::new("a"));
        set.insert(Id::new("a"));
        set.insert(Id::new("b"));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Id::new("b")));
    }
}
