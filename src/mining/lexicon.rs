use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// An ordered, append-only list of connectives for one language.
///
/// Duplicates are tolerated on insertion; [`Lexicon::unique`] gives the
/// de-duplicated view used when entries become probe candidates.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Lexicon {
    entries: Vec<String>,
    members: HashSet<String>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, connective: impl Into<String>) {
        let connective = connective.into();
        self.members.insert(connective.clone());
        self.entries.push(connective);
    }

    pub fn extend<I, S>(&mut self, connectives: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for connective in connectives {
            self.push(connective);
        }
    }

    pub fn contains(&self, connective: &str) -> bool {
        self.members.contains(connective)
    }

    /// Entries in insertion order, duplicates included.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Entries in insertion order with later duplicates dropped.
    pub fn unique(&self) -> Vec<String> {
        let mut seen = HashSet::with_capacity(self.members.len());
        self.entries
            .iter()
            .filter(|entry| seen.insert(entry.as_str()))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<String>> for Lexicon {
    fn from(entries: Vec<String>) -> Self {
        let members = entries.iter().cloned().collect();
        Self { entries, members }
    }
}

impl From<Lexicon> for Vec<String> {
    fn from(lexicon: Lexicon) -> Self {
        lexicon.entries
    }
}

impl<S: Into<String>> FromIterator<S> for Lexicon {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut lexicon = Lexicon::new();
        lexicon.extend(iter);
        lexicon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_duplicates_but_unique_drops_them() {
        let mut lexicon: Lexicon = ["obwohl", "aber"].into_iter().collect();
        lexicon.push("obwohl");
        assert_eq!(lexicon.len(), 3);
        assert_eq!(lexicon.unique(), vec!["obwohl".to_string(), "aber".to_string()]);
        assert!(lexicon.contains("aber"));
        assert!(!lexicon.contains("denn"));
    }

    #[test]
    fn serializes_as_plain_list() {
        let lexicon: Lexicon = ["bien que", "mais"].into_iter().collect();
        let json = serde_json::to_string(&lexicon).unwrap();
        assert_eq!(json, r#"["bien que","mais"]"#);
        let back: Lexicon = serde_json::from_str(&json).unwrap();
        assert_eq!(back, lexicon);
    }
}
