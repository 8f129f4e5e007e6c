use serde::{Deserialize, Serialize};

/// One `i-j` correspondence from a Pharaoh alignment line.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlignmentPair {
    pub source: usize,
    pub target: usize,
}

impl AlignmentPair {
    pub fn new(source: usize, target: usize) -> Self {
        Self { source, target }
    }

    /// The index on the side `direction` probes from.
    pub fn from_side(&self, direction: Direction) -> usize {
        match direction {
            Direction::Source => self.source,
            Direction::Target => self.target,
        }
    }

    /// The index on the opposite side.
    pub fn to_side(&self, direction: Direction) -> usize {
        self.from_side(direction.opposite())
    }
}

/// A whitespace-tokenized sentence pair together with its word alignment.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SentencePair {
    pub source: Vec<String>,
    pub target: Vec<String>,
    pub alignment: Vec<AlignmentPair>,
}

impl SentencePair {
    pub fn tokens(&self, direction: Direction) -> &[String] {
        match direction {
            Direction::Source => &self.source,
            Direction::Target => &self.target,
        }
    }
}

/// Which language of the corpus a bootstrap round probes.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Source,
    Target,
}

impl Direction {
    pub fn opposite(self) -> Self {
        match self {
            Direction::Source => Direction::Target,
            Direction::Target => Direction::Source,
        }
    }

    /// Parses the `"source"` / `"target"` tokens used on the command line.
    /// Anything else yields `None`.
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "source" => Some(Direction::Source),
            "target" => Some(Direction::Target),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Source => "source",
            Direction::Target => "target",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direction_tokens() {
        assert_eq!(Direction::parse("source"), Some(Direction::Source));
        assert_eq!(Direction::parse("target"), Some(Direction::Target));
        assert_eq!(Direction::parse("french"), None);
        assert_eq!(Direction::Source.opposite(), Direction::Target);
    }

    #[test]
    fn pair_sides_follow_direction() {
        let pair = AlignmentPair::new(3, 7);
        assert_eq!(pair.from_side(Direction::Source), 3);
        assert_eq!(pair.to_side(Direction::Source), 7);
        assert_eq!(pair.from_side(Direction::Target), 7);
        assert_eq!(pair.to_side(Direction::Target), 3);
    }
}
