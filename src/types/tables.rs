use std::collections::BTreeMap;

/// Separator between the parts of a discontinuous connective, e.g. `"wenn ... auch"`.
pub const DISCONTINUOUS_SEPARATOR: &str = " ... ";

/// Placeholder token for a gap between two aligned fragments.
pub const ELLIPSIS: &str = "...";

/// Placeholder token used when the single intervening target token is a comma.
pub const COMMA: &str = ",";

const PUNCTUATION: &str = "!\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~¿";

/// Connective → every aligned surface string observed for it.
pub type ObservationTable = BTreeMap<String, Vec<String>>;

/// Connective → aligned value → occurrence count.
pub type CountTable = BTreeMap<String, BTreeMap<String, usize>>;

/// Connective → aligned value → relative frequency.
pub type ProbabilityTable = BTreeMap<String, BTreeMap<String, f64>>;

/// True for a token that is exactly one punctuation character, `¿` included.
///
/// This is the set used when stripping phrase boundaries.
pub fn is_punctuation(token: &str) -> bool {
    single_char(token).is_some_and(|c| PUNCTUATION.contains(c))
}

/// True for a value that is exactly one ASCII punctuation character.
///
/// Aligned values are normalized against this narrower set, so a bare `¿`
/// survives as a value.
pub fn is_ascii_punctuation(token: &str) -> bool {
    single_char(token).is_some_and(|c| c.is_ascii_punctuation())
}

fn single_char(token: &str) -> Option<char> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

/// The three shapes a connective key can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectiveShape {
    SingleWord,
    Phrase,
    Discontinuous,
}

impl ConnectiveShape {
    /// Classifies a connective by token count and the `" ... "` separator.
    /// Blank strings have no shape.
    pub fn classify(connective: &str) -> Option<Self> {
        if connective.contains(DISCONTINUOUS_SEPARATOR) {
            return Some(ConnectiveShape::Discontinuous);
        }
        match connective.split_whitespace().count() {
            0 => None,
            1 => Some(ConnectiveShape::SingleWord),
            _ => Some(ConnectiveShape::Phrase),
        }
    }
}

/// How the threshold filters treat an aligned value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// The empty "no alignment" value.
    Empty,
    Word,
    Phrase,
}

impl ValueKind {
    pub fn of(value: &str) -> Self {
        match value.split_whitespace().count() {
            0 => ValueKind::Empty,
            1 => ValueKind::Word,
            _ => ValueKind::Phrase,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_shapes() {
        assert_eq!(ConnectiveShape::classify("obwohl"), Some(ConnectiveShape::SingleWord));
        assert_eq!(ConnectiveShape::classify("auch wenn"), Some(ConnectiveShape::Phrase));
        assert_eq!(
            ConnectiveShape::classify("wenn ... auch"),
            Some(ConnectiveShape::Discontinuous)
        );
        assert_eq!(ConnectiveShape::classify("  "), None);
    }

    #[test]
    fn punctuation_is_single_char() {
        assert!(is_punctuation(","));
        assert!(is_punctuation("¿"));
        assert!(!is_ascii_punctuation("¿"));
        assert!(is_ascii_punctuation("."));
        assert!(!is_ascii_punctuation(", "));
        assert!(!is_punctuation("..."));
        assert!(!is_punctuation(""));
        assert!(!is_punctuation("a"));
    }

    #[test]
    fn value_kinds() {
        assert_eq!(ValueKind::of(""), ValueKind::Empty);
        assert_eq!(ValueKind::of("bien"), ValueKind::Word);
        assert_eq!(ValueKind::of("bien que"), ValueKind::Phrase);
    }
}
