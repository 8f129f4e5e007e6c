use regex::Regex;
use std::sync::OnceLock;
use tracing::warn;

use crate::mining::lexicon::Lexicon;
use crate::types::tables::{DISCONTINUOUS_SEPARATOR, ELLIPSIS};

fn tokenizer() -> &'static Regex {
    static TOKENIZER: OnceLock<Regex> = OnceLock::new();
    TOKENIZER.get_or_init(|| {
        Regex::new(r"[\w\.]+|\b\w+'|\w+(?:['-]\w+)*|[^\w\s]").expect("tokenizer pattern is valid")
    })
}

/// Lower-cases and tokenizes one connective so it matches corpus tokens.
///
/// Parts of a discontinuous connective are separated by `...` in the input
/// and come back joined by `" ... "`.
pub fn normalize_connective(raw: &str) -> String {
    raw.split(ELLIPSIS)
        .map(normalize_part)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(DISCONTINUOUS_SEPARATOR)
}

/// Lower-cases one continuous part and re-joins its tokens with single spaces.
pub(crate) fn normalize_part(part: &str) -> String {
    let lowered = part.trim().to_lowercase();
    tokenizer()
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses a plain-text lexicon: one connective per line.
///
/// Blank lines and `#` comments are skipped; repeated connectives keep
/// their first position.
pub fn parse_text_lexicon(content: &str) -> Lexicon {
    let mut lexicon = Lexicon::new();
    for (line_no, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let connective = normalize_connective(line);
        if connective.is_empty() {
            warn!(line = line_no + 1, raw = line, "lexicon line has no tokens");
            continue;
        }
        if !lexicon.contains(&connective) {
            lexicon.push(connective);
        }
    }
    lexicon
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_splits_punctuation() {
        assert_eq!(normalize_connective("Obwohl"), "obwohl");
        assert_eq!(normalize_connective("d'abord"), "d ' abord");
        assert_eq!(normalize_connective("  a pesar de "), "a pesar de");
    }

    #[test]
    fn discontinuous_parts_are_rejoined() {
        assert_eq!(normalize_connective("Wenn...Auch"), "wenn ... auch");
        assert_eq!(normalize_connective("entweder ... oder"), "entweder ... oder");
    }

    #[test]
    fn text_lexicon_skips_blanks_comments_and_duplicates() {
        let lexicon = parse_text_lexicon("# concessive\nobwohl\n\nObwohl\nauch wenn\nwenn ... auch\n");
        assert_eq!(lexicon.entries(), &["obwohl", "auch wenn", "wenn ... auch"]);
    }
}
