use std::ops::Range;

use crate::types::tables::{ConnectiveShape, DISCONTINUOUS_SEPARATOR};

/// A contiguous token range inside one sentence.
pub type Span = Range<usize>;

/// Returns every span of `tokens` whose slice equals `phrase`, left to right.
///
/// Overlapping occurrences are all reported. An empty phrase, or one longer
/// than the sentence, has no span.
pub fn locate<S: AsRef<str>>(tokens: &[String], phrase: &[S]) -> Vec<Span> {
    if phrase.is_empty() || phrase.len() > tokens.len() {
        return Vec::new();
    }
    (0..=tokens.len() - phrase.len())
        .filter(|&start| {
            tokens[start..start + phrase.len()]
                .iter()
                .zip(phrase)
                .all(|(token, wanted)| token == wanted.as_ref())
        })
        .map(|start| start..start + phrase.len())
        .collect()
}

/// First span of `phrase` in `tokens` that is not already in `taken`.
pub fn locate_first_free<S: AsRef<str>>(tokens: &[String], phrase: &[S], taken: &[Span]) -> Option<Span> {
    locate(tokens, phrase)
        .into_iter()
        .find(|span| !taken.contains(span))
}

/// Locates the parts of a discontinuous connective.
///
/// Each part keeps only its first free match. The parts must all be found
/// and must start in textual order, otherwise the sentence does not contain
/// the connective and `None` is returned.
pub fn locate_discontinuous(tokens: &[String], connective: &str) -> Option<Vec<Span>> {
    let mut spans: Vec<Span> = Vec::new();
    for part in connective.split(DISCONTINUOUS_SEPARATOR) {
        let words: Vec<&str> = part.split_whitespace().collect();
        let span = locate_first_free(tokens, &words, &spans)?;
        if let Some(previous) = spans.last() {
            if span.start <= previous.start {
                return None;
            }
        }
        spans.push(span);
    }
    Some(spans)
}

/// True if `tokens` contains `connective` in any of its shapes.
pub fn contains_connective(tokens: &[String], connective: &str) -> bool {
    match ConnectiveShape::classify(connective) {
        Some(ConnectiveShape::SingleWord) => tokens.iter().any(|token| token == connective.trim()),
        Some(ConnectiveShape::Phrase) => {
            let words: Vec<&str> = connective.split_whitespace().collect();
            !locate(tokens, &words).is_empty()
        }
        Some(ConnectiveShape::Discontinuous) => locate_discontinuous(tokens, connective).is_some(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn finds_all_occurrences_in_order() {
        let tokens = toks("so dass er kam , so dass sie ging");
        assert_eq!(locate(&tokens, &["so", "dass"]), vec![0..2, 5..7]);
    }

    #[test]
    fn empty_or_oversized_phrase_has_no_span() {
        let tokens = toks("auch wenn");
        assert!(locate::<&str>(&tokens, &[]).is_empty());
        assert!(locate(&tokens, &["auch", "wenn", "er"]).is_empty());
    }

    #[test]
    fn matching_is_token_exact() {
        let tokens = toks("obwohl es regnet");
        assert!(locate(&tokens, &["ob"]).is_empty());
        assert_eq!(locate(&tokens, &["es", "regnet"]), vec![1..3]);
    }

    #[test]
    fn discontinuous_parts_keep_first_match_and_order() {
        let tokens = toks("wenn er auch kommt , wenn auch spät");
        assert_eq!(locate_discontinuous(&tokens, "wenn ... auch"), Some(vec![0..1, 2..3]));
        let reversed = toks("auch er wenn");
        assert_eq!(locate_discontinuous(&reversed, "wenn ... auch"), None);
        assert_eq!(locate_discontinuous(&toks("wenn er"), "wenn ... auch"), None);
    }

    #[test]
    fn repeated_part_takes_next_free_span() {
        let tokens = toks("je mehr desto je");
        assert_eq!(locate_discontinuous(&tokens, "je ... je"), Some(vec![0..1, 3..4]));
    }

    #[test]
    fn contains_handles_every_shape() {
        let tokens = toks("bien qu' il pleuve , il sort");
        assert!(contains_connective(&tokens, "pleuve"));
        assert!(contains_connective(&tokens, "bien qu'"));
        assert!(contains_connective(&tokens, "bien ... sort"));
        assert!(!contains_connective(&tokens, "sort ... bien"));
        assert!(!contains_connective(&tokens, ""));
    }
}
