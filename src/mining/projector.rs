//! Turns aligned token indices into normalized phrase strings.
//!
//! The pipeline is shared by phrase extraction during bootstrapping and by
//! the word-alignment index builder:
//!
//! ```text
//! spans ──collect──▶ sorted unique indices ──fill_gaps──▶ slots
//!       ──surface──▶ tokens ──strip_boundaries──▶ joined phrase
//! ```

use super::span::Span;
use crate::types::alignment_data::{AlignmentPair, Direction};
use crate::types::tables::{is_punctuation, COMMA, ELLIPSIS};

/// One position of a projected phrase before it is mapped to text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Index(usize),
    Comma,
    Ellipsis,
}

/// Projects source-side spans through `pairs` onto `target_tokens`.
///
/// `direction` names the side the spans live on; the returned phrase is
/// built from the opposite side, with `", ..."` collapsed to `"..."`.
/// Indices in `pairs` must be in range, which every [`crate::ParallelCorpus`]
/// constructor checks.
pub fn project(spans: &[Span], pairs: &[AlignmentPair], target_tokens: &[String], direction: Direction) -> String {
    let indices = collect_aligned(spans.iter().flat_map(|span| span.clone()), pairs, direction);
    render(&indices, target_tokens).replace(", ...", "...")
}

/// Aligned opposite-side indices for every index in `positions`, unique and ascending.
pub fn collect_aligned(
    positions: impl IntoIterator<Item = usize>,
    pairs: &[AlignmentPair],
    direction: Direction,
) -> Vec<usize> {
    let mut aligned: Vec<usize> = Vec::new();
    for position in positions {
        for pair in pairs.iter().filter(|pair| pair.from_side(direction) == position) {
            let index = pair.to_side(direction);
            if !aligned.contains(&index) {
                aligned.push(index);
            }
        }
    }
    aligned.sort_unstable();
    aligned
}

/// Normalizes sorted indices and joins their surface tokens.
pub fn render(sorted_indices: &[usize], tokens: &[String]) -> String {
    let slots = fill_gaps(sorted_indices, tokens);
    strip_boundaries(surface(&slots, tokens)).join(" ")
}

/// Inserts a placeholder between indices that are not adjacent.
///
/// A gap of exactly one token becomes a comma if that token is a comma and
/// an ellipsis otherwise; wider gaps always become an ellipsis.
pub fn fill_gaps(sorted_indices: &[usize], tokens: &[String]) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(sorted_indices.len() * 2);
    for (position, &index) in sorted_indices.iter().enumerate() {
        slots.push(Slot::Index(index));
        let Some(&next) = sorted_indices.get(position + 1) else {
            continue;
        };
        match next.abs_diff(index) {
            2 if tokens.get(index + 1).map(String::as_str) == Some(COMMA) => slots.push(Slot::Comma),
            2 => slots.push(Slot::Ellipsis),
            gap if gap > 2 => slots.push(Slot::Ellipsis),
            _ => {}
        }
    }
    slots
}

pub fn surface<'a>(slots: &[Slot], tokens: &'a [String]) -> Vec<&'a str> {
    slots
        .iter()
        .map(|slot| match slot {
            Slot::Index(index) => tokens[*index].as_str(),
            Slot::Comma => COMMA,
            Slot::Ellipsis => ELLIPSIS,
        })
        .collect()
}

/// Drops one leading and one trailing punctuation token, then one leading
/// and one trailing ellipsis. Single-token phrases are left alone.
pub fn strip_boundaries(words: Vec<&str>) -> Vec<&str> {
    if words.len() < 2 {
        return words;
    }
    let mut slice = words.as_slice();
    if let Some((first, rest)) = slice.split_first() {
        if is_punctuation(first) {
            slice = rest;
        }
    }
    if let Some((last, rest)) = slice.split_last() {
        if is_punctuation(last) {
            slice = rest;
        }
    }
    if let Some((&ELLIPSIS, rest)) = slice.split_first() {
        slice = rest;
    }
    if let Some((&ELLIPSIS, rest)) = slice.split_last() {
        slice = rest;
    }
    slice.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(s: &str) -> Vec<String> {
        s.split_whitespace().map(String::from).collect()
    }

    fn pairs(raw: &[(usize, usize)]) -> Vec<AlignmentPair> {
        raw.iter().map(|&(s, t)| AlignmentPair::new(s, t)).collect()
    }

    #[test]
    fn one_token_gap_becomes_ellipsis() {
        let target = toks("t0 t1 t2 t3 t4");
        let phrase = project(&[0..1], &pairs(&[(0, 0), (0, 2)]), &target, Direction::Source);
        assert_eq!(phrase, "t0 ... t2");
    }

    #[test]
    fn one_token_comma_gap_keeps_the_comma() {
        let target = toks("t0 , t2 t3");
        let phrase = project(&[0..1], &pairs(&[(0, 0), (0, 2)]), &target, Direction::Source);
        assert_eq!(phrase, "t0 , t2");
    }

    #[test]
    fn wide_gap_is_always_ellipsis() {
        let target = toks("si , comme , alors");
        let phrase = project(&[0..2], &pairs(&[(0, 0), (1, 4)]), &target, Direction::Source);
        assert_eq!(phrase, "si ... alors");
    }

    #[test]
    fn indices_are_deduplicated_and_sorted() {
        let target = toks("a b c");
        let phrase = project(&[0..2], &pairs(&[(0, 1), (1, 0), (1, 1)]), &target, Direction::Source);
        assert_eq!(phrase, "a b");
    }

    #[test]
    fn projects_from_the_target_side() {
        let source = toks("obwohl es regnet");
        let phrase = project(&[0..1], &pairs(&[(0, 0), (1, 1), (2, 2)]), &source, Direction::Target);
        assert_eq!(phrase, "obwohl");
    }

    #[test]
    fn boundary_punctuation_and_ellipsis_are_stripped() {
        // ", weil" → "weil"
        let target = toks(", weil er");
        assert_eq!(project(&[0..2], &pairs(&[(0, 0), (1, 1)]), &target, Direction::Source), "weil");
        // "weil ... ." → "weil"
        let target = toks("weil er kommt .");
        assert_eq!(project(&[0..2], &pairs(&[(0, 0), (1, 3)]), &target, Direction::Source), "weil");
    }

    #[test]
    fn only_punctuation_collapses_to_empty() {
        let target = toks(", .");
        assert_eq!(project(&[0..2], &pairs(&[(0, 0), (1, 1)]), &target, Direction::Source), "");
    }

    #[test]
    fn unaligned_span_is_empty_observation() {
        let target = toks("a b");
        assert_eq!(project(&[0..1], &[], &target, Direction::Source), "");
    }

    #[test]
    fn single_punctuation_token_is_kept() {
        let target = toks("a , b");
        assert_eq!(project(&[0..1], &pairs(&[(0, 1)]), &target, Direction::Source), ",");
    }

    #[test]
    fn comma_before_ellipsis_collapses() {
        // indices 0,1 then 5: "a , ... b"
        let target = toks("a , x y z b");
        let phrase = project(&[0..1], &pairs(&[(0, 0), (0, 1), (0, 5)]), &target, Direction::Source);
        assert_eq!(phrase, "a ... b");
        assert_eq!(render(&[0, 1, 5], &target), "a , ... b");
    }
}
