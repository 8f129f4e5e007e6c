use tracing::trace;

use super::projector::project;
use super::span::{locate, locate_discontinuous};
use super::word_index::WordAlignmentIndex;
use crate::corpus::ParallelCorpus;
use crate::types::alignment_data::Direction;
use crate::types::tables::ObservationTable;

/// Looks single words up in the word-alignment index.
///
/// Words missing from the index contribute nothing.
pub fn lookup_single_words(index: &WordAlignmentIndex, words: &[String]) -> ObservationTable {
    words
        .iter()
        .filter_map(|word| index.lookup(word).map(|aligned| (word.clone(), aligned.to_vec())))
        .collect()
}

/// Projects every occurrence of every continuous phrase in the corpus.
///
/// One observation is recorded per occurrence, so a phrase that appears
/// twice in a sentence contributes twice.
pub fn extract_phrases(corpus: &ParallelCorpus, phrases: &[String], direction: Direction) -> ObservationTable {
    let split: Vec<(&String, Vec<&str>)> = phrases
        .iter()
        .map(|phrase| (phrase, phrase.split_whitespace().collect()))
        .collect();

    let mut observations = ObservationTable::new();
    for pair in corpus.pairs() {
        let probe_tokens = pair.tokens(direction);
        let other_tokens = pair.tokens(direction.opposite());
        for (phrase, words) in &split {
            for span in locate(probe_tokens, words) {
                let aligned = project(&[span], &pair.alignment, other_tokens, direction);
                trace!(phrase = %phrase, aligned = %aligned, "phrase occurrence");
                observations.entry((*phrase).clone()).or_default().push(aligned);
            }
        }
    }
    observations
}

/// Projects discontinuous connectives, one observation per sentence.
///
/// All parts must occur in textual order; each part contributes only its
/// first match.
pub fn extract_discontinuous(
    corpus: &ParallelCorpus,
    connectives: &[String],
    direction: Direction,
) -> ObservationTable {
    let mut observations = ObservationTable::new();
    for pair in corpus.pairs() {
        let probe_tokens = pair.tokens(direction);
        let other_tokens = pair.tokens(direction.opposite());
        for connective in connectives {
            let Some(spans) = locate_discontinuous(probe_tokens, connective) else {
                continue;
            };
            let aligned = project(&spans, &pair.alignment, other_tokens, direction);
            trace!(connective = %connective, aligned = %aligned, "discontinuous occurrence");
            observations.entry(connective.clone()).or_default().push(aligned);
        }
    }
    observations
}
