use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::projector::render;
use crate::corpus::ParallelCorpus;
use crate::types::alignment_data::SentencePair;

/// Token (or aligned unit) → every surface string it aligned to, one entry
/// per occurrence. An empty string records an unaligned occurrence.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WordAlignmentIndex {
    entries: BTreeMap<String, Vec<String>>,
}

impl WordAlignmentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, key: impl Into<String>, aligned: impl Into<String>) {
        self.entries.entry(key.into()).or_default().push(aligned.into());
    }

    pub fn lookup(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<BTreeMap<String, Vec<String>>> for WordAlignmentIndex {
    fn from(entries: BTreeMap<String, Vec<String>>) -> Self {
        Self { entries }
    }
}

/// Builds the source→target and target→source indexes from a corpus.
pub fn build_indexes(corpus: &ParallelCorpus) -> (WordAlignmentIndex, WordAlignmentIndex) {
    let mut source_index = WordAlignmentIndex::new();
    let mut target_index = WordAlignmentIndex::new();
    let mut dropped_units = 0usize;

    for pair in corpus.pairs() {
        record_unaligned(pair, &mut source_index, &mut target_index);

        let (source_units, target_units, dropped) = reconciled_units(pair);
        dropped_units += dropped;

        for (source_positions, target_positions) in &source_units {
            source_index.record(
                render(source_positions, &pair.source),
                render(target_positions, &pair.target),
            );
        }
        for (source_positions, target_positions) in &target_units {
            target_index.record(
                render(target_positions, &pair.target),
                render(source_positions, &pair.source),
            );
        }
    }

    if dropped_units > 0 {
        debug!(dropped_units, "dropped asymmetric alignment units");
    }
    info!(
        source_keys = source_index.len(),
        target_keys = target_index.len(),
        "built word-alignment indexes"
    );
    (source_index, target_index)
}

fn record_unaligned(pair: &SentencePair, source_index: &mut WordAlignmentIndex, target_index: &mut WordAlignmentIndex) {
    let aligned_source: BTreeSet<usize> = pair.alignment.iter().map(|p| p.source).collect();
    let aligned_target: BTreeSet<usize> = pair.alignment.iter().map(|p| p.target).collect();
    for (position, token) in pair.source.iter().enumerate() {
        if !aligned_source.contains(&position) {
            source_index.record(token.as_str(), "");
        }
    }
    for (position, token) in pair.target.iter().enumerate() {
        if !aligned_target.contains(&position) {
            target_index.record(token.as_str(), "");
        }
    }
}

/// An alignment unit: source positions paired with target positions.
type Unit = (Vec<usize>, Vec<usize>);

/// Groups a sentence's links into units seen from both sides and drops the
/// units the two views disagree on.
///
/// The source view groups target positions by the source positions they
/// link to; the target view does the converse. Disagreeing units are only
/// dropped when both views have some, mirroring how one-sided noise is
/// tolerated. Returns the surviving units of each view and the number dropped.
fn reconciled_units(pair: &SentencePair) -> (Vec<Unit>, Vec<Unit>, usize) {
    let mut by_source: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    let mut by_target: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for link in &pair.alignment {
        by_source.entry(link.source).or_default().push(link.target);
        by_target.entry(link.target).or_default().push(link.source);
    }
    for positions in by_source.values_mut().chain(by_target.values_mut()) {
        positions.sort_unstable();
        positions.dedup();
    }

    let mut source_view: BTreeMap<Vec<usize>, Vec<usize>> = BTreeMap::new();
    for (target, sources) in &by_target {
        source_view.entry(sources.clone()).or_default().push(*target);
    }
    let mut target_view: BTreeMap<Vec<usize>, Vec<usize>> = BTreeMap::new();
    for (source, targets) in &by_source {
        target_view.entry(targets.clone()).or_default().push(*source);
    }

    let source_units: BTreeSet<Unit> = source_view.iter().map(|(s, t)| (s.clone(), t.clone())).collect();
    let target_units: BTreeSet<Unit> = target_view.iter().map(|(t, s)| (s.clone(), t.clone())).collect();
    let source_only: Vec<&Unit> = source_units.difference(&target_units).collect();
    let target_only: Vec<&Unit> = target_units.difference(&source_units).collect();

    let mut dropped = 0;
    if !source_only.is_empty() && !target_only.is_empty() {
        for (sources, _) in &source_only {
            source_view.remove(sources);
        }
        for (_, targets) in &target_only {
            target_view.remove(targets);
        }
        dropped = source_only.len() + target_only.len();
    }

    let source_units = source_view.into_iter().collect();
    let target_units = target_view.into_iter().map(|(t, s)| (s, t)).collect();
    (source_units, target_units, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(alignment: &str, source: &str, target: &str) -> ParallelCorpus {
        ParallelCorpus::parse(alignment, source, target).unwrap()
    }

    #[test]
    fn one_to_one_links_become_word_entries() {
        let (source, target) = build_indexes(&corpus("0-0 1-1 2-2", "obwohl es regnet", "although it rains"));
        assert_eq!(source.lookup("obwohl"), Some(&["although".to_string()][..]));
        assert_eq!(target.lookup("rains"), Some(&["regnet".to_string()][..]));
    }

    #[test]
    fn unaligned_tokens_record_empty_string() {
        let (source, target) = build_indexes(&corpus("0-0", "doch ja", "yet"));
        assert_eq!(source.lookup("ja"), Some(&[String::new()][..]));
        assert!(target.lookup("yet").is_some());
        assert_eq!(target.len(), 1);
    }

    #[test]
    fn one_to_many_links_form_phrase_units() {
        // "trotzdem" → "even so"
        let (source, target) = build_indexes(&corpus("0-0 0-1 1-2", "trotzdem ging", "even so went"));
        assert_eq!(source.lookup("trotzdem"), Some(&["even so".to_string()][..]));
        assert_eq!(target.lookup("even so"), Some(&["trotzdem".to_string()][..]));
    }

    #[test]
    fn gaps_inside_units_are_normalized() {
        let (source, _) = build_indexes(&corpus("0-0 0-2 1-1", "sowohl er", "both he and"));
        assert_eq!(source.lookup("sowohl"), Some(&["both ... and".to_string()][..]));
    }

    #[test]
    fn index_entries_keep_comma_before_gap() {
        let (source, _) = build_indexes(&corpus("0-0 0-1 0-5", "so", "a , x y z b"));
        assert_eq!(source.lookup("so"), Some(&["a , ... b".to_string()][..]));
    }

    #[test]
    fn asymmetric_units_are_dropped_when_both_views_disagree() {
        // source 0 links to targets 0,1; target 1 also links to source 1.
        let pair = corpus("0-0 0-1 1-1", "a b", "x y").pairs()[0].clone();
        let (source_units, target_units, dropped) = reconciled_units(&pair);
        assert!(dropped > 0);
        assert!(source_units.iter().all(|(s, _)| s != &vec![0, 1]));
        assert!(target_units.iter().all(|(_, t)| t != &vec![0, 1]));
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut index = WordAlignmentIndex::new();
        index.record("aber", "mais");
        index.record("aber", "");
        assert_eq!(serde_json::to_string(&index).unwrap(), r#"{"aber":["mais",""]}"#);
    }
}
