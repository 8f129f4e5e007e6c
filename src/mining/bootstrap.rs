//! The two-directional bootstrap that grows both connective lexicons.
//!
//! Rounds alternate between probing the source lexicon and probing the
//! target lexicon. Every round resolves the probe connectives against the
//! corpus, scores the aligned values, keeps the ones that clear the
//! thresholds, and hands the new values to the opposite language as its
//! next probe set:
//!
//! ```text
//! round 1   source seeds ──▶ harvest target candidates
//! round 2   full target lexicon ──▶ harvest source candidates
//! round 3   round-2 harvest ──▶ harvest target candidates
//! ...       until round == limit
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::evidence::{count, normalize_punctuation, probabilities};
use super::filter::{exclude_words, filter, filter_by_count};
use super::lexicon::Lexicon;
use super::phrases::{extract_discontinuous, extract_phrases, lookup_single_words};
use super::word_index::WordAlignmentIndex;
use crate::config::RoundParams;
use crate::corpus::ParallelCorpus;
use crate::error::Result;
use crate::types::alignment_data::Direction;
use crate::types::tables::{ConnectiveShape, CountTable, ProbabilityTable};

/// Everything the session keeps for one language.
#[derive(Debug, Clone, Default)]
pub struct LanguageSide {
    pub code: String,
    pub lexicon: Lexicon,
    /// This language's tokens → aligned strings in the other language.
    pub index: WordAlignmentIndex,
    /// Cumulative counts for connectives of this language.
    pub counts: CountTable,
    /// Filtered probabilities for connectives of this language.
    pub probabilities: ProbabilityTable,
    /// Single words of this language that are never accepted as aligned values.
    pub excluded_values: BTreeSet<String>,
}

impl LanguageSide {
    pub fn new(code: impl Into<String>, lexicon: Lexicon, index: WordAlignmentIndex) -> Self {
        Self {
            code: code.into(),
            lexicon,
            index,
            ..Self::default()
        }
    }

    pub fn with_excluded_values(mut self, excluded: BTreeSet<String>) -> Self {
        self.excluded_values = excluded;
        self
    }
}

/// What one round did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundReport {
    pub round: usize,
    pub direction: Direction,
    pub probed: usize,
    pub harvested: Vec<String>,
}

/// One mining session over a fixed corpus.
#[derive(Debug, Clone)]
pub struct Session {
    corpus: ParallelCorpus,
    source: LanguageSide,
    target: LanguageSide,
    round: usize,
    history: Vec<RoundReport>,
}

impl Session {
    pub fn new(corpus: ParallelCorpus, source: LanguageSide, target: LanguageSide) -> Self {
        Self {
            corpus,
            source,
            target,
            round: 0,
            history: Vec::new(),
        }
    }

    pub fn side(&self, direction: Direction) -> &LanguageSide {
        match direction {
            Direction::Source => &self.source,
            Direction::Target => &self.target,
        }
    }

    /// The probed side first, the opposite side second.
    fn sides_mut(&mut self, direction: Direction) -> (&mut LanguageSide, &mut LanguageSide) {
        match direction {
            Direction::Source => (&mut self.source, &mut self.target),
            Direction::Target => (&mut self.target, &mut self.source),
        }
    }

    pub fn round(&self) -> usize {
        self.round
    }

    pub fn history(&self) -> &[RoundReport] {
        &self.history
    }

    /// Runs the bootstrap starting from a `"source"` / `"target"` token.
    ///
    /// Any other token leaves the session untouched.
    pub fn find_connectives(&mut self, lang: &str, params: &RoundParams) -> Result<()> {
        match Direction::parse(lang) {
            Some(direction) => self.run(direction, params),
            None => {
                debug!(lang, "unrecognized direction, nothing to do");
                Ok(())
            }
        }
    }

    /// Runs rounds until the round counter reaches `params.limit`, starting
    /// from the full lexicon of `start`.
    pub fn run(&mut self, start: Direction, params: &RoundParams) -> Result<()> {
        self.run_with_probe(start, &[], params)
    }

    /// Like [`Session::run`], but the first round probes only `initial_probe`.
    ///
    /// An empty list means the full lexicon of `start`.
    pub fn run_with_probe(&mut self, start: Direction, initial_probe: &[String], params: &RoundParams) -> Result<()> {
        params.validate()?;
        let mut direction = start;
        let mut probe: Vec<String> = initial_probe.to_vec();

        while self.round < params.limit {
            self.round += 1;
            let harvested = self.run_round(direction, &probe, params);
            // The first round only reaches the seeds it was handed; give the
            // next round the complete opposite lexicon.
            probe = if self.round == 1 {
                self.side(direction.opposite()).lexicon.unique()
            } else {
                harvested
            };
            direction = direction.opposite();
        }

        info!(
            rounds = self.round,
            source_lexicon = self.source.lexicon.len(),
            target_lexicon = self.target.lexicon.len(),
            "bootstrap finished"
        );
        Ok(())
    }

    /// One extraction, scoring and harvest cycle. Returns the new connectives
    /// added to the opposite lexicon, sorted.
    fn run_round(&mut self, direction: Direction, probe: &[String], params: &RoundParams) -> Vec<String> {
        let probe: Vec<String> = if probe.is_empty() {
            self.side(direction).lexicon.unique()
        } else {
            probe.to_vec()
        };

        let mut words = Vec::new();
        let mut phrases = Vec::new();
        let mut discontinuous = Vec::new();
        for connective in &probe {
            match ConnectiveShape::classify(connective) {
                Some(ConnectiveShape::SingleWord) => words.push(connective.clone()),
                Some(ConnectiveShape::Phrase) => phrases.push(connective.clone()),
                Some(ConnectiveShape::Discontinuous) => discontinuous.push(connective.clone()),
                None => warn!(connective = %connective, "skipping blank connective"),
            }
        }
        debug!(
            round = self.round,
            words = words.len(),
            phrases = phrases.len(),
            discontinuous = discontinuous.len(),
            "probe partitioned"
        );

        let word_observations = lookup_single_words(&self.side(direction).index, &words);
        let phrase_observations = extract_phrases(&self.corpus, &phrases, direction);
        let discontinuous_observations = extract_discontinuous(&self.corpus, &discontinuous, direction);

        let mut round_counts = count(&word_observations, &words);
        round_counts.extend(count(&phrase_observations, &phrases));
        round_counts.extend(count(&discontinuous_observations, &discontinuous));

        let mut observations = word_observations;
        observations.extend(phrase_observations);
        observations.extend(discontinuous_observations);

        let round = self.round;
        let (probed, opposite) = self.sides_mut(direction);
        probed.counts.extend(round_counts);

        let scored = probabilities(&normalize_punctuation(observations));
        let scored = filter(scored, params.word_threshold, params.phrase_threshold);
        let scored = filter_by_count(scored, &probed.counts, params.word_min_count, params.phrase_min_count);
        let scored = exclude_words(scored, &opposite.excluded_values);

        let harvested: BTreeSet<String> = scored
            .values()
            .flat_map(|values| values.keys())
            .filter(|value| !value.is_empty() && !opposite.lexicon.contains(value))
            .cloned()
            .collect();

        probed.probabilities.extend(scored);
        opposite.lexicon.extend(harvested.iter().cloned());

        let harvested: Vec<String> = harvested.into_iter().collect();
        info!(
            round,
            direction = %direction,
            probed = probe.len(),
            harvested = harvested.len(),
            "bootstrap round"
        );
        self.history.push(RoundReport {
            round,
            direction,
            probed: probe.len(),
            harvested: harvested.clone(),
        });
        harvested
    }
}
