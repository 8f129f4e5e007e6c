use std::collections::BTreeMap;

use crate::types::tables::{is_ascii_punctuation, CountTable, ObservationTable, ProbabilityTable};

/// Tallies the observations of every connective in `lexicon`.
///
/// Connectives without observations are left out: no evidence this round.
pub fn count(observations: &ObservationTable, lexicon: &[String]) -> CountTable {
    lexicon
        .iter()
        .filter_map(|connective| {
            observations
                .get(connective)
                .map(|values| (connective.clone(), tally(values)))
        })
        .collect()
}

/// Relative frequency of each aligned value per connective.
pub fn probabilities(observations: &ObservationTable) -> ProbabilityTable {
    observations
        .iter()
        .map(|(connective, values)| {
            let counts = tally(values);
            let total: usize = counts.values().sum();
            let distribution = counts
                .into_iter()
                .map(|(value, n)| (value, n as f64 / total as f64))
                .collect();
            (connective.clone(), distribution)
        })
        .collect()
}

/// Replaces values that are a single ASCII punctuation character with `""`.
///
/// ", weil" stays as it is; a bare "," counts as no alignment.
pub fn normalize_punctuation(observations: ObservationTable) -> ObservationTable {
    observations
        .into_iter()
        .map(|(connective, values)| {
            let values = values
                .into_iter()
                .map(|value| if is_ascii_punctuation(&value) { String::new() } else { value })
                .collect();
            (connective, values)
        })
        .collect()
}

fn tally(values: &[String]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for value in values {
        *counts.entry(value.clone()).or_insert(0) += 1;
    }
    counts
}
