use std::collections::BTreeSet;

use crate::types::tables::{CountTable, ProbabilityTable, ValueKind};

/// Drops aligned values whose probability is below the threshold for their kind.
///
/// The empty "no alignment" value has no probability threshold.
pub fn filter(probabilities: ProbabilityTable, word_threshold: f64, phrase_threshold: f64) -> ProbabilityTable {
    retain_values(probabilities, |_, value, probability| match ValueKind::of(value) {
        ValueKind::Word => probability >= word_threshold,
        ValueKind::Phrase => probability >= phrase_threshold,
        ValueKind::Empty => true,
    })
}

/// Drops aligned values whose cumulative count is below the minimum for their kind.
///
/// Counts come from the direction's running count table; a value it has
/// never seen counts as zero. The empty value uses the phrase minimum.
pub fn filter_by_count(
    probabilities: ProbabilityTable,
    counts: &CountTable,
    word_min: usize,
    phrase_min: usize,
) -> ProbabilityTable {
    retain_values(probabilities, |connective, value, _| {
        let seen = counts
            .get(connective)
            .and_then(|values| values.get(value))
            .copied()
            .unwrap_or(0);
        match ValueKind::of(value) {
            ValueKind::Word => seen >= word_min,
            ValueKind::Phrase | ValueKind::Empty => seen >= phrase_min,
        }
    })
}

/// Drops single-word aligned values listed in `excluded`.
pub fn exclude_words(probabilities: ProbabilityTable, excluded: &BTreeSet<String>) -> ProbabilityTable {
    if excluded.is_empty() {
        return probabilities;
    }
    retain_values(probabilities, |_, value, _| {
        ValueKind::of(value) != ValueKind::Word || !excluded.contains(value)
    })
}

fn retain_values<F>(mut probabilities: ProbabilityTable, mut keep: F) -> ProbabilityTable
where
    F: FnMut(&str, &str, f64) -> bool,
{
    for (connective, values) in probabilities.iter_mut() {
        values.retain(|value, probability| keep(connective, value, *probability));
    }
    probabilities
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn table(raw: &[(&str, f64)]) -> ProbabilityTable {
        let values: BTreeMap<String, f64> = raw.iter().map(|(v, p)| (v.to_string(), *p)).collect();
        [("obwohl".to_string(), values)].into_iter().collect()
    }

    #[test]
    fn probability_thresholds_split_by_token_count() {
        let probs = table(&[("bien que", 0.015), ("quoique", 0.015), ("", 0.001)]);
        let filtered = filter(probs, 0.021, 0.014);
        let kept: Vec<&String> = filtered["obwohl"].keys().collect();
        assert_eq!(kept, vec!["", "bien que"]);
    }

    #[test]
    fn count_minimums_use_running_counts() {
        let probs = table(&[("bien que", 0.5), ("quoique", 0.5)]);
        let mut counts = CountTable::new();
        counts.insert(
            "obwohl".to_string(),
            [("bien que".to_string(), 10), ("quoique".to_string(), 19)].into_iter().collect(),
        );
        let filtered = filter_by_count(probs, &counts, 20, 10);
        assert_eq!(filtered["obwohl"].len(), 1);
        assert!(filtered["obwohl"].contains_key("bien que"));
    }

    #[test]
    fn connective_key_survives_empty_distribution() {
        let probs = table(&[("quoique", 0.5)]);
        let filtered = filter_by_count(probs, &CountTable::new(), 1, 1);
        assert!(filtered["obwohl"].is_empty());
    }

    #[test]
    fn excluded_words_only_hit_single_words() {
        let probs = table(&[("que", 0.4), ("bien que", 0.6)]);
        let excluded: BTreeSet<String> = ["que".to_string(), "bien que".to_string()].into_iter().collect();
        let filtered = exclude_words(probs, &excluded);
        assert_eq!(filtered["obwohl"].keys().collect::<Vec<_>>(), vec!["bien que"]);
    }
}
