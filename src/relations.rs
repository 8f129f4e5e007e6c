use std::collections::BTreeMap;

use crate::types::tables::ProbabilityTable;

/// Connective → discourse relations it can signal (e.g. PDTB senses).
pub type RelationMap = BTreeMap<String, Vec<String>>;

/// Labels connectives of a probability table with their discourse relations.
///
/// Keys found in `source_relations` and aligned values found in
/// `target_relations` become `"word (rel1, rel2)"`. The probabilities are
/// untouched; the result is meant for reading, not for further mining.
pub fn annotate(
    table: &ProbabilityTable,
    source_relations: &RelationMap,
    target_relations: &RelationMap,
) -> ProbabilityTable {
    table
        .iter()
        .map(|(connective, values)| {
            let values = values
                .iter()
                .map(|(value, probability)| (label(value, target_relations), *probability))
                .collect();
            (label(connective, source_relations), values)
        })
        .collect()
}

fn label(word: &str, relations: &RelationMap) -> String {
    match relations.get(word) {
        Some(senses) if !senses.is_empty() => format!("{} ({})", word, senses.join(", ")),
        _ => word.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_both_sides() {
        let mut table = ProbabilityTable::new();
        table.insert(
            "obwohl".to_string(),
            BTreeMap::from([("sebbene".to_string(), 0.8), ("ma".to_string(), 0.2)]),
        );
        let source = RelationMap::from([("obwohl".to_string(), vec!["concession".to_string()])]);
        let target = RelationMap::from([(
            "sebbene".to_string(),
            vec!["concession".to_string(), "contrast".to_string()],
        )]);

        let annotated = annotate(&table, &source, &target);
        let values = &annotated["obwohl (concession)"];
        assert_eq!(values["sebbene (concession, contrast)"], 0.8);
        assert_eq!(values["ma"], 0.2);
    }

    #[test]
    fn empty_maps_leave_table_unchanged() {
        let mut table = ProbabilityTable::new();
        table.insert("aber".to_string(), BTreeMap::from([("ma".to_string(), 1.0)]));
        assert_eq!(annotate(&table, &RelationMap::new(), &RelationMap::new()), table);
    }
}
