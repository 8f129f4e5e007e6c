//! DimLex / LiCo connective lexicons.
//!
//! Both lexicons share one layout; only the parts read here are modelled:
//!
//! ```xml
//! <dimlex>
//!   <entry word="wenn auch">
//!     <orths>
//!       <orth type="cont"><part type="phrasal">wenn auch</part></orth>
//!       <orth type="discont"><part>wenn</part><part>auch</part></orth>
//!     </orths>
//!     <syn><sem><pdtb3_relation sense="Comparison.Concession"/></sem></syn>
//!   </entry>
//! </dimlex>
//! ```

use serde::Deserialize;

use super::lexicon::normalize_part;
use crate::mining::lexicon::Lexicon;
use crate::relations::RelationMap;
use crate::types::tables::DISCONTINUOUS_SEPARATOR;

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(rename = "entry", default)]
    entries: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    #[serde(default)]
    orths: Orths,
    #[serde(default)]
    syn: Vec<Syn>,
}

#[derive(Debug, Default, Deserialize)]
struct Orths {
    #[serde(rename = "orth", default)]
    variants: Vec<Orth>,
}

#[derive(Debug, Deserialize)]
struct Orth {
    #[serde(rename = "@type", default)]
    kind: String,
    #[serde(rename = "part", default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(rename = "$text", default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct Syn {
    #[serde(default)]
    sem: Vec<Sem>,
}

#[derive(Debug, Deserialize)]
struct Sem {
    #[serde(rename = "pdtb3_relation", default)]
    relations: Vec<Relation>,
}

#[derive(Debug, Deserialize)]
struct Relation {
    #[serde(rename = "@sense")]
    sense: Option<String>,
}

impl Entry {
    /// Continuous variants first, then discontinuous ones, each list
    /// de-duplicated after normalization.
    fn connectives(&self) -> Vec<String> {
        let continuous = self
            .orths
            .variants
            .iter()
            .filter(|orth| orth.kind == "cont")
            .flat_map(|orth| orth.parts.iter().map(|part| normalize_part(&part.text)));
        let discontinuous = self
            .orths
            .variants
            .iter()
            .filter(|orth| orth.kind == "discont")
            .map(|orth| {
                orth.parts
                    .iter()
                    .map(|part| normalize_part(&part.text))
                    .collect::<Vec<_>>()
                    .join(DISCONTINUOUS_SEPARATOR)
            });

        let mut connectives: Vec<String> = Vec::new();
        for connective in continuous.chain(discontinuous) {
            if !connective.is_empty() && !connectives.contains(&connective) {
                connectives.push(connective);
            }
        }
        connectives
    }

    fn senses(&self) -> impl Iterator<Item = &str> {
        self.syn
            .iter()
            .flat_map(|syn| &syn.sem)
            .flat_map(|sem| &sem.relations)
            .filter_map(|relation| relation.sense.as_deref())
    }
}

fn parse_document(content: &str) -> Result<Document, quick_xml::DeError> {
    quick_xml::de::from_str(content)
}

/// Every connective of the lexicon, lower-cased and tokenized, first
/// occurrence kept.
pub fn parse_xml_lexicon(content: &str) -> Result<Lexicon, quick_xml::DeError> {
    let document = parse_document(content)?;
    let mut lexicon = Lexicon::new();
    for connective in document.entries.iter().flat_map(Entry::connectives) {
        if !lexicon.contains(&connective) {
            lexicon.push(connective);
        }
    }
    Ok(lexicon)
}

/// Connective → the PDTB 3 senses listed for its entries.
///
/// A sense is listed once per connective even when several entries or
/// readings repeat it.
pub fn parse_xml_relations(content: &str) -> Result<RelationMap, quick_xml::DeError> {
    let document = parse_document(content)?;
    let mut relations = RelationMap::new();
    for entry in &document.entries {
        let senses: Vec<&str> = entry.senses().collect();
        if senses.is_empty() {
            continue;
        }
        for connective in entry.connectives() {
            let listed = relations.entry(connective).or_default();
            for sense in &senses {
                if !listed.iter().any(|known| known == sense) {
                    listed.push(sense.to_string());
                }
            }
        }
    }
    Ok(relations)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<dimlex>
  <entry id="k1" word="obwohl">
    <orths>
      <orth type="cont" canonical="1"><part type="single">Obwohl</part></orth>
      <orth type="cont" canonical="0"><part type="single">obwohl</part></orth>
    </orths>
    <ambiguity><non_conn>0</non_conn></ambiguity>
    <syn>
      <cat>subordinator</cat>
      <sem><pdtb3_relation sense="Comparison.Concession.Arg2-as-denier"/></sem>
    </syn>
    <syn>
      <cat>adverb</cat>
      <sem><pdtb3_relation sense="Comparison.Concession.Arg2-as-denier"/></sem>
    </syn>
  </entry>
  <entry id="k2" word="wenn auch">
    <orths>
      <orth type="cont"><part type="phrasal">wenn auch</part></orth>
      <orth type="discont"><part type="phrasal">Wenn</part><part type="phrasal">auch</part></orth>
    </orths>
    <syn>
      <sem>
        <pdtb3_relation sense="Comparison.Concession"/>
        <pdtb3_relation sense="Contingency.Condition"/>
      </sem>
    </syn>
  </entry>
  <entry id="k3" word="d'abord">
    <orths><orth type="cont"><part type="single">d'abord</part></orth></orths>
  </entry>
</dimlex>
"#;

    #[test]
    fn reads_continuous_and_discontinuous_variants() {
        let lexicon = parse_xml_lexicon(FIXTURE).unwrap();
        assert_eq!(
            lexicon.entries(),
            &["obwohl", "wenn auch", "wenn ... auch", "d ' abord"]
        );
    }

    #[test]
    fn reads_relations_per_connective() {
        let relations = parse_xml_relations(FIXTURE).unwrap();
        assert_eq!(relations["obwohl"], vec!["Comparison.Concession.Arg2-as-denier"]);
        assert_eq!(
            relations["wenn ... auch"],
            vec!["Comparison.Concession", "Contingency.Condition"]
        );
        assert!(!relations.contains_key("d ' abord"));
    }

    #[test]
    fn malformed_xml_is_an_error() {
        assert!(parse_xml_lexicon("<dimlex><entry>").is_err());
    }
}
