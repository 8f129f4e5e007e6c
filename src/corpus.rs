use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{Error, Result};
use crate::parsing::pharaoh::parse_alignment_line;
use crate::types::alignment_data::SentencePair;

/// A word-aligned parallel corpus, tokenized once per session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParallelCorpus {
    pairs: Vec<SentencePair>,
}

impl ParallelCorpus {
    /// Reads the Pharaoh alignment file and the two line-aligned corpus files.
    pub fn load(alignment: &Path, source: &Path, target: &Path) -> Result<Self> {
        let alignment_text = read(alignment)?;
        let source_text = read(source)?;
        let target_text = read(target)?;
        let corpus = Self::parse(&alignment_text, &source_text, &target_text)?;
        info!(
            sentences = corpus.len(),
            alignment = %alignment.display(),
            "loaded parallel corpus"
        );
        Ok(corpus)
    }

    /// Builds a corpus from in-memory file contents.
    pub fn parse(alignment: &str, source: &str, target: &str) -> Result<Self> {
        let alignment_lines: Vec<&str> = alignment.lines().collect();
        let source_lines: Vec<&str> = source.lines().collect();
        let target_lines: Vec<&str> = target.lines().collect();
        if alignment_lines.len() != source_lines.len() || source_lines.len() != target_lines.len() {
            return Err(Error::CorpusMismatch {
                alignment: alignment_lines.len(),
                source_lines: source_lines.len(),
                target_lines: target_lines.len(),
            });
        }

        let mut pairs = Vec::with_capacity(source_lines.len());
        for (index, ((links, src), tgt)) in alignment_lines
            .iter()
            .zip(&source_lines)
            .zip(&target_lines)
            .enumerate()
        {
            let source = tokenize(src);
            let target = tokenize(tgt);
            let alignment = parse_alignment_line(index + 1, links, source.len(), target.len())?;
            pairs.push(SentencePair {
                source,
                target,
                alignment,
            });
        }
        Ok(Self { pairs })
    }

    /// Reads only the two corpus files; every sentence pair has an empty alignment.
    pub fn load_unaligned(source: &Path, target: &Path) -> Result<Self> {
        let source_text = read(source)?;
        let target_text = read(target)?;
        let source_lines: Vec<&str> = source_text.lines().collect();
        let target_lines: Vec<&str> = target_text.lines().collect();
        if source_lines.len() != target_lines.len() {
            return Err(Error::CorpusMismatch {
                alignment: 0,
                source_lines: source_lines.len(),
                target_lines: target_lines.len(),
            });
        }
        let pairs = source_lines
            .iter()
            .zip(&target_lines)
            .map(|(src, tgt)| SentencePair {
                source: tokenize(src),
                target: tokenize(tgt),
                alignment: Vec::new(),
            })
            .collect();
        Ok(Self { pairs })
    }

    /// Builds a corpus from sentence pairs assembled in memory.
    ///
    /// Every link is checked against its sentence lengths, the same contract
    /// the Pharaoh parser enforces on files.
    pub fn from_pairs(pairs: Vec<SentencePair>) -> Result<Self> {
        for (index, pair) in pairs.iter().enumerate() {
            check_links(index + 1, pair)?;
        }
        Ok(Self { pairs })
    }

    pub fn pairs(&self) -> &[SentencePair] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

pub fn tokenize(sentence: &str) -> Vec<String> {
    sentence.split_whitespace().map(String::from).collect()
}

fn check_links(line_no: usize, pair: &SentencePair) -> Result<()> {
    for link in &pair.alignment {
        let side = if link.source >= pair.source.len() {
            Some(("source", pair.source.len()))
        } else if link.target >= pair.target.len() {
            Some(("target", pair.target.len()))
        } else {
            None
        };
        if let Some((side, len)) = side {
            return Err(Error::malformed_alignment(
                line_no,
                format!("{}-{}", link.source, link.target),
                format!("{} index out of range for {} tokens", side, len),
            ));
        }
    }
    Ok(())
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::alignment_data::AlignmentPair;

    #[test]
    fn parses_line_aligned_inputs() {
        let corpus = ParallelCorpus::parse(
            "0-0 1-1 2-2\n0-0\n",
            "obwohl es regnet\nja\n",
            "although it rains\nyes\n",
        )
        .unwrap();
        assert_eq!(corpus.len(), 2);
        let first = &corpus.pairs()[0];
        assert_eq!(first.source, vec!["obwohl", "es", "regnet"]);
        assert_eq!(first.alignment[2], AlignmentPair::new(2, 2));
    }

    #[test]
    fn line_count_mismatch_is_fatal() {
        let err = ParallelCorpus::parse("0-0\n", "a\nb\n", "c\nd\n").unwrap_err();
        assert!(matches!(err, Error::CorpusMismatch { alignment: 1, .. }));
    }

    #[test]
    fn malformed_alignment_reports_line() {
        let err = ParallelCorpus::parse("0-0\n0-9\n", "a\nb\n", "c\nd\n").unwrap_err();
        assert!(matches!(err, Error::MalformedAlignment { line: 2, .. }));
    }

    #[test]
    fn in_memory_pairs_are_range_checked() {
        let pair = |alignment| SentencePair {
            source: vec!["auch".to_string(), "wenn".to_string()],
            target: vec!["même".to_string()],
            alignment,
        };
        let err = ParallelCorpus::from_pairs(vec![pair(vec![]), pair(vec![AlignmentPair::new(1, 5)])]).unwrap_err();
        assert!(matches!(err, Error::MalformedAlignment { line: 2, ref token, .. } if token == "1-5"));

        let corpus = ParallelCorpus::from_pairs(vec![pair(vec![AlignmentPair::new(1, 0)])]).unwrap();
        assert_eq!(corpus.len(), 1);
    }

    #[test]
    fn missing_file_is_fatal() {
        let missing = Path::new("/nonexistent/connalign/corpus.txt");
        let err = ParallelCorpus::load(missing, missing, missing).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
