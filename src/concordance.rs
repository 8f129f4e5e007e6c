use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::corpus::ParallelCorpus;
use crate::error::{Error, Result};
use crate::mining::span::contains_connective;
use crate::types::alignment_data::Direction;

/// Sentences longer than this are skipped by default; they are hard to read
/// when checking a connective pair by hand.
pub const DEFAULT_MAX_TOKENS: usize = 25;

/// A sentence pair that contains both connectives, with one sentence of
/// context on either side.
#[derive(Debug, Clone, PartialEq)]
pub struct ConcordanceLine {
    pub sentence: usize,
    pub source: String,
    pub target: String,
}

impl std::fmt::Display for ConcordanceLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ||| {}", self.source, self.target)
    }
}

/// Every sentence pair whose source contains `source_conn` and whose target
/// contains `target_conn`.
pub fn find_examples(
    corpus: &ParallelCorpus,
    source_conn: &str,
    target_conn: &str,
    max_tokens: usize,
) -> Vec<ConcordanceLine> {
    let pairs = corpus.pairs();
    let sentence = |tokens: &[String]| tokens.join(" ");
    let with_context = |index: usize, side: Direction| {
        let mut parts = Vec::with_capacity(3);
        if let Some(previous) = index.checked_sub(1).and_then(|i| pairs.get(i)) {
            parts.push(sentence(previous.tokens(side)));
        }
        parts.push(sentence(pairs[index].tokens(side)));
        if let Some(next) = pairs.get(index + 1) {
            parts.push(sentence(next.tokens(side)));
        }
        parts.retain(|part| !part.is_empty());
        parts.join(" ")
    };

    pairs
        .iter()
        .enumerate()
        .filter(|(_, pair)| pair.source.len() <= max_tokens && pair.target.len() <= max_tokens)
        .filter(|(_, pair)| {
            contains_connective(&pair.source, source_conn) && contains_connective(&pair.target, target_conn)
        })
        .map(|(index, _)| ConcordanceLine {
            sentence: index + 1,
            source: with_context(index, Direction::Source),
            target: with_context(index, Direction::Target),
        })
        .collect()
}

/// `"so dass"` + `"de sorte que"` → `so_dass-de_sorte_que.txt`
pub fn examples_file_name(source_conn: &str, target_conn: &str) -> String {
    let underscore = |conn: &str| conn.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{}-{}.txt", underscore(source_conn), underscore(target_conn))
}

/// Writes the examples into `dir`, one blank-line separated block each.
///
/// Returns `None` without touching the filesystem when there is nothing to write.
pub fn write_examples(
    dir: &Path,
    source_conn: &str,
    target_conn: &str,
    lines: &[ConcordanceLine],
) -> Result<Option<PathBuf>> {
    if lines.is_empty() {
        return Ok(None);
    }
    fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    let path = dir.join(examples_file_name(source_conn, target_conn));
    let content: String = lines.iter().map(|line| format!("{}\n\n", line)).collect();
    fs::write(&path, content).map_err(|e| Error::io(&path, e))?;
    info!(examples = lines.len(), path = %path.display(), "wrote concordance");
    Ok(Some(path))
}
