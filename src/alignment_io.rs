use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Error, Result};
use crate::mining::lexicon::Lexicon;
use crate::mining::word_index::WordAlignmentIndex;
use crate::parsing::dimlex::{parse_xml_lexicon, parse_xml_relations};
use crate::parsing::lexicon::parse_text_lexicon;
use crate::relations::RelationMap;

/// `{src}_{tgt}_word_alignment.json`
pub fn word_alignment_file_name(from: &str, to: &str) -> String {
    format!("{}_{}_word_alignment.json", from, to)
}

/// `{src}_{tgt}_connectives_alignment.json`
pub fn connectives_file_name(from: &str, to: &str) -> String {
    format!("{}_{}_connectives_alignment.json", from, to)
}

/// `{src}_{tgt}_connectives_count.json`
pub fn counts_file_name(from: &str, to: &str) -> String {
    format!("{}_{}_connectives_count.json", from, to)
}

/// `{src}_{tgt}_rounds.json`
pub fn rounds_file_name(from: &str, to: &str) -> String {
    format!("{}_{}_rounds.json", from, to)
}

/// `{lang}_lexicon.json`
pub fn lexicon_file_name(lang: &str) -> String {
    format!("{}_lexicon.json", lang)
}

/// Writes `value` as pretty JSON (four-space indent, non-ASCII kept as is).
///
/// The file is written to a temporary sibling first and then moved into
/// place, so an interrupted run never leaves a truncated table behind.
pub fn save_json<T: Serialize + ?Sized>(file_path: &Path, value: &T) -> Result<()> {
    let parent_dir = match file_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&parent_dir).map_err(|e| Error::io(&parent_dir, e))?;

    let temp_file = NamedTempFile::new_in(&parent_dir).map_err(|e| Error::io(&parent_dir, e))?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(b"    "));
        value
            .serialize(&mut serializer)
            .map_err(|e| Error::json(file_path, e))?;
        writer.write_all(b"\n").map_err(|e| Error::io(file_path, e))?;
        writer.flush().map_err(|e| Error::io(file_path, e))?;
    }
    temp_file
        .persist(file_path)
        .map_err(|e| Error::io(file_path, e.error))?;
    debug!(path = %file_path.display(), "saved JSON");
    Ok(())
}

pub fn load_json<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let file = File::open(file_path).map_err(|e| Error::io(file_path, e))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| Error::json(file_path, e))
}

pub fn load_word_index(file_path: &Path) -> Result<WordAlignmentIndex> {
    load_json(file_path)
}

fn has_extension(file_path: &Path, wanted: &str) -> bool {
    file_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(wanted))
}

fn read_to_string(file_path: &Path) -> Result<String> {
    fs::read_to_string(file_path).map_err(|e| Error::io(file_path, e))
}

/// Loads a seed lexicon: a JSON array for `.json` files, a DimLex/LiCo
/// lexicon for `.xml` files, the one-per-line text format otherwise.
pub fn load_lexicon(file_path: &Path) -> Result<Lexicon> {
    if has_extension(file_path, "json") {
        let entries: Vec<String> = load_json(file_path)?;
        return Ok(entries.into_iter().collect());
    }
    let content = read_to_string(file_path)?;
    if has_extension(file_path, "xml") {
        return parse_xml_lexicon(&content).map_err(|e| Error::xml(file_path, e));
    }
    Ok(parse_text_lexicon(&content))
}

/// Loads connective → relations: the PDTB 3 senses of a DimLex/LiCo `.xml`
/// lexicon, or a JSON object otherwise.
pub fn load_relations(file_path: &Path) -> Result<RelationMap> {
    if has_extension(file_path, "xml") {
        let content = read_to_string(file_path)?;
        return parse_xml_relations(&content).map_err(|e| Error::xml(file_path, e));
    }
    load_json(file_path)
}
