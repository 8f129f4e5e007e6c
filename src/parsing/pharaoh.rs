use crate::error::{Error, Result};
use crate::types::alignment_data::AlignmentPair;

/// Parses one line of a Pharaoh alignment file (`0-0 1-2 2-1`).
///
/// `line_no` is 1-based and only used in error messages. Every index must
/// fall inside its sentence; a violation is fatal for the whole run.
pub fn parse_alignment_line(
    line_no: usize,
    text: &str,
    source_len: usize,
    target_len: usize,
) -> Result<Vec<AlignmentPair>> {
    text.split_whitespace()
        .map(|token| {
            let (source, target) = token
                .split_once('-')
                .ok_or_else(|| Error::malformed_alignment(line_no, token, "expected 'i-j'"))?;
            let source = parse_index(line_no, token, source)?;
            let target = parse_index(line_no, token, target)?;
            if source >= source_len {
                return Err(Error::malformed_alignment(
                    line_no,
                    token,
                    format!("source index out of range for {} tokens", source_len),
                ));
            }
            if target >= target_len {
                return Err(Error::malformed_alignment(
                    line_no,
                    token,
                    format!("target index out of range for {} tokens", target_len),
                ));
            }
            Ok(AlignmentPair::new(source, target))
        })
        .collect()
}

fn parse_index(line_no: usize, token: &str, raw: &str) -> Result<usize> {
    raw.parse::<usize>()
        .map_err(|e| Error::malformed_alignment(line_no, token, e.to_string()))
}
