//! Bounded header probe: lightweight regex-based metadata extraction.
//!
//! The bulk indexing path never builds a parse tree: it reads only the
//! first 1 KiB of a file and pattern-matches a fixed set of properties,
//! which conventionally precede the move data. Headers larger than the
//! probe window yield incomplete metadata; that trade-off is accepted
//! for throughput. Escapes (`\]`) are a full-parser concern and are not
//! honored here.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::SgfError;

/// How much of the file the probe reads.
pub const HEADER_PROBE_BYTES: u64 = 1024;

/// Flat metadata record extracted from a game-record header. All fields
/// are optional; `black_wins`/`white_wins` are derived from `result`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderMetadata {
    pub date: Option<String>,
    pub event: Option<String>,
    pub round: Option<String>,
    pub black_player: Option<String>,
    pub white_player: Option<String>,
    pub black_rank: Option<String>,
    pub white_rank: Option<String>,
    pub komi: Option<String>,
    pub result: Option<String>,
    pub black_wins: bool,
    pub white_wins: bool,
}

/// Probe a file for header metadata.
///
/// Returns `Ok(None)` when the content does not open with the `(;`
/// game-tree marker, a normal outcome for non-SGF files. An I/O failure
/// propagates as [`SgfError::Io`].
pub fn extract_file(path: &Path) -> Result<Option<HeaderMetadata>, SgfError> {
    let mut buf = Vec::with_capacity(HEADER_PROBE_BYTES as usize);
    File::open(path)?
        .take(HEADER_PROBE_BYTES)
        .read_to_end(&mut buf)?;

    // The probe may cut a multi-byte character at the window edge;
    // lossy decoding is fine for a header scan.
    let content = String::from_utf8_lossy(&buf);
    Ok(extract_content(&content))
}

/// Extract header metadata from in-memory content. `None` when the
/// trimmed content does not begin with `(;`. A leading UTF-8 BOM is
/// skipped first; `trim_start` does not treat U+FEFF as whitespace.
pub fn extract_content(content: &str) -> Option<HeaderMetadata> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    if !content.trim_start().starts_with("(;") {
        return None;
    }

    let mut metadata = HeaderMetadata {
        date: extract_property(content, "DT"),
        event: extract_property(content, "EV"),
        round: extract_property(content, "RO"),
        black_player: extract_property(content, "PB"),
        white_player: extract_property(content, "PW"),
        black_rank: extract_property(content, "BR"),
        white_rank: extract_property(content, "WR"),
        komi: extract_property(content, "KM"),
        result: extract_property(content, "RE"),
        ..HeaderMetadata::default()
    };

    if let Some(result) = &metadata.result {
        let upper = result.to_uppercase();
        metadata.black_wins = upper.starts_with("B+");
        metadata.white_wins = upper.starts_with("W+");
    }

    Some(metadata)
}

/// First `IDENT[...]` occurrence, case-insensitive, shortest run of
/// non-`]` characters. A malformed or absent property leaves the field
/// unset rather than failing the probe.
fn extract_property(content: &str, ident: &str) -> Option<String> {
    let pattern = format!(r"(?i){}\[([^\]]*)\]", regex::escape(ident));
    let re = Regex::new(&pattern).ok()?;
    let value = re.captures(content)?.get(1)?.as_str().trim().to_string();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
