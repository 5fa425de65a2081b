//! Bulk indexing: header-probe every `.sgf` file under the configured
//! directories and reconcile the catalog with what was found. Per-file
//! failures are logged and counted, never fatal; one pass owns the
//! catalog while it runs.

use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use glob::{glob_with, MatchOptions, Pattern};
use serde::Serialize;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use sgf_core::header;

use crate::catalog::{Catalog, GameRecord};
use crate::config::{normalize_path, Config};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexPhase {
    Scanning,
    Indexing,
    Cleanup,
    Complete,
}

/// Running counters for one indexing pass. The value reported at
/// `Complete` doubles as the run summary.
#[derive(Debug, Clone, Serialize)]
pub struct IndexProgress {
    pub phase: IndexPhase,
    pub files_scanned: usize,
    pub files_indexed: usize,
    pub files_skipped: usize,
    pub files_removed: usize,
    pub current_file: Option<String>,
}

impl IndexProgress {
    fn new() -> Self {
        Self {
            phase: IndexPhase::Scanning,
            files_scanned: 0,
            files_indexed: 0,
            files_skipped: 0,
            files_removed: 0,
            current_file: None,
        }
    }
}

/// Run one indexing pass through every [`IndexPhase`]. Already-indexed
/// files are skipped by id; records whose files disappeared since the
/// last pass are removed. `report` is invoked after every counter
/// change and at each phase transition.
pub fn index_all(
    config: &Config,
    catalog: &mut Catalog,
    mut report: impl FnMut(&IndexProgress),
) -> IndexProgress {
    let mut progress = IndexProgress::new();

    info!(
        directories = config.sgf_directories.len(),
        "Scanning for SGF files"
    );
    let mut found: Vec<String> = Vec::new();
    for dir in &config.sgf_directories {
        for path in scan_directory(dir) {
            progress.files_scanned += 1;
            progress.current_file = Some(path.clone());
            report(&progress);
            found.push(path);
        }
    }

    progress.phase = IndexPhase::Indexing;
    info!(files = found.len(), "Indexing scanned files");
    let mut seen: HashSet<String> = HashSet::with_capacity(found.len());
    for path in &found {
        progress.current_file = Some(path.clone());
        let id = file_id(path);
        if !seen.insert(id.clone()) {
            // Same file reached through more than one scan root.
            progress.files_skipped += 1;
            report(&progress);
            continue;
        }
        if catalog.contains(&id) {
            progress.files_skipped += 1;
            report(&progress);
            continue;
        }
        match header::extract_file(Path::new(path)) {
            Ok(Some(metadata)) => {
                let played_at = metadata.date.as_deref().and_then(parse_sgf_date);
                catalog.insert(GameRecord {
                    id,
                    file_path: path.clone(),
                    played_at,
                    date: metadata.date.unwrap_or_default(),
                    event: metadata.event.unwrap_or_default(),
                    round: metadata.round.unwrap_or_default(),
                    black_player: metadata.black_player.unwrap_or_default(),
                    white_player: metadata.white_player.unwrap_or_default(),
                    black_rank: metadata.black_rank.unwrap_or_default(),
                    white_rank: metadata.white_rank.unwrap_or_default(),
                    komi: metadata.komi.unwrap_or_default(),
                    result: metadata.result.unwrap_or_default(),
                    black_wins: metadata.black_wins,
                    white_wins: metadata.white_wins,
                });
                progress.files_indexed += 1;
            }
            Ok(None) => {
                debug!(path = %path, "Not a game record, skipping");
                progress.files_skipped += 1;
            }
            Err(e) => {
                warn!(path = %path, error = %e, "Failed to read file, skipping");
                progress.files_skipped += 1;
            }
        }
        report(&progress);
    }

    progress.phase = IndexPhase::Cleanup;
    progress.current_file = None;
    let stale: Vec<String> = catalog
        .ids()
        .filter(|id| !seen.contains(id.as_str()))
        .cloned()
        .collect();
    for id in &stale {
        catalog.remove(id);
        progress.files_removed += 1;
        report(&progress);
    }
    if !stale.is_empty() {
        info!(removed = stale.len(), "Removed records for missing files");
    }

    progress.phase = IndexPhase::Complete;
    report(&progress);
    info!(
        scanned = progress.files_scanned,
        indexed = progress.files_indexed,
        skipped = progress.files_skipped,
        removed = progress.files_removed,
        "Indexing complete"
    );
    progress
}

/// All `.sgf` files under `dir`, recursively, extension matched
/// case-insensitively. Unreadable subpaths are logged and skipped.
/// Sorted for a deterministic indexing order.
fn scan_directory(dir: &str) -> Vec<String> {
    let pattern = format!("{}/**/*.sgf", Pattern::escape(dir));
    let options = MatchOptions {
        case_sensitive: false,
        ..MatchOptions::new()
    };

    let paths = match glob_with(&pattern, options) {
        Ok(paths) => paths,
        Err(e) => {
            warn!(directory = %dir, error = %e, "Invalid scan pattern, skipping directory");
            return Vec::new();
        }
    };

    let mut files = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) if path.is_file() => {
                files.push(normalize_path(&path.to_string_lossy()));
            }
            Ok(_) => {} // a directory that happens to end in .sgf
            Err(e) => warn!(error = %e, "Unreadable path during scan, skipping"),
        }
    }
    files.sort();
    files
}

/// Stable record id: SHA-256 hex of the normalized path.
pub fn file_id(path: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(path.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Parse an SGF `DT` value with partial-date tolerance: `YYYY`,
/// `YYYY-MM`, or `YYYY-MM-DD`. Anything else counts as no date.
pub fn parse_sgf_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.trim().splitn(3, '-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = match parts.next() {
        Some(m) => m.parse().ok()?,
        None => 1,
    };
    let day: u32 = match parts.next() {
        Some(d) => d.parse().ok()?,
        None => 1,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}
