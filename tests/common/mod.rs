//! Shared fixtures for the integration tests.

// Not every test binary uses every fixture.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// A dated tournament game with a full header and a few moves.
pub const DATED_RECORD: &str = "(;GM[1]FF[4]SZ[19]PB[Kaoru Iwamoto]BR[7d]\
PW[Riichi Sekiyama]WR[8d]EV[Honinbo]RO[2]DT[1941-06-21]KM[0]RE[W+2];B[pd];W[dp];B[pq])";

/// A record with no date and no event.
pub const UNDATED_RECORD: &str = "(;GM[1]SZ[9]PB[Alice]PW[Bob]RE[B+R];B[aa];W[bb])";

/// Black surrounds a lone white stone at (1,1) and fills its last
/// liberty with the final move.
pub const CAPTURE_RECORD: &str = "(;SZ[9];B[ba];W[bb];B[ab];W[hh];B[cb];W[hg];B[bc])";

/// One branch point with two variations; the main line is aa, bb, cc.
pub const BRANCHED_RECORD: &str = "(;SZ[9];B[aa](;W[bb];B[cc])(;W[dd]))";

/// Not a game record at all, stored with the .sgf extension.
pub const NOT_A_RECORD: &str = "[Event \"this is a pgn\"]\n1. e4 e5\n";

/// Write `content` as `name` under `dir`, creating parent directories.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}
