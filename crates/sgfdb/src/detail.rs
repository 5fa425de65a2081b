//! Single-record detail: the full-parse pipeline from file bytes to a
//! replayable move sequence. This is the other half of the two-tier
//! design; unlike the indexing probe it reads the whole file and fails
//! loudly.

use std::fs;
use std::path::Path;

use sgf_core::{Board, GameTree, MainLine, Move, PropertyMap, SgfError};

use crate::error::AppError;

/// Everything the detail and replay views need from one record.
#[derive(Debug)]
pub struct GameDetail {
    pub file_path: String,
    pub size: usize,
    pub moves: Vec<Move>,
    /// Root-node properties, including identifiers the indexer ignores.
    pub root_props: PropertyMap,
}

/// Read and fully parse one record from disk.
pub fn load(path: &Path) -> Result<GameDetail, AppError> {
    let bytes = fs::read(path).map_err(SgfError::Io)?;
    let content = String::from_utf8_lossy(&bytes);
    let tree = GameTree::parse(&content)?;
    let line = MainLine::from_tree(&tree);
    Ok(GameDetail {
        file_path: path.display().to_string(),
        size: line.size,
        moves: line.moves,
        root_props: tree.root().props.clone(),
    })
}

impl GameDetail {
    /// Board after the first `upto` moves; `None` replays everything.
    pub fn board_at(&self, upto: Option<usize>) -> Result<Board, SgfError> {
        let upto = upto.unwrap_or(self.moves.len());
        Board::replay(self.size, &self.moves, upto)
    }
}
