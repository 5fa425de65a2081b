//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SgfError {
    /// Content does not begin with the `(;` game-tree marker. Expected
    /// for non-SGF files; callers treat it as "skip", not as a fault.
    #[error("not an SGF game record")]
    NotARecord,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Grammar violation during the full parse. `offset` is the byte
    /// position of the first violation.
    #[error("malformed SGF at byte {offset}: {reason}")]
    MalformedRecord { offset: usize, reason: &'static str },

    /// A replayed move lies outside the board. Never silently clamped.
    #[error("move {move_index}: point ({x}, {y}) is outside the {size}x{size} board")]
    OutOfBounds {
        x: usize,
        y: usize,
        size: usize,
        move_index: usize,
    },
}
