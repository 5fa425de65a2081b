//! SGF (Smart Game Format) core engine.
//!
//! Two parsing tiers over the same record bytes: a bounded header probe
//! for bulk indexing ([`header`]) and a full tree parser for the detail
//! view ([`tree`]). The parsed tree is flattened into a main-line move
//! sequence ([`moves`]) which replays into a stone map with capture
//! counts ([`board`]).

pub mod board;
pub mod error;
pub mod header;
pub mod moves;
pub mod props;
pub mod tree;

pub use board::{Board, Cell};
pub use error::SgfError;
pub use header::HeaderMetadata;
pub use moves::{Label, MainLine, Move, MoveKind, Symbol, SymbolKind};
pub use props::{PropIdent, PropertyMap};
pub use tree::{GameTree, GameTreeNode, NodeId};
