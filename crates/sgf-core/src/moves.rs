//! Main-line move extraction.
//!
//! Flattens a parsed [`GameTree`] into one chronological move sequence
//! by always descending into the first child. Siblings past the first
//! are variations and stay in the tree untouched.

use crate::props::PropIdent;
use crate::tree::{GameTree, GameTreeNode, NodeId};

/// What a flattened move does to its point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    Black,
    White,
    /// Setup removal (`AE`): the point is cleared, no stone is played.
    Remove,
}

/// A point label from `LB`, e.g. `dd:A`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub x: usize,
    pub y: usize,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Square,
    Circle,
    Triangle,
}

/// A shape marker from `TR`/`SQ`/`CR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub x: usize,
    pub y: usize,
    pub kind: SymbolKind,
}

/// One event in the flattened sequence. Coordinates are 0-indexed with
/// the origin at the top-left, following the SGF convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    pub x: usize,
    pub y: usize,
    pub kind: MoveKind,
    pub labels: Vec<Label>,
    pub symbols: Vec<Symbol>,
}

/// The flattened main line of a parsed game: board size plus the move
/// sequence in chronological order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainLine {
    pub size: usize,
    pub moves: Vec<Move>,
}

/// Per-node scan order for stone-producing identifiers. Fixed so that a
/// node mixing a played move with setup stones always flattens the same
/// way.
const STONE_IDENTS: [(PropIdent, MoveKind); 5] = [
    (PropIdent::Black, MoveKind::Black),
    (PropIdent::White, MoveKind::White),
    (PropIdent::AddBlack, MoveKind::Black),
    (PropIdent::AddWhite, MoveKind::White),
    (PropIdent::AddEmpty, MoveKind::Remove),
];

const SYMBOL_IDENTS: [(PropIdent, SymbolKind); 3] = [
    (PropIdent::Triangle, SymbolKind::Triangle),
    (PropIdent::Square, SymbolKind::Square),
    (PropIdent::Circle, SymbolKind::Circle),
];

impl MainLine {
    /// Walk the main line from the root, flattening every node's stone
    /// placements and removals into moves.
    ///
    /// Labels and symbols attach at node granularity: every `LB`/`TR`/
    /// `SQ`/`CR` value at a node is attached to every move emitted for
    /// that node, not just the move at the matching coordinate.
    pub fn from_tree(tree: &GameTree) -> MainLine {
        let mut moves = Vec::new();
        let mut cursor: Option<NodeId> = Some(GameTree::ROOT);
        while let Some(id) = cursor {
            let node = tree.node(id);
            collect_node_moves(node, &mut moves);
            cursor = node.children.first().copied();
        }
        MainLine {
            size: tree.size(),
            moves,
        }
    }
}

fn collect_node_moves(node: &GameTreeNode, out: &mut Vec<Move>) {
    let labels = node_labels(node);
    let symbols = node_symbols(node);

    for (ident, kind) in &STONE_IDENTS {
        for value in node.props.values(ident) {
            // A value that is not a coordinate (a pass like B[], or
            // junk) is skipped locally; the rest of the node and the
            // walk continue.
            let (x, y) = match decode_coord(value) {
                Some(point) => point,
                None => continue,
            };
            out.push(Move {
                x,
                y,
                kind: *kind,
                labels: labels.clone(),
                symbols: symbols.clone(),
            });
        }
    }
}

fn node_labels(node: &GameTreeNode) -> Vec<Label> {
    node.props
        .values(&PropIdent::Label)
        .iter()
        .filter_map(|value| {
            let (coord, text) = value.split_once(':')?;
            let (x, y) = decode_coord(coord)?;
            Some(Label {
                x,
                y,
                text: text.to_string(),
            })
        })
        .collect()
}

fn node_symbols(node: &GameTreeNode) -> Vec<Symbol> {
    let mut symbols = Vec::new();
    for (ident, kind) in &SYMBOL_IDENTS {
        for value in node.props.values(ident) {
            if let Some((x, y)) = decode_coord(value) {
                symbols.push(Symbol { x, y, kind: *kind });
            }
        }
    }
    symbols
}

/// Decode a two-character SGF coordinate, column then row.
///
/// `'a'..='z'` map to 0..=25 and `'A'..='Z'` continue to 26..=51, the
/// extended alphabet for boards above 26. Anything else is `None`: the
/// empty value used for a pass, a short value, or bytes outside the
/// alphabet.
pub fn decode_coord(value: &str) -> Option<(usize, usize)> {
    let bytes = value.as_bytes();
    if bytes.len() != 2 {
        return None;
    }
    Some((letter_index(bytes[0])?, letter_index(bytes[1])?))
}

fn letter_index(byte: u8) -> Option<usize> {
    match byte {
        b'a'..=b'z' => Some((byte - b'a') as usize),
        b'A'..=b'Z' => Some((byte - b'A') as usize + 26),
        _ => None,
    }
}
