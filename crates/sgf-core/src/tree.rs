//! Full SGF game-tree parser.
//!
//! Grammar (informal):
//!
//! ```text
//! game-tree = "(" sequence { game-tree } ")"
//! sequence  = node { node }
//! node      = ";" { property }
//! property  = UCIDENT value { value }
//! value     = "[" text-with-\-escapes "]"
//! ```
//!
//! Whitespace between tokens is insignificant. Sibling `(...)` groups
//! after a sequence are variations: all of them are parsed and retained
//! as children, and consumers pick the first child when they want the
//! main line.

use crate::error::SgfError;
use crate::props::{PropIdent, PropertyMap};

/// Board size assumed when the root carries no usable `SZ`.
pub const DEFAULT_BOARD_SIZE: usize = 19;

/// Largest board the two-letter coordinate alphabet can address.
pub const MAX_BOARD_SIZE: usize = 52;

/// Index of a node in its owning [`GameTree`] arena.
pub type NodeId = usize;

/// One node of the parsed tree: its properties and its children, in
/// record order. More than one child means a branch point.
#[derive(Debug, Clone, Default)]
pub struct GameTreeNode {
    pub props: PropertyMap,
    pub children: Vec<NodeId>,
}

/// An arena of nodes addressing each other by index. The structure is a
/// strict tree: every node except the root is a child of exactly one
/// earlier node, so there are no cycles to worry about.
#[derive(Debug)]
pub struct GameTree {
    nodes: Vec<GameTreeNode>,
}

impl GameTree {
    /// The root node is always the first allocated node.
    pub const ROOT: NodeId = 0;

    /// Parse the complete textual content of one game record.
    ///
    /// Content that does not open with the game-tree marker fails with
    /// [`SgfError::NotARecord`]; any later grammar violation fails with
    /// [`SgfError::MalformedRecord`] carrying the byte offset. A leading
    /// UTF-8 BOM and trailing text after the outermost `)` are ignored.
    pub fn parse(text: &str) -> Result<GameTree, SgfError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let mut parser = Parser::new(text);
        parser.skip_whitespace();
        if !parser.consume(b'(') {
            return Err(SgfError::NotARecord);
        }
        parser.skip_whitespace();
        if parser.peek() != Some(b';') {
            return Err(SgfError::NotARecord);
        }

        let mut nodes = Vec::new();
        parser.parse_tree_body(&mut nodes, None)?;
        Ok(GameTree { nodes })
    }

    pub fn node(&self, id: NodeId) -> &GameTreeNode {
        &self.nodes[id]
    }

    pub fn root(&self) -> &GameTreeNode {
        &self.nodes[Self::ROOT]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Board size from the root `SZ` property; defaults to 19 when the
    /// property is absent, not a positive integer, or larger than
    /// [`MAX_BOARD_SIZE`].
    pub fn size(&self) -> usize {
        self.root()
            .props
            .single(&PropIdent::BoardSize)
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|&size| size > 0 && size <= MAX_BOARD_SIZE)
            .unwrap_or(DEFAULT_BOARD_SIZE)
    }
}

/// Single-pass recursive-descent parser over the record bytes.
struct Parser<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Parser<'a> {
        Parser {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    /// Parse the body of one game tree into `nodes`: its node sequence,
    /// then any nested variation subtrees, then the closing `)`. The
    /// opening `(` has already been consumed; `parent` is the node the
    /// first parsed node attaches to.
    fn parse_tree_body(
        &mut self,
        nodes: &mut Vec<GameTreeNode>,
        parent: Option<NodeId>,
    ) -> Result<(), SgfError> {
        self.skip_whitespace();
        if self.peek() != Some(b';') {
            return Err(self.fail("expected ';' to start a node"));
        }

        let mut last = parent;
        while self.consume(b';') {
            let props = self.parse_node_props()?;
            let id = nodes.len();
            nodes.push(GameTreeNode {
                props,
                children: Vec::new(),
            });
            if let Some(p) = last {
                nodes[p].children.push(id);
            }
            last = Some(id);
            self.skip_whitespace();
        }

        // Sibling variations all attach to the last node of the sequence.
        while self.consume(b'(') {
            self.parse_tree_body(nodes, last)?;
            self.skip_whitespace();
        }

        if !self.consume(b')') {
            return Err(self.fail("expected ')' to close the game tree"));
        }
        Ok(())
    }

    fn parse_node_props(&mut self) -> Result<PropertyMap, SgfError> {
        let mut props = PropertyMap::new();
        loop {
            self.skip_whitespace();
            let ident = match self.parse_ident() {
                Some(ident) => ident,
                None => break,
            };
            self.skip_whitespace();
            if self.peek() != Some(b'[') {
                return Err(self.fail("property identifier without a '[value]'"));
            }
            while self.consume(b'[') {
                let value = self.parse_value()?;
                props.push(PropIdent::from_ident(&ident), value);
                self.skip_whitespace();
            }
        }
        Ok(props)
    }

    /// A run of uppercase ASCII letters, or `None` at any other byte.
    fn parse_ident(&mut self) -> Option<String> {
        let start = self.pos;
        while matches!(self.peek(), Some(b) if b.is_ascii_uppercase()) {
            self.pos += 1;
        }
        if self.pos == start {
            return None;
        }
        Some(String::from_utf8_lossy(&self.bytes[start..self.pos]).into_owned())
    }

    /// The value body after a consumed `[`. A `\` makes the next byte
    /// literal, so `\]` is a `]` character rather than the terminator.
    fn parse_value(&mut self) -> Result<String, SgfError> {
        let mut buf = Vec::new();
        loop {
            match self.bump() {
                Some(b'\\') => match self.bump() {
                    Some(escaped) => buf.push(escaped),
                    None => return Err(self.fail("unterminated property value")),
                },
                Some(b']') => break,
                Some(byte) => buf.push(byte),
                None => return Err(self.fail("unterminated property value")),
            }
        }
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    fn consume(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn fail(&self, reason: &'static str) -> SgfError {
        SgfError::MalformedRecord {
            offset: self.pos,
            reason,
        }
    }
}
