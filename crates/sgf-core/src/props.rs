//! Property identifiers and per-node property storage.

/// The closed set of property identifiers the engine interprets, plus a
/// fallback for everything else. Unrecognized identifiers round-trip
/// through [`PropertyMap`] for display but are never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropIdent {
    /// `SZ`: board size
    BoardSize,
    /// `DT`: date
    Date,
    /// `EV`: event
    Event,
    /// `RO`: round
    Round,
    /// `PB`: black player name
    BlackPlayer,
    /// `PW`: white player name
    WhitePlayer,
    /// `BR`: black rank
    BlackRank,
    /// `WR`: white rank
    WhiteRank,
    /// `KM`: komi
    Komi,
    /// `RE`: result
    Result,
    /// `B`: black move
    Black,
    /// `W`: white move
    White,
    /// `AB`: setup, add black stones
    AddBlack,
    /// `AW`: setup, add white stones
    AddWhite,
    /// `AE`: setup, empty points
    AddEmpty,
    /// `LB`: point label (`coordinate:text`)
    Label,
    /// `TR`: triangle marker
    Triangle,
    /// `SQ`: square marker
    Square,
    /// `CR`: circle marker
    Circle,
    /// Any other identifier, preserved verbatim
    Other(String),
}

impl PropIdent {
    /// Map a raw (case-sensitive, uppercase) identifier to its tag.
    pub fn from_ident(ident: &str) -> PropIdent {
        match ident {
            "SZ" => PropIdent::BoardSize,
            "DT" => PropIdent::Date,
            "EV" => PropIdent::Event,
            "RO" => PropIdent::Round,
            "PB" => PropIdent::BlackPlayer,
            "PW" => PropIdent::WhitePlayer,
            "BR" => PropIdent::BlackRank,
            "WR" => PropIdent::WhiteRank,
            "KM" => PropIdent::Komi,
            "RE" => PropIdent::Result,
            "B" => PropIdent::Black,
            "W" => PropIdent::White,
            "AB" => PropIdent::AddBlack,
            "AW" => PropIdent::AddWhite,
            "AE" => PropIdent::AddEmpty,
            "LB" => PropIdent::Label,
            "TR" => PropIdent::Triangle,
            "SQ" => PropIdent::Square,
            "CR" => PropIdent::Circle,
            other => PropIdent::Other(other.to_string()),
        }
    }

    /// The SGF spelling of this identifier.
    pub fn as_str(&self) -> &str {
        match self {
            PropIdent::BoardSize => "SZ",
            PropIdent::Date => "DT",
            PropIdent::Event => "EV",
            PropIdent::Round => "RO",
            PropIdent::BlackPlayer => "PB",
            PropIdent::WhitePlayer => "PW",
            PropIdent::BlackRank => "BR",
            PropIdent::WhiteRank => "WR",
            PropIdent::Komi => "KM",
            PropIdent::Result => "RE",
            PropIdent::Black => "B",
            PropIdent::White => "W",
            PropIdent::AddBlack => "AB",
            PropIdent::AddWhite => "AW",
            PropIdent::AddEmpty => "AE",
            PropIdent::Label => "LB",
            PropIdent::Triangle => "TR",
            PropIdent::Square => "SQ",
            PropIdent::Circle => "CR",
            PropIdent::Other(ident) => ident,
        }
    }
}

impl std::fmt::Display for PropIdent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mapping from property identifier to its ordered raw values.
///
/// Entries keep their first-seen order so unknown properties display in
/// record order. A repeated identifier within one node appends to the
/// existing value list rather than starting a new entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap {
    entries: Vec<(PropIdent, Vec<String>)>,
}

impl PropertyMap {
    pub fn new() -> PropertyMap {
        PropertyMap::default()
    }

    /// Append one value under `ident`.
    pub fn push(&mut self, ident: PropIdent, value: String) {
        match self.entries.iter_mut().find(|(i, _)| *i == ident) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((ident, vec![value])),
        }
    }

    /// All values recorded under `ident`, empty if absent.
    pub fn values(&self, ident: &PropIdent) -> &[String] {
        self.entries
            .iter()
            .find(|(i, _)| i == ident)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    /// First value recorded under `ident`.
    pub fn single(&self, ident: &PropIdent) -> Option<&str> {
        self.values(ident).first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&PropIdent, &[String])> {
        self.entries.iter().map(|(i, v)| (i, v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
