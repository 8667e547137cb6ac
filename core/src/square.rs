use serde::{Deserialize, Serialize};

/// Whether a square hides a mine. Fixed at generation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SquareKind {
    Empty,
    Mine,
}

impl Default for SquareKind {
    fn default() -> Self {
        Self::Empty
    }
}

/// Player-visible state of a square.
///
/// `Unknown` is where every square starts and the only state the marking
/// cycle passes through; `Revealed` is terminal. `Mismarked` is assigned by
/// the end-of-game reveal to flags sitting on empty squares.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SquareStatus {
    Unknown,
    Revealed,
    Marked,
    Question,
    Mismarked,
}

impl SquareStatus {
    /// Whether toggle-marking may still change this square.
    pub const fn is_markable(self) -> bool {
        matches!(self, Self::Unknown | Self::Marked | Self::Question)
    }
}

impl Default for SquareStatus {
    fn default() -> Self {
        Self::Unknown
    }
}

/// One grid cell: what it is, how many mined neighbors it has, and what the
/// player currently sees.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Square {
    pub kind: SquareKind,
    pub adj_count: u8,
    pub status: SquareStatus,
}

impl Square {
    pub const fn is_mine(self) -> bool {
        matches!(self.kind, SquareKind::Mine)
    }
}
