#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use error::*;
pub use generator::*;
pub use render::*;
pub use session::*;
pub use square::*;
pub use types::*;

mod board;
mod error;
mod generator;
mod render;
mod session;
mod square;
mod types;

/// Share of squares that hide mines, in percent.
pub const MINE_DENSITY_PERCENT: u32 = 15;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl BoardConfig {
    /// Config with the mine count derived from the fixed density.
    pub fn new(rows: Coord, cols: Coord) -> Result<Self> {
        let total = mult(rows, cols) as u32;
        let mines = (total * MINE_DENSITY_PERCENT / 100) as CellCount;
        Self::with_mines(rows, cols, mines)
    }

    /// Config with an explicit mine count, clamped to the board area.
    pub fn with_mines(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidDimension);
        }
        Ok(Self {
            rows,
            cols,
            mines: mines.min(mult(rows, cols)),
        })
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
        }
    }
}
