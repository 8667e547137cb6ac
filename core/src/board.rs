use alloc::collections::{BTreeSet, VecDeque};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular grid of squares, addressed `(row, col)` row-major.
///
/// Operations never mutate the receiver: each returns a fresh `Board`
/// derived from it, so a session keeps the previous value until the
/// transformation is known to apply. Errors are reported before any working
/// copy is touched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    grid: Array2<Square>,
    mine_count: CellCount,
}

impl Board {
    /// Board with mines chosen by `placer` and adjacency counts filled in.
    pub fn generate(config: BoardConfig, placer: impl MinePlacer) -> Board {
        Self::from_mine_mask(placer.place(config))
    }

    /// Randomly mined board at the default density.
    pub fn new_random(rows: Coord, cols: Coord, seed: u64) -> Result<Board> {
        let config = BoardConfig::new(rows, cols)?;
        Ok(Self::generate(config, RandomMinePlacer::new(seed)))
    }

    /// Fixed mine layout, for scripted scenarios and replays.
    pub fn from_mine_coords(rows: Coord, cols: Coord, mines: &[Coord2]) -> Result<Board> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidDimension);
        }

        let mut mask: Array2<bool> = Array2::default((rows, cols).to_nd_index());
        for &coords in mines {
            if coords.0 >= rows || coords.1 >= cols {
                return Err(GameError::OutOfBounds);
            }
            mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(mask))
    }

    fn from_mine_mask(mask: Array2<bool>) -> Board {
        let mut grid: Array2<Square> = Array2::default(mask.raw_dim());
        let mut mine_count: CellCount = 0;

        for ((row, col), square) in grid.indexed_iter_mut() {
            let coords: Coord2 = (row as Coord, col as Coord);
            if mask[coords.to_nd_index()] {
                square.kind = SquareKind::Mine;
                mine_count += 1;
            }
            square.adj_count = mask
                .iter_neighbors(coords)
                .filter(|&pos| mask[pos.to_nd_index()])
                .count() as u8;
        }

        Board { grid, mine_count }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.grid.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn total_mines(&self) -> CellCount {
        self.mine_count
    }

    pub fn square_at(&self, coords: Coord2) -> Square {
        self.grid[coords.to_nd_index()]
    }

    /// Row-major traversal of every square with its coordinates.
    pub fn squares(&self) -> impl Iterator<Item = (Coord2, Square)> + '_ {
        self.grid
            .indexed_iter()
            .map(|((row, col), &square)| ((row as Coord, col as Coord), square))
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let (rows, cols) = self.size();
        if coords.0 < rows && coords.1 < cols {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    /// Reveal a square, cascading through zero-adjacency regions.
    ///
    /// Squares that already left `Unknown` come back unchanged. Revealing a
    /// mine only flips that one square; loss detection stays with the caller.
    pub fn reveal(&self, coords: Coord2) -> Result<Board> {
        let coords = self.validate_coords(coords)?;

        let mut next = self.clone();
        next.reveal_square(coords);
        Ok(next)
    }

    fn reveal_square(&mut self, coords: Coord2) {
        let square = self.grid[coords.to_nd_index()];
        if square.status != SquareStatus::Unknown {
            return;
        }

        self.grid[coords.to_nd_index()].status = SquareStatus::Revealed;
        log::debug!(
            "Revealed {:?}, kind {:?}, adjacent {}",
            coords,
            square.kind,
            square.adj_count
        );

        if square.is_mine() || square.adj_count > 0 {
            return;
        }

        // worklist flood fill, every square leaves Unknown exactly once
        let mut visited = BTreeSet::from([coords]);
        let mut to_visit: VecDeque<_> = self
            .grid
            .iter_neighbors(coords)
            .filter(|&pos| self.grid[pos.to_nd_index()].status == SquareStatus::Unknown)
            .collect();

        while let Some(visit_coords) = to_visit.pop_front() {
            if !visited.insert(visit_coords) {
                continue;
            }

            let visit_square = self.grid[visit_coords.to_nd_index()];
            // marked and question squares stay put, same as a direct reveal
            if visit_square.status != SquareStatus::Unknown {
                continue;
            }

            self.grid[visit_coords.to_nd_index()].status = SquareStatus::Revealed;
            log::trace!(
                "Flood revealed {:?}, adjacent {}",
                visit_coords,
                visit_square.adj_count
            );

            if visit_square.adj_count == 0 {
                to_visit.extend(
                    self.grid
                        .iter_neighbors(visit_coords)
                        .filter(|&pos| {
                            self.grid[pos.to_nd_index()].status == SquareStatus::Unknown
                        })
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }

    /// Cycle `Unknown -> Marked -> Question -> Unknown`.
    ///
    /// Revealed and mismarked squares come back unchanged.
    pub fn toggle_mark(&self, coords: Coord2) -> Result<Board> {
        use SquareStatus::*;

        let coords = self.validate_coords(coords)?;

        let mut next = self.clone();
        let status = &mut next.grid[coords.to_nd_index()].status;
        match *status {
            Unknown => *status = Marked,
            Marked => *status = Question,
            Question => *status = Unknown,
            Revealed | Mismarked => {}
        }
        Ok(next)
    }

    /// Total mines minus marked squares; negative when over-flagged.
    pub fn unmarked_mine_count(&self) -> isize {
        let marked = self
            .grid
            .iter()
            .filter(|square| square.status == SquareStatus::Marked)
            .count();
        self.mine_count as isize - marked as isize
    }

    /// Whether the marked squares are exactly the mines.
    pub fn check_for_win(&self) -> bool {
        self.grid
            .iter()
            .all(|square| square.is_mine() == (square.status == SquareStatus::Marked))
    }

    /// Coordinates of mines the player flagged.
    pub fn correctly_marked_indices(&self) -> BTreeSet<Coord2> {
        self.squares()
            .filter(|(_, square)| square.is_mine() && square.status == SquareStatus::Marked)
            .map(|(coords, _)| coords)
            .collect()
    }

    /// End-of-game view: everything uncovered, wrong flags called out.
    pub fn reveal_all(&self) -> Board {
        use SquareStatus::*;

        let mut next = self.clone();
        for square in next.grid.iter_mut() {
            match square.status {
                Unknown | Question => square.status = Revealed,
                Marked if !square.is_mine() => square.status = Mismarked,
                _ => {}
            }
        }
        next
    }
}
