use core::fmt;

use crate::*;

/// Player view: status glyphs per square.
///
/// `.` unknown, `!` marked, `?` question, `X` mismarked; revealed squares
/// show their adjacency digit, or `*` for an uncovered mine.
pub struct StatusView<'a>(&'a Board);

/// Generation view: `*` for mines, the adjacency digit otherwise.
pub struct DebugView<'a>(&'a Board);

impl Board {
    pub fn status_view(&self) -> StatusView<'_> {
        StatusView(self)
    }

    pub fn debug_view(&self) -> DebugView<'_> {
        DebugView(self)
    }
}

impl fmt::Display for StatusView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_grid(f, self.0, status_glyph)
    }
}

impl fmt::Display for DebugView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_grid(f, self.0, debug_glyph)
    }
}

fn status_glyph(square: Square) -> char {
    use SquareStatus::*;
    match square.status {
        Unknown => '.',
        Revealed if square.is_mine() => '*',
        Revealed => digit(square.adj_count),
        Marked => '!',
        Question => '?',
        Mismarked => 'X',
    }
}

fn debug_glyph(square: Square) -> char {
    if square.is_mine() {
        '*'
    } else {
        digit(square.adj_count)
    }
}

fn digit(count: u8) -> char {
    (b'0' + count) as char
}

fn write_grid(f: &mut fmt::Formatter<'_>, board: &Board, glyph: fn(Square) -> char) -> fmt::Result {
    let (rows, cols) = board.size();

    f.write_str("  ")?;
    for col in 0..cols {
        write!(f, " {col:2}")?;
    }
    f.write_str("\n")?;
    for _ in 0..cols {
        f.write_str("---")?;
    }
    f.write_str("\n")?;

    for row in 0..rows {
        write!(f, "{row:2}| ")?;
        for col in 0..cols {
            write!(f, "{}  ", glyph(board.square_at((row, col))))?;
        }
        f.write_str("\n")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    fn scenario() -> Board {
        Board::from_mine_coords(3, 3, &[(2, 2)]).unwrap()
    }

    #[test]
    fn debug_view_shows_mines_and_adjacency() {
        let expected = concat!(
            "    0  1  2\n",
            "---------\n",
            " 0| 0  0  0  \n",
            " 1| 0  1  1  \n",
            " 2| 0  1  *  \n",
        );
        assert_eq!(scenario().debug_view().to_string(), expected);
    }

    #[test]
    fn status_view_tracks_the_played_board() {
        // the question mark on (0, 1) blocks the cascade out of the corner
        let board = scenario()
            .toggle_mark((0, 1))
            .unwrap()
            .toggle_mark((0, 1))
            .unwrap()
            .reveal((0, 0))
            .unwrap()
            .toggle_mark((2, 2))
            .unwrap();
        let expected = concat!(
            "    0  1  2\n",
            "---------\n",
            " 0| 0  ?  .  \n",
            " 1| 0  1  .  \n",
            " 2| 0  1  !  \n",
        );
        assert_eq!(board.status_view().to_string(), expected);
    }

    #[test]
    fn status_view_shows_end_of_game_glyphs() {
        let board = Board::from_mine_coords(1, 5, &[(0, 0)]).unwrap();
        let played = board
            .toggle_mark((0, 2))
            .unwrap()
            .toggle_mark((0, 3))
            .unwrap()
            .toggle_mark((0, 3))
            .unwrap();
        let ended = played.reveal((0, 0)).unwrap().reveal_all();

        // uncovered mine, numbered ring, wrong flag, then opened question/plain squares
        let expected = concat!(
            "    0  1  2  3  4\n",
            "---------------\n",
            " 0| *  1  X  0  0  \n",
        );
        assert_eq!(ended.status_view().to_string(), expected);
    }
}
