use alloc::collections::BTreeSet;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Lifecycle of one game.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionState {
    InProgress,
    Won,
    Lost,
}

impl SessionState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One live game: the current board plus the state machine driving it.
///
/// Every player action goes through `reveal`/`toggle_mark`, which swap in
/// the next board value and settle the terminal state; once the game ends
/// the board is frozen fully revealed until `reset`.
#[derive(Clone, Debug)]
pub struct Session {
    config: BoardConfig,
    board: Board,
    state: SessionState,
    rng: SmallRng,
}

impl Session {
    pub fn new(rows: Coord, cols: Coord, seed: u64) -> Result<Session> {
        let config = BoardConfig::new(rows, cols)?;
        let mut rng = SmallRng::seed_from_u64(seed);
        let board = Self::fresh_board(config, &mut rng);
        Ok(Session {
            config,
            board,
            state: SessionState::InProgress,
            rng,
        })
    }

    /// Adopt an existing board, e.g. a scripted scenario or a replay.
    pub fn from_board(board: Board, seed: u64) -> Session {
        Session {
            config: BoardConfig {
                rows: board.rows(),
                cols: board.cols(),
                mines: board.total_mines(),
            },
            board,
            state: SessionState::InProgress,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Start over with a fresh board of the same dimensions.
    pub fn reset(&mut self) {
        self.board = Self::fresh_board(self.config, &mut self.rng);
        self.state = SessionState::InProgress;
    }

    fn fresh_board(config: BoardConfig, rng: &mut SmallRng) -> Board {
        let seed = rng.next_u64();
        let board = Board::generate(config, RandomMinePlacer::new(seed));
        log::debug!("Generated board, seed {}\n{}", seed, board.debug_view());
        board
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn rows(&self) -> Coord {
        self.config.rows
    }

    pub fn cols(&self) -> Coord {
        self.config.cols
    }

    /// Counter value for the remaining-mines display; negative when the
    /// player has flagged more squares than there are mines.
    pub fn mines_left(&self) -> isize {
        self.board.unmarked_mine_count()
    }

    /// Flags sitting on actual mines, for end-of-game highlighting.
    pub fn correct_marks(&self) -> BTreeSet<Coord2> {
        self.board.correctly_marked_indices()
    }

    /// Left-click: reveal a square. Uncovering a mine ends the game at once.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_in_progress()?;

        let before = self.board.square_at(coords);
        self.board = self.board.reveal(coords)?;

        if before.status != SquareStatus::Unknown {
            return Ok(RevealOutcome::NoChange);
        }

        if before.is_mine() {
            log::debug!("Mine hit at {:?}", coords);
            self.finish(SessionState::Lost);
            return Ok(RevealOutcome::HitMine);
        }

        Ok(RevealOutcome::Revealed)
    }

    /// Right-click: cycle the mark on a square.
    ///
    /// A toggle that leaves the remaining-mines counter at zero settles the
    /// game either way: won on an exact match, lost otherwise.
    pub fn toggle_mark(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_in_progress()?;

        let before = self.board.square_at(coords);
        self.board = self.board.toggle_mark(coords)?;

        if !before.status.is_markable() {
            return Ok(MarkOutcome::NoChange);
        }

        if self.board.unmarked_mine_count() == 0 {
            let won = self.board.check_for_win();
            self.finish(if won {
                SessionState::Won
            } else {
                SessionState::Lost
            });
        }

        Ok(MarkOutcome::Changed)
    }

    fn finish(&mut self, state: SessionState) {
        self.state = state;
        self.board = self.board.reveal_all();
        log::debug!("Game over, {:?}\n{}", state, self.board.status_view());
    }

    fn check_in_progress(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_session() -> Session {
        Session::from_board(Board::from_mine_coords(3, 3, &[(2, 2)]).unwrap(), 1)
    }

    #[test]
    fn revealing_a_mine_loses_and_freezes_the_board() {
        let mut session = scenario_session();

        assert_eq!(session.reveal((2, 2)).unwrap(), RevealOutcome::HitMine);
        assert_eq!(session.state(), SessionState::Lost);
        assert_eq!(
            session.board().square_at((0, 0)).status,
            SquareStatus::Revealed
        );
        assert_eq!(session.reveal((0, 0)), Err(GameError::AlreadyEnded));
        assert_eq!(session.toggle_mark((0, 1)), Err(GameError::AlreadyEnded));
    }

    #[test]
    fn flagging_the_last_mine_wins() {
        let mut session = scenario_session();

        assert_eq!(session.reveal((0, 0)).unwrap(), RevealOutcome::Revealed);
        assert_eq!(session.toggle_mark((2, 2)).unwrap(), MarkOutcome::Changed);

        assert_eq!(session.state(), SessionState::Won);
        assert_eq!(session.mines_left(), 0);
        assert_eq!(session.correct_marks(), BTreeSet::from([(2, 2)]));
        // correct flag survives the final reveal
        assert_eq!(
            session.board().square_at((2, 2)).status,
            SquareStatus::Marked
        );
    }

    #[test]
    fn a_wrong_final_flag_loses() {
        let mut session = scenario_session();

        assert_eq!(session.toggle_mark((0, 0)).unwrap(), MarkOutcome::Changed);

        assert_eq!(session.state(), SessionState::Lost);
        assert_eq!(
            session.board().square_at((0, 0)).status,
            SquareStatus::Mismarked
        );
        assert_eq!(
            session.board().square_at((2, 2)).status,
            SquareStatus::Revealed
        );
    }

    #[test]
    fn toggling_a_revealed_square_reports_no_change() {
        let mut session = scenario_session();

        session.reveal((1, 1)).unwrap();
        let outcome = session.toggle_mark((1, 1)).unwrap();
        assert_eq!(outcome, MarkOutcome::NoChange);
        assert!(!outcome.has_update());
        assert_eq!(session.state(), SessionState::InProgress);
    }

    #[test]
    fn revealing_an_uncovered_square_reports_no_change() {
        let mut session = scenario_session();

        assert!(session.reveal((1, 1)).unwrap().has_update());
        let again = session.reveal((1, 1)).unwrap();
        assert_eq!(again, RevealOutcome::NoChange);
        assert!(!again.has_update());
    }

    #[test]
    fn out_of_bounds_moves_are_rejected() {
        let mut session = scenario_session();
        assert_eq!(session.reveal((9, 0)), Err(GameError::OutOfBounds));
        assert_eq!(session.toggle_mark((0, 9)), Err(GameError::OutOfBounds));
    }

    #[test]
    fn reset_starts_a_new_untouched_game() {
        let mut session = Session::new(8, 8, 123).unwrap();
        session.reveal((4, 4)).unwrap();

        session.reset();

        assert_eq!(session.state(), SessionState::InProgress);
        assert!(
            session
                .board()
                .squares()
                .all(|(_, square)| square.status == SquareStatus::Unknown)
        );
        assert_eq!(session.board().total_mines(), 9);
    }

    #[test]
    fn same_seed_replays_the_same_boards() {
        let a = Session::new(8, 8, 42).unwrap();
        let b = Session::new(8, 8, 42).unwrap();
        assert_eq!(a.board(), b.board());

        let mut a = a;
        let mut b = b;
        a.reset();
        b.reset();
        assert_eq!(a.board(), b.board());
    }
}
