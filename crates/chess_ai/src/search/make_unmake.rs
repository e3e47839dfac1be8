//! Scoped move application.
//!
//! Every descent in the search pushes a move and must undo it on every exit
//! path, including pruning returns and budget cancellation unwinding through
//! `?`. `AppliedMove` ties the undo to scope exit so no path can leak a
//! mutated position.

use pleco::{BitMove, Board};

/// RAII guard over a pushed move; undoes it when dropped.
pub(crate) struct AppliedMove<'a> {
    pub board: &'a mut Board,
}

impl<'a> AppliedMove<'a> {
    pub fn new(board: &'a mut Board, mv: BitMove) -> Self {
        board.apply_move(mv);
        Self { board }
    }
}

impl Drop for AppliedMove<'_> {
    fn drop(&mut self) {
        self.board.undo_move();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_runs_on_scope_exit() {
        let mut board = Board::start_pos();
        let fen_before = board.fen();
        let mv = board.generate_moves()[0];
        {
            let applied = AppliedMove::new(&mut board, mv);
            assert_ne!(applied.board.fen(), fen_before);
        }
        assert_eq!(board.fen(), fen_before);
    }

    #[test]
    fn undo_runs_on_early_return() {
        fn bails_early(board: &mut Board, mv: BitMove) -> Result<(), ()> {
            let _applied = AppliedMove::new(board, mv);
            Err(())
        }

        let mut board = Board::start_pos();
        let fen_before = board.fen();
        let mv = board.generate_moves()[0];
        assert!(bails_early(&mut board, mv).is_err());
        assert_eq!(board.fen(), fen_before);
    }
}
