//! Move ordering for alpha-beta pruning.
//!
//! Returns a permutation of the legal move set, best-first: the principal
//! variation hint, then captures ranked by victim-minus-attacker value, then
//! checking moves. The sort is stable, so equal-score moves keep their
//! generation order.

use super::make_unmake::AppliedMove;
use crate::constants::{exchange_value, CAPTURE_BONUS, CHECK_BONUS, PV_BONUS};
use pleco::{BitMove, Board};

/// Orders `moves` for search, best candidates first.
pub(crate) fn order_moves(
    board: &mut Board,
    moves: &[BitMove],
    pv: Option<BitMove>,
) -> Vec<BitMove> {
    let mut scored: Vec<(i32, BitMove)> = moves
        .iter()
        .map(|&mv| (score_move(board, mv, pv), mv))
        .collect();
    // Stable: ties keep their input order.
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, mv)| mv).collect()
}

fn score_move(board: &mut Board, mv: BitMove, pv: Option<BitMove>) -> i32 {
    let mut score = 0;

    if pv == Some(mv) {
        score += PV_BONUS;
    }

    if mv.is_capture() {
        // En-passant destinations are empty, which values the victim at 0.
        let victim = board.piece_at_sq(mv.get_dest()).type_of();
        let attacker = board.piece_at_sq(mv.get_src()).type_of();
        score += CAPTURE_BONUS + exchange_value(victim) - exchange_value(attacker);
    }

    let gives_check = {
        let applied = AppliedMove::new(board, mv);
        applied.board.in_check()
    };
    if gives_check {
        score += CHECK_BONUS;
    }

    score
}
