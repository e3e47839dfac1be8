//! Weighted composite evaluation.
//!
//! Four independent sub-scores, each computed as white-minus-black and
//! combined as a weighted sum, then negated for the black perspective. The
//! white-minus-black formulation makes perspective antisymmetry exact by
//! construction.

use super::{pst::pst_value, terminal_score, Evaluate, Score};
use crate::board::{decompose, BoardExt};
use crate::config::EvalWeights;
use crate::constants::{
    material_value, HEAVY_FILE_ATTACKER_PENALTY, OPEN_KING_FILE_PENALTY, PAWN_SHIELD_BONUS,
};
use pleco::{Board, Piece, Player, SQ};

/// Evaluator combining material, piece-square tables, king safety and
/// mobility under caller-supplied weights.
#[derive(Debug, Clone, Copy)]
pub struct WeightedEvaluator {
    weights: EvalWeights,
}

impl Default for WeightedEvaluator {
    fn default() -> Self {
        Self::new(EvalWeights::default())
    }
}

impl WeightedEvaluator {
    pub fn new(weights: EvalWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> EvalWeights {
        self.weights
    }
}

impl Evaluate for WeightedEvaluator {
    fn evaluate(&self, board: &mut Board, perspective: Player) -> Score {
        if let Some(score) = terminal_score(board, perspective) {
            return score;
        }

        let material = material_and_pst(board);
        let king_safety = king_safety(board, Player::White) - king_safety(board, Player::Black);
        let (white_moves, black_moves) = board.mobility_counts();
        let mobility = Score::from(white_moves) - Score::from(black_moves);

        let w = self.weights;
        let score = w.material * material.0
            + w.piece_square * material.1
            + w.king_safety * Score::from(king_safety)
            + w.mobility * mobility;

        match perspective {
            Player::White => score,
            Player::Black => -score,
        }
    }
}

/// Material and piece-square balances in one board scan, white minus black.
fn material_and_pst(board: &Board) -> (Score, Score) {
    let mut material = 0.0;
    let mut positional = 0.0;
    for idx in 0..64u8 {
        let sq = SQ(idx);
        let Some((owner, pt)) = decompose(board.piece_at_sq(sq)) else {
            continue;
        };
        let sign = match owner {
            Player::White => 1.0,
            Player::Black => -1.0,
        };
        material += sign * material_value(pt) as Score;
        positional += sign * pst_value(pt, sq, owner) as Score;
    }
    (material, positional)
}

/// King-safety score for one side: pawn-shield bonus, open-file penalty and
/// a penalty when a heavy enemy piece bears down the king's file.
fn king_safety(board: &Board, side: Player) -> i32 {
    let king = board.king_sq(side).0;
    let king_file = i8::try_from(king & 7).unwrap_or(0);
    let king_rank = i8::try_from(king >> 3).unwrap_or(0);
    let forward: i8 = match side {
        Player::White => 1,
        Player::Black => -1,
    };
    let own_pawn = match side {
        Player::White => Piece::WhitePawn,
        Player::Black => Piece::BlackPawn,
    };
    let (enemy_rook, enemy_queen) = match side {
        Player::White => (Piece::BlackRook, Piece::BlackQueen),
        Player::Black => (Piece::WhiteRook, Piece::WhiteQueen),
    };

    let mut score = 0;

    // Pawn shield one rank toward the opponent on the king's three files.
    let shield_rank = king_rank + forward;
    if (0..8).contains(&shield_rank) {
        for file in [king_file - 1, king_file, king_file + 1] {
            if !(0..8).contains(&file) {
                continue;
            }
            let sq = SQ((shield_rank * 8 + file) as u8);
            if board.piece_at_sq(sq) == own_pawn {
                score += PAWN_SHIELD_BONUS;
            }
        }
    }

    // Fully open king file.
    let has_own_file_pawn = (0..8).any(|rank| {
        board.piece_at_sq(SQ((rank * 8 + king_file) as u8)) == own_pawn
    });
    if !has_own_file_pawn {
        score -= OPEN_KING_FILE_PENALTY;
    }

    // First occupied square toward the opponent along the king's file.
    let mut rank = king_rank + forward;
    while (0..8).contains(&rank) {
        let occupant = board.piece_at_sq(SQ((rank * 8 + king_file) as u8));
        if occupant != Piece::None {
            if occupant == enemy_rook || occupant == enemy_queen {
                score -= HEAVY_FILE_ATTACKER_PENALTY;
            }
            break;
        }
        rank += forward;
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_position_is_balanced() {
        let mut board = Board::start_pos();
        let eval = WeightedEvaluator::default();
        assert_eq!(eval.evaluate(&mut board, Player::White), 0.0);
        assert_eq!(eval.evaluate(&mut board, Player::Black), 0.0);
    }

    #[test]
    fn antisymmetric_in_perspective() {
        let mut board =
            Board::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3")
                .unwrap();
        let eval = WeightedEvaluator::default();
        let white = eval.evaluate(&mut board, Player::White);
        let black = eval.evaluate(&mut board, Player::Black);
        assert_eq!(white, -black);
        assert!(white.is_finite());
    }

    #[test]
    fn evaluation_leaves_the_position_untouched() {
        let mut board =
            Board::from_fen("r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3")
                .unwrap();
        let fen_before = board.fen();
        let _ = WeightedEvaluator::default().evaluate(&mut board, Player::White);
        assert_eq!(board.fen(), fen_before);
    }

    #[test]
    fn checkmate_bypasses_feature_terms() {
        let mut board =
            Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        let eval = WeightedEvaluator::default();
        assert_eq!(eval.evaluate(&mut board, Player::Black), Score::INFINITY);
        assert_eq!(
            eval.evaluate(&mut board, Player::White),
            Score::NEG_INFINITY
        );
    }

    #[test]
    fn material_only_weights_match_material_evaluator() {
        use crate::evaluation::MaterialEvaluator;
        let mut board =
            Board::from_fen("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1").unwrap();
        let weighted = WeightedEvaluator::new(EvalWeights::material_only());
        assert_eq!(
            weighted.evaluate(&mut board, Player::White),
            MaterialEvaluator.evaluate(&mut board, Player::White),
        );
    }

    #[test]
    fn sheltered_king_beats_shelterless_king() {
        // White king g1 behind f2/g2/h2; black king g8 with no pawns at all.
        let board = Board::from_fen("6k1/8/8/8/8/8/5PPP/6K1 w - - 0 1").unwrap();
        let white = king_safety(&board, Player::White);
        let black = king_safety(&board, Player::Black);
        assert!(white > black);
        // Three shield pawns, g-file occupied by an own pawn.
        assert_eq!(white, 3 * PAWN_SHIELD_BONUS);
        assert_eq!(black, -OPEN_KING_FILE_PENALTY);
    }

    #[test]
    fn enemy_rook_on_king_file_is_penalized() {
        // Black rook down the open g-file against the white king.
        let board = Board::from_fen("6k1/8/8/8/6r1/8/5P1P/6K1 w - - 0 1").unwrap();
        let score = king_safety(&board, Player::White);
        assert_eq!(
            score,
            2 * PAWN_SHIELD_BONUS - OPEN_KING_FILE_PENALTY - HEAVY_FILE_ATTACKER_PENALTY
        );
    }
}
