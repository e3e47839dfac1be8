//! Plain material-count evaluation.

use super::{terminal_score, Evaluate, Score};
use crate::constants::material_value;
use pleco::{Board, PieceType, Player};

const COUNTED: [PieceType; 5] = [
    PieceType::P,
    PieceType::N,
    PieceType::B,
    PieceType::R,
    PieceType::Q,
];

/// Evaluator that only counts material balance.
#[derive(Debug, Default, Clone, Copy)]
pub struct MaterialEvaluator;

impl Evaluate for MaterialEvaluator {
    fn evaluate(&self, board: &mut Board, perspective: Player) -> Score {
        if let Some(score) = terminal_score(board, perspective) {
            return score;
        }
        let mut score = 0.0;
        for pt in COUNTED {
            let value = material_value(pt) as Score;
            score += Score::from(board.count_piece(Player::White, pt)) * value;
            score -= Score::from(board.count_piece(Player::Black, pt)) * value;
        }
        match perspective {
            Player::White => score,
            Player::Black => -score,
        }
    }
}
