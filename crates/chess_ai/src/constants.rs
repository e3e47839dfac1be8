//! Centralized constants for evaluation and move ordering.

use pleco::PieceType;

/// Material values used by the evaluators, in centipawns.
pub const PAWN_VALUE: i32 = 100;
pub const KNIGHT_VALUE: i32 = 320;
pub const BISHOP_VALUE: i32 = 330;
pub const ROOK_VALUE: i32 = 500;
pub const QUEEN_VALUE: i32 = 900;

/// Move-ordering bonus for the principal-variation hint. Large enough to
/// dominate every other ordering term.
pub const PV_BONUS: i32 = 20_000;

/// Base move-ordering bonus for any capture.
pub const CAPTURE_BONUS: i32 = 1_000;

/// Move-ordering bonus for a checking move.
pub const CHECK_BONUS: i32 = 50;

/// King-safety terms.
pub const PAWN_SHIELD_BONUS: i32 = 15;
pub const OPEN_KING_FILE_PENALTY: i32 = 20;
pub const HEAVY_FILE_ATTACKER_PENALTY: i32 = 30;

/// Material value of a piece type for static evaluation.
pub fn material_value(pt: PieceType) -> i32 {
    match pt {
        PieceType::P => PAWN_VALUE,
        PieceType::N => KNIGHT_VALUE,
        PieceType::B => BISHOP_VALUE,
        PieceType::R => ROOK_VALUE,
        PieceType::Q => QUEEN_VALUE,
        _ => 0,
    }
}

/// Piece value used when ranking captures for move ordering. Minors are
/// deliberately rated a little higher than their material value so that
/// minor-takes-minor trades sort above pawn pushes.
pub fn exchange_value(pt: PieceType) -> i32 {
    match pt {
        PieceType::P => 100,
        PieceType::N => 350,
        PieceType::B => 360,
        PieceType::R => 500,
        PieceType::Q => 900,
        _ => 0,
    }
}
