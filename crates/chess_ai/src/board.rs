//! Thin query helpers over the `pleco` rules engine.
//!
//! The board representation and move generator are external collaborators;
//! this module only adds the handful of predicates the search and evaluator
//! need that `pleco::Board` does not expose directly. No rules logic lives
//! here beyond reading the board.

use pleco::{Board, Piece, PieceType, Player, SQ};

/// Vertical mirror of a square (a1 <-> a8), used to index white-oriented
/// piece-square tables for black pieces.
pub(crate) fn mirror(sq: SQ) -> SQ {
    SQ(sq.0 ^ 56)
}

/// Splits a board occupant into its owner and piece type.
pub(crate) fn decompose(piece: Piece) -> Option<(Player, PieceType)> {
    match piece {
        Piece::None => None,
        Piece::WhitePawn => Some((Player::White, PieceType::P)),
        Piece::WhiteKnight => Some((Player::White, PieceType::N)),
        Piece::WhiteBishop => Some((Player::White, PieceType::B)),
        Piece::WhiteRook => Some((Player::White, PieceType::R)),
        Piece::WhiteQueen => Some((Player::White, PieceType::Q)),
        Piece::WhiteKing => Some((Player::White, PieceType::K)),
        Piece::BlackPawn => Some((Player::Black, PieceType::P)),
        Piece::BlackKnight => Some((Player::Black, PieceType::N)),
        Piece::BlackBishop => Some((Player::Black, PieceType::B)),
        Piece::BlackRook => Some((Player::Black, PieceType::R)),
        Piece::BlackQueen => Some((Player::Black, PieceType::Q)),
        Piece::BlackKing => Some((Player::Black, PieceType::K)),
    }
}

/// Extra position queries the engine consumes from the rules collaborator.
pub trait BoardExt {
    /// Neither side can deliver checkmate: bare kings, a lone minor piece,
    /// or same-colored bishops only.
    fn insufficient_material(&self) -> bool;

    /// The game is decided: checkmate, stalemate or insufficient material.
    fn is_decided(&self) -> bool;

    /// Legal move counts as `(white, black)`. The side not on move is
    /// counted by passing the turn with a null move and restoring it
    /// afterwards; when the side on move is in check the null move is
    /// illegal and the opponent's count falls back to 0.
    fn mobility_counts(&mut self) -> (u32, u32);
}

impl BoardExt for Board {
    fn insufficient_material(&self) -> bool {
        let mut knights = 0usize;
        let mut bishop_square_colors: Vec<u8> = Vec::new();
        for idx in 0..64u8 {
            let Some((_, pt)) = decompose(self.piece_at_sq(SQ(idx))) else {
                continue;
            };
            match pt {
                PieceType::P | PieceType::R | PieceType::Q => return false,
                PieceType::N => knights += 1,
                PieceType::B => bishop_square_colors.push(((idx >> 3) + (idx & 7)) & 1),
                _ => {}
            }
        }
        if knights == 0 {
            // Any number of same-colored bishops cannot mate.
            bishop_square_colors
                .windows(2)
                .all(|pair| pair[0] == pair[1])
        } else {
            knights + bishop_square_colors.len() <= 1
        }
    }

    fn is_decided(&self) -> bool {
        self.checkmate() || self.stalemate() || self.insufficient_material()
    }

    fn mobility_counts(&mut self) -> (u32, u32) {
        let us = self.turn();
        let own = self.generate_moves().len() as u32;
        let other = if self.in_check() {
            0
        } else {
            unsafe {
                self.apply_null_move();
            }
            let count = self.generate_moves().len() as u32;
            unsafe {
                self.undo_null_move();
            }
            count
        };
        match us {
            Player::White => (own, other),
            Player::Black => (other, own),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirror_flips_ranks_only() {
        assert_eq!(mirror(SQ(0)).0, 56); // a1 -> a8
        assert_eq!(mirror(SQ(63)).0, 7); // h8 -> h1
        assert_eq!(mirror(SQ(12)).0, 52); // e2 -> e7
    }

    #[test]
    fn bare_kings_are_insufficient() {
        let board = Board::from_fen("8/8/8/8/8/4k3/8/4K3 w - - 0 1").unwrap();
        assert!(board.insufficient_material());
        assert!(board.is_decided());
    }

    #[test]
    fn lone_minor_is_insufficient() {
        let board = Board::from_fen("8/8/8/3k4/8/8/3N4/4K3 w - - 0 1").unwrap();
        assert!(board.insufficient_material());
    }

    #[test]
    fn queen_on_board_is_sufficient() {
        let board = Board::from_fen("8/8/8/3k4/8/8/3Q4/4K3 w - - 0 1").unwrap();
        assert!(!board.insufficient_material());
    }

    #[test]
    fn start_position_is_not_decided() {
        let board = Board::start_pos();
        assert!(!board.insufficient_material());
        assert!(!board.is_decided());
    }

    #[test]
    fn start_position_mobility_is_symmetric() {
        let mut board = Board::start_pos();
        let fen_before = board.fen();
        let (white, black) = board.mobility_counts();
        assert_eq!(white, 20);
        assert_eq!(black, 20);
        assert_eq!(board.fen(), fen_before, "counting must not mutate the position");
    }
}
