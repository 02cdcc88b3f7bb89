//! Canonical chess-rule constants.
//!
//! Static rule-related literals: the starting layout and the fixed columns
//! involved in castling.

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Column the king starts on (the e-file).
pub const KING_START_COLUMN: u8 = 4;

/// Castling toward column 0 (queenside).
pub const LONG_CASTLE: CastleSide = CastleSide {
    rook_from: 0,
    rook_to: 3,
    king_to: 2,
    must_be_empty: &[1, 2, 3],
    king_path: &[4, 3, 2],
};

/// Castling toward column 7 (kingside).
pub const SHORT_CASTLE: CastleSide = CastleSide {
    rook_from: 7,
    rook_to: 5,
    king_to: 6,
    must_be_empty: &[5, 6],
    king_path: &[4, 5, 6],
};

/// Column layout of one castling direction on the mover's back rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleSide {
    pub rook_from: u8,
    pub rook_to: u8,
    pub king_to: u8,
    /// Columns between king and rook.
    pub must_be_empty: &'static [u8],
    /// Columns the king stands on while castling, origin and destination included.
    pub king_path: &'static [u8],
}

impl CastleSide {
    /// The castling direction whose king lands on `king_to`.
    pub fn for_king_target(king_to: u8) -> Option<CastleSide> {
        match king_to {
            2 => Some(LONG_CASTLE),
            6 => Some(SHORT_CASTLE),
            _ => None,
        }
    }
}
