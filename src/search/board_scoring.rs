//! Pluggable board evaluation interfaces and baseline implementations.
//!
//! Search remains modular by delegating static position scoring to this trait,
//! allowing alternate heuristics to be swapped without altering search code.
//! Every scorer reports White minus Black: positive favours White no matter
//! whose turn it is.

use crate::game_state::board::Board;
use crate::game_state::chess_types::Color;
use crate::search::piece_tables::PieceTables;

/// Magnitude of a mate score before the remaining-depth bonus is added.
pub const MATE_SCORE: i32 = 30000;

pub trait BoardScorer: Send + Sync {
    /// Static score, White minus Black.
    fn score(&self, board: &Board) -> i32;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialScorer;

impl BoardScorer for MaterialScorer {
    #[inline]
    fn score(&self, board: &Board) -> i32 {
        board.material(Color::White) - board.material(Color::Black)
    }
}

/// Material plus piece-square bonuses.
#[derive(Debug, Clone, Default)]
pub struct PieceSquareScorer {
    tables: PieceTables,
}

impl PieceSquareScorer {
    pub fn new(tables: PieceTables) -> Self {
        Self { tables }
    }

    fn positional(&self, board: &Board, color: Color) -> i32 {
        let endgame = board.is_endgame();
        board
            .pieces(color)
            .map(|(position, piece)| piece.value() + self.tables.value(piece, position, endgame))
            .sum()
    }
}

impl BoardScorer for PieceSquareScorer {
    fn score(&self, board: &Board) -> i32 {
        self.positional(board, Color::White) - self.positional(board, Color::Black)
    }
}
