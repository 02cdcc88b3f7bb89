//! Computer opponent abstraction.
//!
//! An adversary plays one color. Given the current board it picks a legal
//! move for that color (with its promotion piece already chosen) and leaves
//! the caller's board untouched; the caller applies the move through the
//! normal `Board` API.

use crate::chess_errors::ChessResult;
use crate::engines::engine_minimax::MiniMaxAdversary;
use crate::engines::engine_random::RandomAdversary;
use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, PieceKind};
use crate::move_generation::chess_move::Move;

pub trait ComputerAdversary: Send {
    fn name(&self) -> &str;

    fn color(&self) -> Color;

    /// A legal move for `self.color()`, or `ChessErrors::NoLegalMoves`.
    fn choose_move(&mut self, board: &Board) -> ChessResult<Move>;

    /// Piece a pawn of this adversary turns into when it promotes.
    fn choose_promotion(&mut self) -> PieceKind;
}

/// The closed set of strategies a difficulty can select.
pub enum Adversary {
    Random(RandomAdversary),
    MiniMax(MiniMaxAdversary),
}

impl ComputerAdversary for Adversary {
    fn name(&self) -> &str {
        match self {
            Adversary::Random(inner) => inner.name(),
            Adversary::MiniMax(inner) => inner.name(),
        }
    }

    fn color(&self) -> Color {
        match self {
            Adversary::Random(inner) => inner.color(),
            Adversary::MiniMax(inner) => inner.color(),
        }
    }

    fn choose_move(&mut self, board: &Board) -> ChessResult<Move> {
        match self {
            Adversary::Random(inner) => inner.choose_move(board),
            Adversary::MiniMax(inner) => inner.choose_move(board),
        }
    }

    fn choose_promotion(&mut self) -> PieceKind {
        match self {
            Adversary::Random(inner) => inner.choose_promotion(),
            Adversary::MiniMax(inner) => inner.choose_promotion(),
        }
    }
}
